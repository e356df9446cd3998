pub mod flattener;

pub use flattener::{flat_iter, flatten, FlatIter};
