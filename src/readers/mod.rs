pub mod reading_reader;

pub use reading_reader::{ReadingIterator, ReadingReader};
