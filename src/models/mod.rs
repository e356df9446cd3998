pub mod nested;
pub mod reading;
pub mod report;

pub use nested::{Nested, NestedValue, Node};
pub use reading::{DateRange, Reading};
pub use report::{FluctuationWinner, RangedFluctuation, StationReport};
