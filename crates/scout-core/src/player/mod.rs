//! Player domain module.
//!
//! # Module Structure
//!
//! - `model`: the immutable `PlayerRecord` loaded from the dataset
//! - `catalog`: read-only grouping of records by position label
//! - `classifier`: keyword-based bucketing of position labels for selection

mod catalog;
mod classifier;
mod model;

pub use catalog::PlayerCatalog;
pub use classifier::{PlayerGroup, PositionClassifier, PositionGroup};
pub use model::{PlayerAge, PlayerRecord, UNKNOWN_POSITION};
