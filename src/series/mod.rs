pub mod filler;
pub mod summary;

pub use filler::{fill_range, FilledDay, FilledSeries};
pub use summary::{summarize, QuantilePoint, RangeSummary};
