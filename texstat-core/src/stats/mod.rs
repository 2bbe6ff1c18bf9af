//! Record building and reporting.
//!
//! - [`aggregator`]: token counting and the four frequency views
//! - [`corrections`]: configured fix-ups to the word views
//! - [`pipeline`]: raw snapshot text to [`texstat_types::StatisticsRecord`]
//! - [`report`]: text, JSON and CSV renderings of records

pub mod aggregator;
pub mod corrections;
pub mod pipeline;
pub mod report;

pub use aggregator::{Aggregation, Aggregator};
pub use corrections::apply_corrections;
pub use pipeline::StatsPipeline;
pub use report::Report;
