pub mod aggregator;
pub mod models;

pub use aggregator::StatsAggregator;
pub use models::*;
