//! Record filtering and aggregation.

pub mod aggregator;
pub mod filters;

pub use aggregator::*;
pub use filters::*;
