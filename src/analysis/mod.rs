//! Analysis modules.
//!
//! Group-by summaries over the rental tables, and assembly of the
//! [`Dashboard`](crate::models::Dashboard) the renderers consume.

pub mod aggregator;
pub mod dashboard;

pub use dashboard::build_dashboard;
