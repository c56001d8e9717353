//! Per-request samples, their aggregation, and the run summary.
mod collector;
mod histogram;
mod types;


pub use collector::{MetricsAggregator, setup_metrics_collector};
pub use histogram::LatencyHistogram;
pub use types::{Metrics, MetricsReport, MetricsSummary};
