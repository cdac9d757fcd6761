pub mod metrics;
pub mod report;

pub use metrics::BenchmarkMetrics;
pub use report::BenchmarkReport;
