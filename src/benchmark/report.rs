use super::metrics::BenchmarkMetrics;
use qrl_xmss_lib::Result;
use std::fs;
use std::path::Path;

/// Collects benchmark runs and renders them as JSON or text
#[derive(Debug, Default)]
pub struct BenchmarkReport {
    metrics: Vec<BenchmarkMetrics>,
}

impl BenchmarkReport {
    /// Create a new benchmark report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add metrics to the report
    pub fn add_metrics(&mut self, metrics: BenchmarkMetrics) {
        self.metrics.push(metrics);
    }

    pub fn metrics(&self) -> &[BenchmarkMetrics] {
        &self.metrics
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.metrics)?)
    }

    /// Save report as JSON
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }

    /// One line per run with per-signature averages
    pub fn summary(&self) -> String {
        if self.metrics.is_empty() {
            return "No metrics available".to_string();
        }

        let mut out = format!("Benchmark Summary:\nTotal runs: {}", self.metrics.len());
        for m in &self.metrics {
            let count = m.signature_count.max(1) as f64;
            out.push_str(&format!(
                "\n  h={} {}: keygen {:.3}s, sign {:.3}ms/sig, verify {:.3}ms/sig, {} bytes/sig",
                m.tree_height,
                m.hash_function,
                m.keygen_time.as_secs_f64(),
                m.signing_time.as_secs_f64() * 1000.0 / count,
                m.verification_time.as_secs_f64() * 1000.0 / count,
                m.signature_size_bytes
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrl_xmss_lib::HashFunction;

    #[test]
    fn test_empty_summary() {
        assert_eq!(BenchmarkReport::new().summary(), "No metrics available");
    }

    #[test]
    fn test_report_collects_runs() {
        let metrics = BenchmarkMetrics::collect(&[0u8; 48], 4, HashFunction::SHA2_256, 3)
            .expect("Failed to collect metrics");
        assert_eq!(metrics.signature_size_bytes, 2308);

        let mut report = BenchmarkReport::new();
        report.add_metrics(metrics);
        let summary = report.summary();
        assert!(summary.contains("Total runs: 1"));
        assert!(summary.contains("h=4 SHA2-256"), "got {summary}");

        let json = report.to_json().unwrap();
        let parsed: Vec<BenchmarkMetrics> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0].signature_count, 3);
    }
}
