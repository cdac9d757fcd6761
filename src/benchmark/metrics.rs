use chrono::serde::ts_seconds;
use qrl_xmss_lib::xmss::{verify, XmssFast, XmssSigner};
use qrl_xmss_lib::{AddrFormatType, HashFunction, Result};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::info;

/// Timings collected for one key over a run of signatures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Tree height of the benchmarked key
    pub tree_height: u8,
    /// Name of the hash function in the descriptor
    pub hash_function: String,
    /// Time taken for key generation, including the BDS setup pass
    pub keygen_time: Duration,
    /// Total time spent signing
    pub signing_time: Duration,
    /// Total time spent verifying
    pub verification_time: Duration,
    /// Bytes per signature
    pub signature_size_bytes: usize,
    /// Number of signatures produced and verified
    pub signature_count: usize,
    /// Timestamp of the benchmark run
    #[serde(with = "ts_seconds")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl BenchmarkMetrics {
    /// Create a new metrics instance
    pub fn new(tree_height: u8, hash_function: HashFunction, signature_count: usize) -> Self {
        Self {
            tree_height,
            hash_function: hash_function.name().to_string(),
            keygen_time: Duration::default(),
            signing_time: Duration::default(),
            verification_time: Duration::default(),
            signature_size_bytes: 0,
            signature_count,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Generate a key, sign `signature_count` messages and verify each one.
    ///
    /// Preconditions:
    /// - signature_count <= 2^tree_height
    pub fn collect(
        seed: &[u8],
        tree_height: u8,
        hash_function: HashFunction,
        signature_count: usize,
    ) -> Result<Self> {
        let mut metrics = Self::new(tree_height, hash_function, signature_count);

        let (keygen_time, xmss) = Self::measure_time(|| {
            XmssFast::new(seed, tree_height, hash_function, AddrFormatType::SHA256_2X)
        });
        let mut xmss = xmss?;
        metrics.keygen_time = keygen_time;
        metrics.signature_size_bytes = xmss.signature_size();
        let pk = xmss.pk();

        for i in 0..signature_count {
            let message = (i as u64).to_be_bytes();
            let (sign_time, signature) = Self::measure_time(|| xmss.sign(&message));
            let signature = signature?;
            metrics.signing_time += sign_time;

            let (verify_time, valid) = Self::measure_time(|| verify(&message, &signature, &pk));
            metrics.verification_time += verify_time;
            if !valid? {
                tracing::warn!(index = i, "benchmark signature failed to verify");
            }
        }

        info!(
            height = tree_height,
            keygen_ms = metrics.keygen_time.as_millis() as u64,
            signatures = signature_count,
            "benchmark run complete"
        );
        Ok(metrics)
    }

    /// Measure execution time of a closure
    pub fn measure_time<F, R>(f: F) -> (Duration, R)
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let duration = start.elapsed();
        (duration, result)
    }
}
