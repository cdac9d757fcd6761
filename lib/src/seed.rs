// Seed helpers: OS-random seeds mixed with caller entropy, and hash-chain seed derivation

use crate::error::{QrlError, Result};
use crate::hashing::shake256;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

/// Fresh seed of `size` bytes: SHAKE256 over `size` bytes of OS randomness
/// followed by the caller's entropy string.
pub fn get_random_seed(size: usize, entropy: &str) -> Result<Vec<u8>> {
    if size == 0 {
        return Err(QrlError::InvalidParameters(
            "seed size must be positive".to_string(),
        ));
    }
    let mut material = Zeroizing::new(vec![0u8; size]);
    OsRng
        .try_fill_bytes(&mut material)
        .map_err(|e| QrlError::InvalidParameters(format!("OS randomness unavailable: {e}")))?;
    material.extend_from_slice(entropy.as_bytes());
    shake256(size, &material)
}

/// `count` 32-byte seeds: element `i` is SHAKE256(seed || LE32(shift) || LE32(i)).
pub fn get_hash_chain_seed(seed: &[u8], shift: u32, count: u32) -> Result<Vec<[u8; 32]>> {
    let mut buf = Zeroizing::new(Vec::with_capacity(seed.len() + 8));
    buf.extend_from_slice(seed);
    buf.extend_from_slice(&shift.to_le_bytes());
    buf.extend_from_slice(&[0u8; 4]);
    let p = seed.len() + 4;

    (0..count)
        .map(|i| {
            buf[p..p + 4].copy_from_slice(&i.to_le_bytes());
            let digest = shake256(32, &buf)?;
            let mut out = [0u8; 32];
            out.copy_from_slice(&digest);
            Ok(out)
        })
        .collect()
}
