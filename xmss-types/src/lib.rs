#![cfg_attr(not(feature = "std"), no_std)]

use serde::{Deserialize, Serialize};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Structured view of a wire signature: idx || R || wots || auth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub leaf_index: u32,
    pub randomness: Vec<u8>,
    pub wots_signature: Vec<Vec<u8>>, // len chain values, n bytes each
    pub auth_path: Vec<Vec<u8>>,      // one sibling per tree level
}

/// Structured view of a 67-byte extended public key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    pub descriptor: [u8; 3],
    pub root: Vec<u8>,
    pub pub_seed: Vec<u8>,
}

/// Sizes and limits of one parameter choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterMetadata {
    pub tree_height: u8,
    pub winternitz_parameter: u32,
    pub hash_function: u8,
    pub lifetime: u64,
    pub signature_size_bytes: usize,
    pub public_key_size_bytes: usize,
    pub secret_key_size_bytes: usize,
}
