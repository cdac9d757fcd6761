// WOTS+ one-time signatures over n-byte digests

use crate::codec::to_byte;
use crate::error::{QrlError, Result};
use crate::hashing::HashFunction;
use crate::xmss::hash::{hash_f, prf, Node, N};
use crate::xmss::hash_address::{HashAddress, ADDR_TYPE_OTS};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

pub const DEFAULT_WOTS_W: u32 = 16;

/// Derived Winternitz parameters for n = 32
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WotsParams {
    pub w: u32,
    pub log_w: u32,
    pub len1: u32,
    pub len2: u32,
    pub len: u32,
    pub keysize: usize,
}

impl WotsParams {
    /// Preconditions:
    /// - w is 4 or 16
    ///
    /// Postconditions:
    /// - len1 = 8n / log2 w, len2 = floor(log2(len1 (w - 1)) / log2 w) + 1
    pub fn new(w: u32) -> Result<Self> {
        if !matches!(w, 4 | 16) {
            return Err(QrlError::InvalidParameters(format!(
                "Winternitz parameter {w} must be 4 or 16"
            )));
        }
        let log_w = w.ilog2();
        let len1 = (8 * N as u32) / log_w;
        let len2 = (len1 * (w - 1)).ilog2() / log_w + 1;
        let len = len1 + len2;
        Ok(Self {
            w,
            log_w,
            len1,
            len2,
            len,
            keysize: len as usize * N,
        })
    }
}

impl Default for WotsParams {
    fn default() -> Self {
        // For w = 16: len1 = 64, len2 = 3
        Self {
            w: DEFAULT_WOTS_W,
            log_w: 4,
            len1: 64,
            len2: 3,
            len: 67,
            keysize: 67 * N,
        }
    }
}

/// sk_i = PRF(seed, toByte(i, 32))
pub(crate) fn expand_seed(hash_fn: HashFunction, seed: &Node, len: u32) -> Vec<Node> {
    (0..len)
        .map(|i| {
            let mut ctr = [0u8; 32];
            ctr.copy_from_slice(&to_byte(u64::from(i), 32));
            prf(hash_fn, &ctr, seed)
        })
        .collect()
}

/// Interpret `input` as the `start`-th chain value and apply `steps` more F
/// iterations, stopping at the chain end w - 1.
pub(crate) fn gen_chain(
    hash_fn: HashFunction,
    params: &WotsParams,
    input: &Node,
    start: u32,
    steps: u32,
    pub_seed: &Node,
    addr: &mut HashAddress,
) -> Node {
    let mut out = *input;
    let end = start.saturating_add(steps).min(params.w);
    for i in start..end {
        addr.set_hash(i);
        out = hash_f(hash_fn, &out, pub_seed, addr);
    }
    out
}

pub(crate) fn base_w(params: &WotsParams, input: &[u8], out_len: u32) -> Vec<u32> {
    let mut out = Vec::with_capacity(out_len as usize);
    let mut bytes = input.iter();
    let mut total = 0u32;
    let mut bits = 0u32;
    for _ in 0..out_len {
        if bits == 0 {
            total = u32::from(bytes.next().copied().unwrap_or(0));
            bits = 8;
        }
        bits -= params.log_w;
        out.push((total >> bits) & (params.w - 1));
    }
    out
}

/// Base-w digits of the message followed by the base-w checksum digits.
pub(crate) fn chain_lengths(params: &WotsParams, msg: &Node) -> Vec<u32> {
    let mut digits = base_w(params, msg, params.len1);

    let mut csum: u64 = digits.iter().map(|&d| u64::from(params.w - 1 - d)).sum();
    csum <<= 8 - ((params.len2 * params.log_w) % 8);
    let csum_bytes = to_byte(csum, ((params.len2 * params.log_w + 7) / 8) as usize);

    digits.extend(base_w(params, &csum_bytes, params.len2));
    digits
}

/// Per-leaf WOTS+ seed: PRF(sk_seed, ADRS) with chain, hash and key-and-mask zeroed
pub(crate) fn leaf_seed(hash_fn: HashFunction, sk_seed: &Node, ots_addr: &mut HashAddress) -> Node {
    ots_addr.set_chain(0);
    ots_addr.set_hash(0);
    ots_addr.set_key_and_mask(0);
    prf(hash_fn, &ots_addr.to_bytes(), sk_seed)
}

/// Private chain starts for one leaf.
///
/// Not `Clone`: [`WotsSecretKey::sign`] consumes the key, so one derived key
/// produces at most one signature.
pub struct WotsSecretKey {
    hash_fn: HashFunction,
    params: WotsParams,
    seed: Zeroizing<Node>,
    pub_seed: Node,
    addr: HashAddress,
}

impl WotsSecretKey {
    /// Derive the key for leaf `index` from the XMSS secret seed
    pub fn derive(
        hash_fn: HashFunction,
        params: WotsParams,
        sk_seed: &Node,
        pub_seed: &Node,
        index: u32,
    ) -> Self {
        let mut addr = HashAddress::with_type(ADDR_TYPE_OTS);
        addr.set_ots(index);
        let seed = Zeroizing::new(leaf_seed(hash_fn, sk_seed, &mut addr));
        Self {
            hash_fn,
            params,
            seed,
            pub_seed: *pub_seed,
            addr,
        }
    }

    pub fn address(&self) -> HashAddress {
        self.addr
    }

    /// Chain ends: every private value iterated w - 1 times
    pub fn public_key(&self) -> Vec<Node> {
        let mut addr = self.addr;
        let chains = Zeroizing::new(expand_seed(self.hash_fn, &self.seed, self.params.len));
        chains
            .iter()
            .enumerate()
            .map(|(i, start)| {
                addr.set_chain(i as u32);
                gen_chain(
                    self.hash_fn,
                    &self.params,
                    start,
                    0,
                    self.params.w - 1,
                    &self.pub_seed,
                    &mut addr,
                )
            })
            .collect()
    }

    /// Reveal chain i at position digit_i of the checksum-augmented digest
    pub fn sign(self, msg: &Node) -> Vec<Node> {
        let mut addr = self.addr;
        let digits = chain_lengths(&self.params, msg);
        let chains = Zeroizing::new(expand_seed(self.hash_fn, &self.seed, self.params.len));
        chains
            .iter()
            .zip(digits.iter())
            .enumerate()
            .map(|(i, (start, &digit))| {
                addr.set_chain(i as u32);
                gen_chain(self.hash_fn, &self.params, start, 0, digit, &self.pub_seed, &mut addr)
            })
            .collect()
    }
}

/// Fresh keypair for leaf `index`
pub fn generate_keypair(
    hash_fn: HashFunction,
    params: WotsParams,
    sk_seed: &Node,
    pub_seed: &Node,
    index: u32,
) -> (WotsSecretKey, Vec<Node>) {
    let sk = WotsSecretKey::derive(hash_fn, params, sk_seed, pub_seed, index);
    let pk = sk.public_key();
    (sk, pk)
}

/// Complete every revealed chain to its end
pub fn pk_from_sig(
    hash_fn: HashFunction,
    params: &WotsParams,
    sig: &[Node],
    msg: &Node,
    pub_seed: &Node,
    addr: &mut HashAddress,
) -> Vec<Node> {
    let digits = chain_lengths(params, msg);
    sig.iter()
        .zip(digits.iter())
        .enumerate()
        .map(|(i, (value, &digit))| {
            addr.set_chain(i as u32);
            gen_chain(hash_fn, params, value, digit, params.w - 1 - digit, pub_seed, addr)
        })
        .collect()
}

/// Split raw signature bytes into `len` nodes
pub fn sig_nodes(params: &WotsParams, sig: &[u8]) -> Result<Vec<Node>> {
    if sig.len() != params.keysize {
        return Err(QrlError::MalformedSignature(format!(
            "WOTS+ signature must be {} bytes, got {}",
            params.keysize,
            sig.len()
        )));
    }
    Ok(sig
        .chunks_exact(N)
        .map(|chunk| {
            let mut node = [0u8; N];
            node.copy_from_slice(chunk);
            node
        })
        .collect())
}

/// Ok(false) on any mismatch; Err only when `sig` cannot be a WOTS+ signature
pub fn verify(
    hash_fn: HashFunction,
    params: &WotsParams,
    msg: &Node,
    sig: &[u8],
    pk: &[Node],
    pub_seed: &Node,
    addr: &HashAddress,
) -> Result<bool> {
    let nodes = sig_nodes(params, sig)?;
    if pk.len() != params.len as usize {
        return Ok(false);
    }
    let mut addr = *addr;
    Ok(pk_from_sig(hash_fn, params, &nodes, msg, pub_seed, &mut addr) == pk)
}
