// Keyed tweakable hash functions: F, H, PRF and H_msg
//
// Every call hashes toByte(type, n) || key || input with the descriptor's hash
// function. F and H derive their key and bitmasks from PRF(pub_seed, ADRS).

use crate::codec::to_byte;
use crate::hashing::HashFunction;
use crate::xmss::hash_address::HashAddress;

/// Security parameter: digest and node size in bytes
pub const N: usize = 32;

pub type Node = [u8; N];

const HASH_PADDING_F: u64 = 0;
const HASH_PADDING_H: u64 = 1;
const HASH_PADDING_HASH: u64 = 2;
const HASH_PADDING_PRF: u64 = 3;

fn core_hash(hash_fn: HashFunction, padding: u64, key: &[u8], input: &[u8]) -> Node {
    let mut buf = Vec::with_capacity(N + key.len() + input.len());
    buf.extend_from_slice(&to_byte(padding, N));
    buf.extend_from_slice(key);
    buf.extend_from_slice(input);

    let mut out = [0u8; N];
    hash_fn.digest_into(&buf, &mut out);
    out
}

pub fn prf(hash_fn: HashFunction, input: &[u8; 32], key: &Node) -> Node {
    core_hash(hash_fn, HASH_PADDING_PRF, key, input)
}

/// Randomized message digest keyed by R || root || toByte(idx, n)
pub fn h_msg(hash_fn: HashFunction, message: &[u8], r: &Node, root: &Node, idx: u64) -> Node {
    let mut key = Vec::with_capacity(3 * N);
    key.extend_from_slice(r);
    key.extend_from_slice(root);
    key.extend_from_slice(&to_byte(idx, N));
    core_hash(hash_fn, HASH_PADDING_HASH, &key, message)
}

/// Chain step. Leaves `addr` with key-and-mask = 1.
pub fn hash_f(hash_fn: HashFunction, input: &Node, pub_seed: &Node, addr: &mut HashAddress) -> Node {
    addr.set_key_and_mask(0);
    let key = prf(hash_fn, &addr.to_bytes(), pub_seed);
    addr.set_key_and_mask(1);
    let mask = prf(hash_fn, &addr.to_bytes(), pub_seed);

    let mut masked = [0u8; N];
    for (out, (a, b)) in masked.iter_mut().zip(input.iter().zip(mask.iter())) {
        *out = a ^ b;
    }
    core_hash(hash_fn, HASH_PADDING_F, &key, &masked)
}

/// Two-to-one node compression. Leaves `addr` with key-and-mask = 2.
pub fn hash_h(
    hash_fn: HashFunction,
    left: &Node,
    right: &Node,
    pub_seed: &Node,
    addr: &mut HashAddress,
) -> Node {
    addr.set_key_and_mask(0);
    let key = prf(hash_fn, &addr.to_bytes(), pub_seed);
    addr.set_key_and_mask(1);
    let mask_left = prf(hash_fn, &addr.to_bytes(), pub_seed);
    addr.set_key_and_mask(2);
    let mask_right = prf(hash_fn, &addr.to_bytes(), pub_seed);

    let mut masked = [0u8; 2 * N];
    for i in 0..N {
        masked[i] = left[i] ^ mask_left[i];
        masked[N + i] = right[i] ^ mask_right[i];
    }
    core_hash(hash_fn, HASH_PADDING_H, &key, &masked)
}
