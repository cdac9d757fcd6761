// Signature wire layout: idx (4, big-endian) || R || WOTS+ signature || auth path

use crate::error::{QrlError, Result};
use crate::xmss::config::XmssParams;
use crate::xmss::hash::{Node, N};
use crate::xmss::wots::sig_nodes;

/// A signature split into its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParts {
    pub index: u32,
    pub randomness: Node,
    pub wots_signature: Vec<Node>,
    pub auth_path: Vec<Node>,
}

pub fn encode(index: u32, randomness: &Node, wots_signature: &[Node], auth_path: &[Node]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + N * (1 + wots_signature.len() + auth_path.len()));
    out.extend_from_slice(&index.to_be_bytes());
    out.extend_from_slice(randomness);
    for node in wots_signature.iter().chain(auth_path) {
        out.extend_from_slice(node);
    }
    out
}

/// Preconditions:
/// - bytes.len() == params.signature_size()
///
/// Postconditions:
/// - Returns Err(MalformedSignature) on any length mismatch
pub fn decode(bytes: &[u8], params: &XmssParams) -> Result<SignatureParts> {
    let expected = params.signature_size();
    if bytes.len() != expected {
        return Err(QrlError::MalformedSignature(format!(
            "expected {expected} bytes for height {}, got {}",
            params.height,
            bytes.len()
        )));
    }

    let mut index = [0u8; 4];
    index.copy_from_slice(&bytes[..4]);
    let mut randomness = [0u8; N];
    randomness.copy_from_slice(&bytes[4..4 + N]);

    let wots_start = 4 + N;
    let auth_start = wots_start + params.wots.keysize;
    let wots_signature = sig_nodes(&params.wots, &bytes[wots_start..auth_start])?;
    let auth_path = bytes[auth_start..]
        .chunks_exact(N)
        .map(|chunk| {
            let mut node = [0u8; N];
            node.copy_from_slice(chunk);
            node
        })
        .collect();

    Ok(SignatureParts {
        index: u32::from_be_bytes(index),
        randomness,
        wots_signature,
        auth_path,
    })
}
