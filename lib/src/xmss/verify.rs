// Stateless XMSS verification against an extended public key

use crate::error::{QrlError, Result};
use crate::qrl::descriptor::{QrlDescriptor, DESCRIPTOR_SIZE, EXTENDED_PK_SIZE};
use crate::xmss::config::{get_height_from_sig_size, XmssParams};
use crate::xmss::hash::{h_msg, Node, N};
use crate::xmss::hash_address::{HashAddress, ADDR_TYPE_HASHTREE, ADDR_TYPE_LTREE, ADDR_TYPE_OTS};
use crate::xmss::signature;
use crate::xmss::tree::{l_tree, validate_authpath};
use crate::xmss::wots::{pk_from_sig, DEFAULT_WOTS_W};
use tracing::debug;

/// [`verify_with_w`] with w = 16
pub fn verify(message: &[u8], signature: &[u8], extended_pk: &[u8]) -> Result<bool> {
    verify_with_w(message, signature, extended_pk, DEFAULT_WOTS_W)
}

/// Postconditions:
/// - Err(MalformedInput) if `extended_pk` is not 67 bytes
/// - Err(MalformedSignature) if no tree height yields `signature.len()`
/// - Ok(false) for an unusable descriptor, a height that disagrees with the
///   descriptor or breaks the BDS rule, an out-of-range index, or a root mismatch
pub fn verify_with_w(
    message: &[u8],
    signature: &[u8],
    extended_pk: &[u8],
    wots_w: u32,
) -> Result<bool> {
    if extended_pk.len() != EXTENDED_PK_SIZE {
        return Err(QrlError::MalformedInput(format!(
            "extended public key must be {EXTENDED_PK_SIZE} bytes, got {}",
            extended_pk.len()
        )));
    }
    let height = get_height_from_sig_size(signature.len(), wots_w)?;

    let descriptor = match QrlDescriptor::from_extended_pk(extended_pk) {
        Ok(descriptor) => descriptor,
        Err(err) => {
            debug!(%err, "rejecting signature: unusable descriptor");
            return Ok(false);
        }
    };
    if u32::from(descriptor.height()) != height {
        debug!(
            descriptor_height = descriptor.height(),
            signature_height = height,
            "rejecting signature: height mismatch"
        );
        return Ok(false);
    }
    let params = match XmssParams::new(height, wots_w) {
        Ok(params) => params,
        Err(err) => {
            debug!(%err, "rejecting signature: invalid parameters");
            return Ok(false);
        }
    };

    let parts = signature::decode(signature, &params)?;
    let index = u64::from(parts.index);
    if index >= params.lifetime() {
        debug!(index, "rejecting signature: leaf index beyond the tree");
        return Ok(false);
    }

    let hash_fn = descriptor.hash_function();
    let mut root = [0u8; N];
    root.copy_from_slice(&extended_pk[DESCRIPTOR_SIZE..DESCRIPTOR_SIZE + N]);
    let mut pub_seed: Node = [0u8; N];
    pub_seed.copy_from_slice(&extended_pk[DESCRIPTOR_SIZE + N..]);

    let digest = h_msg(hash_fn, message, &parts.randomness, &root, index);

    let mut ots_addr = HashAddress::with_type(ADDR_TYPE_OTS);
    ots_addr.set_ots(parts.index);
    let wots_pk = pk_from_sig(
        hash_fn,
        &params.wots,
        &parts.wots_signature,
        &digest,
        &pub_seed,
        &mut ots_addr,
    );

    let mut ltree_addr = HashAddress::with_type(ADDR_TYPE_LTREE);
    ltree_addr.set_ltree(parts.index);
    let leaf = l_tree(hash_fn, wots_pk, &pub_seed, &mut ltree_addr);

    let mut node_addr = HashAddress::with_type(ADDR_TYPE_HASHTREE);
    let computed = validate_authpath(hash_fn, &leaf, index, &parts.auth_path, &pub_seed, &mut node_addr);

    if computed != root {
        debug!(index, "rejecting signature: root mismatch");
        return Ok(false);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::HashFunction;
    use crate::qrl::descriptor::AddrFormatType;
    use crate::xmss::fast::XmssFast;
    use crate::xmss::key::XmssSigner;

    fn signed(message: &[u8]) -> (Vec<u8>, [u8; EXTENDED_PK_SIZE]) {
        let mut xmss = XmssFast::new(&[0u8; 48], 4, HashFunction::SHAKE_128, AddrFormatType::SHA256_2X)
            .expect("Failed to create XMSS keypair");
        let signature = xmss.sign(message).expect("Failed to sign");
        (signature, xmss.pk())
    }

    #[test]
    fn test_malformed_lengths_are_errors() {
        let message = [0u8; 48];
        assert!(matches!(
            verify(&message, &[0u8; 2287], &[0u8; 67]),
            Err(QrlError::MalformedSignature(_))
        ));
        assert!(matches!(
            verify(&message, &[0u8; 2308], &[0u8; 66]),
            Err(QrlError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_zero_key_rejects_zero_signature() {
        // Zero descriptor parses as SHA2 h0, which never matches a 4-level signature
        assert!(!verify(&[0u8; 32], &[0u8; 2308], &[0u8; 67]).unwrap());
    }

    #[test]
    fn test_descriptor_height_must_match() {
        let (signature, mut pk) = signed(b"height");
        pk[1] = 0x03;
        assert!(!verify(b"height", &signature, &pk).unwrap(), "descriptor now claims h = 6");
    }

    #[test]
    fn test_unknown_hash_code_is_false() {
        let (signature, mut pk) = signed(b"hash");
        pk[0] = 0x0F;
        assert!(!verify(b"hash", &signature, &pk).unwrap());
    }

    #[test]
    fn test_index_beyond_tree_is_false() {
        let (mut signature, pk) = signed(b"index");
        signature[3] = 16;
        assert!(!verify(b"index", &signature, &pk).unwrap());
    }

    #[test]
    fn test_bds_rule_violation_is_false() {
        // Descriptor and signature agree on h = 2, which leaves no room for k = 2
        let mut pk = [0u8; 67];
        pk[1] = 0x01;
        let signature = vec![0u8; 2180 + 2 * 32];
        assert!(!verify(b"short", &signature, &pk).unwrap());

        pk[1] = 0x02;
        let signature = vec![0u8; 2180 + 5 * 32];
        assert!(!verify(b"odd", &signature, &pk).unwrap(), "h = 5 disagrees with h = 4");
    }

    #[test]
    fn test_tampered_root_is_false() {
        let (signature, mut pk) = signed(b"root");
        assert!(verify(b"root", &signature, &pk).unwrap());
        pk[10] ^= 0x80;
        assert!(!verify(b"root", &signature, &pk).unwrap());
    }
}
