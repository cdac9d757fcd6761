// Conversion layer between wire bytes and the serde types of xmss-types
//
// Wire layouts stay the source of truth; the structured types exist for JSON
// interchange and inspection.

use crate::error::{QrlError, Result};
use crate::qrl::descriptor::{QrlDescriptor, DESCRIPTOR_SIZE, EXTENDED_PK_SIZE};
use crate::xmss::config::{get_height_from_sig_size, XmssParams};
use crate::xmss::hash::{Node, N};
use crate::xmss::signature::{self, SignatureParts};
use crate::xmss::wots::DEFAULT_WOTS_W;
use serde::de::DeserializeOwned;
use serde::Serialize;
use xmss_types::{PublicKey as XmssTypesPublicKey, Signature as XmssTypesSignature};

impl From<&SignatureParts> for XmssTypesSignature {
    fn from(parts: &SignatureParts) -> Self {
        XmssTypesSignature {
            leaf_index: parts.index,
            randomness: parts.randomness.to_vec(),
            wots_signature: parts.wots_signature.iter().map(|n| n.to_vec()).collect(),
            auth_path: parts.auth_path.iter().map(|n| n.to_vec()).collect(),
        }
    }
}

impl TryFrom<&XmssTypesSignature> for SignatureParts {
    type Error = QrlError;

    fn try_from(sig: &XmssTypesSignature) -> Result<Self> {
        Ok(SignatureParts {
            index: sig.leaf_index,
            randomness: to_node(&sig.randomness, "randomness")?,
            wots_signature: sig
                .wots_signature
                .iter()
                .map(|n| to_node(n, "WOTS+ chain value"))
                .collect::<Result<_>>()?,
            auth_path: sig
                .auth_path
                .iter()
                .map(|n| to_node(n, "auth path node"))
                .collect::<Result<_>>()?,
        })
    }
}

fn to_node(bytes: &[u8], what: &str) -> Result<Node> {
    if bytes.len() != N {
        return Err(QrlError::MalformedInput(format!(
            "{what} must be {N} bytes, got {}",
            bytes.len()
        )));
    }
    let mut node = [0u8; N];
    node.copy_from_slice(bytes);
    Ok(node)
}

/// Entry points for moving between wire bytes, structured types and JSON
pub struct TypeConverter;

impl TypeConverter {
    /// Split a w = 16 wire signature into its fields
    pub fn signature_from_bytes(bytes: &[u8]) -> Result<XmssTypesSignature> {
        let height = get_height_from_sig_size(bytes.len(), DEFAULT_WOTS_W)?;
        let params = XmssParams::new(height, DEFAULT_WOTS_W)?;
        Ok(XmssTypesSignature::from(&signature::decode(bytes, &params)?))
    }

    /// Postconditions:
    /// - Err(MalformedInput) if any field is not a 32-byte node
    /// - Err(MalformedSignature) if the chain count is not len = 67
    pub fn signature_to_bytes(sig: &XmssTypesSignature) -> Result<Vec<u8>> {
        let parts = SignatureParts::try_from(sig)?;
        let expected = XmssParams::new(parts.auth_path.len() as u32, DEFAULT_WOTS_W)?;
        if parts.wots_signature.len() != expected.wots.len as usize {
            return Err(QrlError::MalformedSignature(format!(
                "expected {} WOTS+ chain values, got {}",
                expected.wots.len,
                parts.wots_signature.len()
            )));
        }
        Ok(signature::encode(
            parts.index,
            &parts.randomness,
            &parts.wots_signature,
            &parts.auth_path,
        ))
    }

    pub fn public_key_from_bytes(extended_pk: &[u8]) -> Result<XmssTypesPublicKey> {
        QrlDescriptor::from_extended_pk(extended_pk)?;
        let mut descriptor = [0u8; DESCRIPTOR_SIZE];
        descriptor.copy_from_slice(&extended_pk[..DESCRIPTOR_SIZE]);
        Ok(XmssTypesPublicKey {
            descriptor,
            root: extended_pk[DESCRIPTOR_SIZE..DESCRIPTOR_SIZE + N].to_vec(),
            pub_seed: extended_pk[DESCRIPTOR_SIZE + N..].to_vec(),
        })
    }

    pub fn public_key_to_bytes(pk: &XmssTypesPublicKey) -> Result<[u8; EXTENDED_PK_SIZE]> {
        QrlDescriptor::from_bytes(&pk.descriptor)?;
        let root = to_node(&pk.root, "root")?;
        let pub_seed = to_node(&pk.pub_seed, "public seed")?;

        let mut out = [0u8; EXTENDED_PK_SIZE];
        out[..DESCRIPTOR_SIZE].copy_from_slice(&pk.descriptor);
        out[DESCRIPTOR_SIZE..DESCRIPTOR_SIZE + N].copy_from_slice(&root);
        out[DESCRIPTOR_SIZE + N..].copy_from_slice(&pub_seed);
        Ok(out)
    }

    pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
        Ok(serde_json::from_str(json)?)
    }
}
