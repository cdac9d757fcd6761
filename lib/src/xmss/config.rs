// Parameter validation, derived sizes and serde configuration

use crate::error::{QrlError, Result};
use crate::hashing::HashFunction;
use crate::qrl::descriptor::AddrFormatType;
use crate::xmss::hash::N;
use crate::xmss::wots::{WotsParams, DEFAULT_WOTS_W};
use serde::{Deserialize, Serialize};
use xmss_types::ParameterMetadata;

/// BDS retain parameter
pub const BDS_K: u32 = 2;

/// Largest height a signature length can describe
pub const MAX_HEIGHT: u32 = 254;

pub const SECRET_KEY_SIZE: usize = 4 + 4 * N;
pub const PUBLIC_KEY_SIZE: usize = 2 * N;

pub const BDS_RULE_MESSAGE: &str = "For BDS traversal, H - K must be even, with H > K >= 2!";

/// Validated tree parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmssParams {
    pub height: u32,
    pub k: u32,
    pub wots: WotsParams,
}

impl XmssParams {
    /// Preconditions:
    /// - height <= 254
    /// - k < height and (height - k) is even
    ///
    /// Postconditions:
    /// - Returns Err(InvalidParameters) with the BDS rule message otherwise
    pub fn new(height: u32, wots_w: u32) -> Result<Self> {
        check_bds_rule(height)?;
        Ok(Self {
            height,
            k: BDS_K,
            wots: WotsParams::new(wots_w)?,
        })
    }

    /// Number of one-time leaves, 2^height, saturating at u64::MAX
    pub fn lifetime(&self) -> u64 {
        1u64.checked_shl(self.height).unwrap_or(u64::MAX)
    }

    pub fn signature_size(&self) -> usize {
        signature_base_size(&self.wots) + self.height as usize * N
    }

    /// Postconditions:
    /// - Err(InvalidParameters) when 2^height does not fit the u64 lifetime
    pub fn metadata(&self, hash_function: HashFunction) -> Result<ParameterMetadata> {
        if self.height >= u64::BITS {
            return Err(QrlError::InvalidParameters(format!(
                "height {} has a lifetime beyond 2^64 signatures",
                self.height
            )));
        }
        Ok(ParameterMetadata {
            tree_height: self.height as u8,
            winternitz_parameter: self.wots.w,
            hash_function: hash_function.code(),
            lifetime: self.lifetime(),
            signature_size_bytes: self.signature_size(),
            public_key_size_bytes: PUBLIC_KEY_SIZE,
            secret_key_size_bytes: SECRET_KEY_SIZE,
        })
    }
}

pub(crate) fn check_bds_rule(height: u32) -> Result<()> {
    if height > MAX_HEIGHT {
        return Err(QrlError::InvalidParameters(format!(
            "height {height} exceeds the maximum of {MAX_HEIGHT}"
        )));
    }
    if BDS_K >= height || (height - BDS_K) % 2 != 0 {
        return Err(QrlError::InvalidParameters(BDS_RULE_MESSAGE.to_string()));
    }
    Ok(())
}

/// Signature bytes independent of height: idx || R || wots
pub fn signature_base_size(wots: &WotsParams) -> usize {
    4 + N + wots.keysize
}

/// Tree height implied by a signature length.
///
/// Postconditions:
/// - Err(MalformedSignature) when `size` is shorter than a zero-height
///   signature, not aligned to whole nodes, or implies a height above 254
pub fn get_height_from_sig_size(size: usize, wots_w: u32) -> Result<u32> {
    let wots = WotsParams::new(wots_w)?;
    let base = signature_base_size(&wots);
    if size < base {
        return Err(QrlError::MalformedSignature(format!(
            "signature of {size} bytes is shorter than the {base}-byte minimum"
        )));
    }
    if (size - base) % N != 0 {
        return Err(QrlError::MalformedSignature(format!(
            "signature of {size} bytes is not aligned to {N}-byte nodes"
        )));
    }
    let height = (size - base) / N;
    if height > MAX_HEIGHT as usize {
        return Err(QrlError::MalformedSignature(format!(
            "signature of {size} bytes implies height {height}"
        )));
    }
    Ok(height as u32)
}

/// Key generation settings, loadable from JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmssConfig {
    pub height: u8,
    pub hash_function: HashFunction,
    pub address_format: AddrFormatType,
    pub wots_w: u32,
}

impl Default for XmssConfig {
    fn default() -> Self {
        Self {
            height: 10,
            hash_function: HashFunction::SHAKE_128,
            address_format: AddrFormatType::SHA256_2X,
            wots_w: DEFAULT_WOTS_W,
        }
    }
}

impl XmssConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn params(&self) -> Result<XmssParams> {
        XmssParams::new(u32::from(self.height), self.wots_w)
    }

    pub fn metadata(&self) -> Result<ParameterMetadata> {
        self.params()?.metadata(self.hash_function)
    }
}
