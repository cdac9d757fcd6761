// 3-byte QRL descriptor carried in front of public keys, seeds and addresses

use crate::error::{QrlError, Result};
use crate::hashing::HashFunction;
use serde::{Deserialize, Serialize};

pub const DESCRIPTOR_SIZE: usize = 3;
pub const SEED_SIZE: usize = 48;
pub const EXTENDED_SEED_SIZE: usize = DESCRIPTOR_SIZE + SEED_SIZE;
pub const EXTENDED_PK_SIZE: usize = DESCRIPTOR_SIZE + 64;

/// Largest height the 4-bit `height / 2` field can carry
pub const MAX_DESCRIPTOR_HEIGHT: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SignatureType {
    XMSS = 0,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
#[repr(u8)]
pub enum AddrFormatType {
    SHA256_2X = 0,
}

impl SignatureType {
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(SignatureType::XMSS),
            other => Err(QrlError::InvalidParameters(format!(
                "unknown signature type {other}"
            ))),
        }
    }
}

impl AddrFormatType {
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(AddrFormatType::SHA256_2X),
            other => Err(QrlError::InvalidParameters(format!(
                "unknown address format {other}"
            ))),
        }
    }
}

/// Descriptor layout:
///
/// ```text
/// byte 0:  sig_type << 4 | hash_fn
/// byte 1:  addr_fmt << 4 | height / 2
/// byte 2:  reserved, zero
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QrlDescriptor {
    hash_function: HashFunction,
    signature_type: SignatureType,
    height: u8,
    address_format: AddrFormatType,
}

impl QrlDescriptor {
    /// Preconditions:
    /// - height is even and at most 30
    ///
    /// Postconditions:
    /// - `to_bytes()` parses back to an equal descriptor
    pub fn new(
        hash_function: HashFunction,
        signature_type: SignatureType,
        height: u8,
        address_format: AddrFormatType,
    ) -> Result<Self> {
        if height % 2 != 0 || height > MAX_DESCRIPTOR_HEIGHT {
            return Err(QrlError::InvalidParameters(format!(
                "descriptor height {height} must be even and at most {MAX_DESCRIPTOR_HEIGHT}"
            )));
        }
        Ok(Self {
            hash_function,
            signature_type,
            height,
            address_format,
        })
    }

    pub fn hash_function(&self) -> HashFunction {
        self.hash_function
    }

    pub fn signature_type(&self) -> SignatureType {
        self.signature_type
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn address_format(&self) -> AddrFormatType {
        self.address_format
    }

    pub fn to_bytes(&self) -> [u8; DESCRIPTOR_SIZE] {
        [
            ((self.signature_type as u8) << 4) | (self.hash_function.code() & 0x0F),
            ((self.address_format as u8) << 4) | ((self.height >> 1) & 0x0F),
            0,
        ]
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_len(bytes, DESCRIPTOR_SIZE, "descriptor")?;
        Ok(Self {
            hash_function: HashFunction::from_code(bytes[0] & 0x0F)?,
            signature_type: SignatureType::from_code(bytes[0] >> 4)?,
            height: (bytes[1] & 0x0F) << 1,
            address_format: AddrFormatType::from_code(bytes[1] >> 4)?,
        })
    }

    pub fn from_extended_pk(extended_pk: &[u8]) -> Result<Self> {
        check_len(extended_pk, EXTENDED_PK_SIZE, "extended public key")?;
        Self::from_bytes(&extended_pk[..DESCRIPTOR_SIZE])
    }

    pub fn from_extended_seed(extended_seed: &[u8]) -> Result<Self> {
        check_len(extended_seed, EXTENDED_SEED_SIZE, "extended seed")?;
        Self::from_bytes(&extended_seed[..DESCRIPTOR_SIZE])
    }
}

fn check_len(bytes: &[u8], expected: usize, what: &str) -> Result<()> {
    if bytes.len() < expected {
        return Err(QrlError::TruncatedKey {
            expected,
            actual: bytes.len(),
        });
    }
    if bytes.len() != expected {
        return Err(QrlError::MalformedInput(format!(
            "{what} must be {expected} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(())
}
