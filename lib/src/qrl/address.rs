// QRL address derivation from an extended public key

use crate::error::{QrlError, Result};
use crate::hashing::sha2_256;
use crate::qrl::descriptor::{AddrFormatType, QrlDescriptor, DESCRIPTOR_SIZE};

pub const ADDRESS_HASH_SIZE: usize = 32;
pub const ADDRESS_SIZE: usize = DESCRIPTOR_SIZE + ADDRESS_HASH_SIZE + 4;

/// Address layout: descriptor || SHA256(epk) || last 4 bytes of SHA256(descriptor || SHA256(epk))
pub fn address_from_pk(extended_pk: &[u8]) -> Result<[u8; ADDRESS_SIZE]> {
    let descriptor = QrlDescriptor::from_extended_pk(extended_pk)?;
    if descriptor.address_format() != AddrFormatType::SHA256_2X {
        return Err(QrlError::InvalidParameters(
            "Address format type not supported".to_string(),
        ));
    }

    let mut address = [0u8; ADDRESS_SIZE];
    address[..DESCRIPTOR_SIZE].copy_from_slice(&descriptor.to_bytes());
    address[DESCRIPTOR_SIZE..DESCRIPTOR_SIZE + ADDRESS_HASH_SIZE]
        .copy_from_slice(&sha2_256(extended_pk));

    let checksum = sha2_256(&address[..DESCRIPTOR_SIZE + ADDRESS_HASH_SIZE]);
    address[DESCRIPTOR_SIZE + ADDRESS_HASH_SIZE..].copy_from_slice(&checksum[ADDRESS_HASH_SIZE - 4..]);
    Ok(address)
}

/// Structural and checksum validation; never errors.
pub fn address_is_valid(address: &[u8]) -> bool {
    if address.len() != ADDRESS_SIZE {
        return false;
    }
    match QrlDescriptor::from_bytes(&address[..DESCRIPTOR_SIZE]) {
        Ok(d) if d.address_format() == AddrFormatType::SHA256_2X => {}
        _ => return false,
    }
    let checksum = sha2_256(&address[..DESCRIPTOR_SIZE + ADDRESS_HASH_SIZE]);
    address[DESCRIPTOR_SIZE + ADDRESS_HASH_SIZE..] == checksum[ADDRESS_HASH_SIZE - 4..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_pk_address_valid() {
        let pk = [0u8; 67];
        let address = address_from_pk(&pk).expect("Failed to derive address");
        assert_eq!(address.len(), 39);
        assert_eq!(&address[..3], &[0, 0, 0]);
        assert!(address_is_valid(&address));
    }

    #[test]
    fn test_tampered_address_invalid() {
        let address = address_from_pk(&[0u8; 67]).unwrap();

        let mut tampered = address;
        tampered[1] = 0x0A;
        assert!(!address_is_valid(&tampered), "descriptor byte changes the checksum");

        let mut tampered = address;
        tampered[2] = 0x01;
        assert!(!address_is_valid(&tampered));

        let mut tampered = address;
        tampered[38] ^= 0xFF;
        assert!(!address_is_valid(&tampered), "checksum byte flipped");
    }

    #[test]
    fn test_address_shape_rejects() {
        assert!(!address_is_valid(&[]));
        assert!(!address_is_valid(&[0u8; 38]));
        assert!(!address_is_valid(&[0u8; 40]));

        let mut bad_format = address_from_pk(&[0u8; 67]).unwrap();
        bad_format[1] = 0x10;
        assert!(!address_is_valid(&bad_format), "unknown address format");
    }

    #[test]
    fn test_address_requires_extended_pk() {
        assert!(address_from_pk(&[0u8; 10]).is_err());
        assert!(address_from_pk(&[0u8; 68]).is_err());
    }
}
