// Digest primitives: SHA2-256 and the SHAKE extendable-output functions

use crate::error::{QrlError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake256};

/// Hash function selected by a descriptor; the discriminant is the wire code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
#[repr(u8)]
pub enum HashFunction {
    SHA2_256 = 0,
    SHAKE_128 = 1,
    SHAKE_256 = 2,
}

impl HashFunction {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(HashFunction::SHA2_256),
            1 => Ok(HashFunction::SHAKE_128),
            2 => Ok(HashFunction::SHAKE_256),
            other => Err(QrlError::InvalidParameters(format!(
                "unknown hash function code {other}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HashFunction::SHA2_256 => "SHA2-256",
            HashFunction::SHAKE_128 => "SHAKE-128",
            HashFunction::SHAKE_256 => "SHAKE-256",
        }
    }

    /// Digest `input` to exactly `out.len()` bytes.
    ///
    /// SHA2-256 truncates its 32-byte output, so `out` must not exceed 32 bytes
    /// for it; the XOFs fill any length.
    pub(crate) fn digest_into(self, input: &[u8], out: &mut [u8]) {
        match self {
            HashFunction::SHA2_256 => {
                let digest = Sha256::digest(input);
                let take = out.len().min(digest.len());
                out[..take].copy_from_slice(&digest[..take]);
            }
            HashFunction::SHAKE_128 => xof_into::<Shake128>(input, out),
            HashFunction::SHAKE_256 => xof_into::<Shake256>(input, out),
        }
    }
}

fn xof_into<X: Default + Update + ExtendableOutput>(input: &[u8], out: &mut [u8]) {
    let mut hasher = X::default();
    hasher.update(input);
    hasher.finalize_xof().read(out);
}

pub fn sha2_256(input: &[u8]) -> [u8; 32] {
    Sha256::digest(input).into()
}

/// Iterated SHA2-256: the digest of `input`, re-hashed until `count` digests
/// have been applied.
pub fn sha2_256_n(input: &[u8], count: usize) -> Result<[u8; 32]> {
    if count == 0 {
        return Err(QrlError::InvalidParameters(
            "sha2_256_n requires count >= 1".to_string(),
        ));
    }
    let mut digest = sha2_256(input);
    for _ in 1..count {
        digest = sha2_256(&digest);
    }
    Ok(digest)
}

pub fn shake128(out_len: usize, input: &[u8]) -> Result<Vec<u8>> {
    shake::<Shake128>(out_len, input)
}

pub fn shake256(out_len: usize, input: &[u8]) -> Result<Vec<u8>> {
    shake::<Shake256>(out_len, input)
}

fn shake<X: Default + Update + ExtendableOutput>(out_len: usize, input: &[u8]) -> Result<Vec<u8>> {
    if out_len == 0 {
        return Err(QrlError::InvalidParameters(
            "SHAKE output length must be positive".to_string(),
        ));
    }
    let mut out = vec![0u8; out_len];
    xof_into::<X>(input, &mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::bin2hstr;

    #[test]
    fn test_sha2_256_vectors() {
        assert_eq!(
            bin2hstr(&sha2_256(b"hello"), 0),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(
            bin2hstr(&sha2_256(b"hello-qrl"), 0),
            "4ad6ad6c9ee6d2e52ebe4d635aa04052b7014e5e2e6b0de36da7648fac147703"
        );
    }

    #[test]
    fn test_sha2_256_n_counts() {
        let input = b"This is a test X";
        let once = sha2_256_n(input, 1).expect("count 1 is valid");
        assert_eq!(once, sha2_256(input), "count 1 is a single digest");
        assert_eq!(
            bin2hstr(&once, 0),
            "a11609b2cc5f26619fcc865473246c9ac59861383a3c4edd2433230258afa03b"
        );

        let sixteen = sha2_256_n(input, 16).expect("count 16 is valid");
        assert_eq!(
            bin2hstr(&sixteen, 0),
            "3be2d7e048d22de2c117465e5b4b819e764352680027c9790a53a7326d62a0fe"
        );
    }

    #[test]
    fn test_sha2_256_n_rejects_zero_count() {
        let result = sha2_256_n(b"abc", 0);
        assert!(matches!(result, Err(QrlError::InvalidParameters(_))));
    }

    #[test]
    fn test_shake128_vectors() {
        assert_eq!(
            bin2hstr(&shake128(32, b"hello").unwrap(), 0),
            "8eb4b6a932f280335ee1a279f8c208a349e7bc65daf831d3021c213825292463"
        );
        assert_eq!(
            bin2hstr(&shake128(32, b"hello-qrl").unwrap(), 0),
            "50028af4e91b430a1ec24924edc707b0d24ab01be44ea5f5c5c111087e9aadcb"
        );
        assert_eq!(
            bin2hstr(&shake128(32, b"This is a test X").unwrap(), 0),
            "02c7654fd239753b787067b1b75523d9bd2c39daa384e4b0d4f91eb78d2a5492"
        );
    }

    #[test]
    fn test_shake256_vectors() {
        assert_eq!(
            bin2hstr(&shake256(64, b"hello").unwrap(), 0),
            "1234075ae4a1e77316cf2d8000974581a343b9ebbca7e3d1db83394c30f22162\
             6f594e4f0de63902349a5ea5781213215813919f92a4d86d127466e3d07e8be3"
        );
        assert_eq!(
            bin2hstr(&shake256(64, b"hello-1234").unwrap(), 0),
            "4a01ca14fd8468f2d2e3a0b3d7597731ad155016753677807ed735b022a9944e\
             61586a6378fc6ffe49e9e0e456f8e2bbfaa41330c5ae7005a2d24ac8f0597e60"
        );
        assert_eq!(
            bin2hstr(&shake256(32, b"This is a test X").unwrap(), 0),
            "b3453cb0cbd37d726a842eb750e6091b15a92efd2695e3191a96d8d07413db04"
        );
    }

    #[test]
    fn test_shake_prefix_property() {
        // XOF output of a shorter length is a prefix of the longer one
        let short = shake256(16, b"prefix").unwrap();
        let long = shake256(100, b"prefix").unwrap();
        assert_eq!(&long[..16], short.as_slice());
    }

    #[test]
    fn test_shake_rejects_zero_length() {
        assert!(shake128(0, b"x").is_err());
        assert!(shake256(0, b"x").is_err());
    }

    #[test]
    fn test_hash_function_codes() {
        for hf in [
            HashFunction::SHA2_256,
            HashFunction::SHAKE_128,
            HashFunction::SHAKE_256,
        ] {
            assert_eq!(HashFunction::from_code(hf.code()).unwrap(), hf);
        }
        assert!(HashFunction::from_code(3).is_err(), "code 3 is unassigned");
    }

    #[test]
    fn test_digest_into_matches_public_functions() {
        let mut out = [0u8; 32];
        HashFunction::SHA2_256.digest_into(b"hello", &mut out);
        assert_eq!(out, sha2_256(b"hello"));

        HashFunction::SHAKE_128.digest_into(b"hello", &mut out);
        assert_eq!(out.to_vec(), shake128(32, b"hello").unwrap());
    }
}
