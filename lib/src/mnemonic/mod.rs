// Mnemonic codec: every 3 bytes map to two 12-bit indices into a 4096-word list
//
// Word codes are packed big-endian, so bytes [b0, b1, b2] become the words
// (b0 << 4 | b1 >> 4) and ((b1 & 0x0F) << 8 | b2).

use crate::error::{QrlError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const WORD_COUNT: usize = 4096;

static WORDS: Lazy<Vec<&'static str>> =
    Lazy::new(|| include_str!("wordlist.txt").lines().collect());

static WORD_LOOKUP: Lazy<HashMap<&'static str, u16>> = Lazy::new(|| {
    WORDS
        .iter()
        .enumerate()
        .map(|(idx, word)| (*word, idx as u16))
        .collect()
});

/// The word list in index order
pub fn wordlist() -> &'static [&'static str] {
    WORDS.as_slice()
}

/// Encode bytes as a space-separated phrase.
///
/// Preconditions:
/// - `bytes.len()` is a multiple of 3
///
/// Postconditions:
/// - Returns `2 * len / 3` words; empty input yields an empty string
pub fn bin2mnemonic(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 3 != 0 {
        return Err(QrlError::InvalidEncoding(format!(
            "byte count {} needs to be a multiple of 3",
            bytes.len()
        )));
    }

    let mut words = Vec::with_capacity(bytes.len() / 3 * 2);
    for chunk in bytes.chunks_exact(3) {
        let (b0, b1, b2) = (chunk[0] as usize, chunk[1] as usize, chunk[2] as usize);
        words.push(WORDS[(b0 << 4) | (b1 >> 4)]);
        words.push(WORDS[((b1 & 0x0F) << 8) | b2]);
    }
    Ok(words.join(" "))
}

/// Decode a phrase produced by [`bin2mnemonic`]; tokens are split on any whitespace.
pub fn mnemonic2bin(phrase: &str) -> Result<Vec<u8>> {
    let tokens: Vec<&str> = phrase.split_whitespace().collect();
    if tokens.len() % 2 != 0 {
        return Err(QrlError::OddWordCount(tokens.len()));
    }

    let mut out = Vec::with_capacity(tokens.len() / 2 * 3);
    for pair in tokens.chunks_exact(2) {
        let packed = (word_index(pair[0])? << 12) | word_index(pair[1])?;
        out.extend_from_slice(&[(packed >> 16) as u8, (packed >> 8) as u8, packed as u8]);
    }
    Ok(out)
}

fn word_index(word: &str) -> Result<u32> {
    WORD_LOOKUP
        .get(word)
        .map(|&idx| u32::from(idx))
        .ok_or_else(|| QrlError::UnknownWord(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{bin2hstr, hstr2bin};
    use proptest::prelude::*;

    #[test]
    fn test_wordlist_shape() {
        let words = wordlist();
        assert_eq!(words.len(), WORD_COUNT, "one word per 12-bit code");
        assert_eq!(words[0], "aback");
        assert_eq!(words[16], "absorb");
        assert_eq!(words[256], "badge");
        assert_eq!(words[512], "bunny");
        assert_eq!(WORD_LOOKUP.len(), WORD_COUNT, "words must be unique");
    }

    #[test]
    fn test_mnemonic_to_bin_vectors() {
        let cases = [
            ("aback aback", "000000"),
            ("aback badge", "000100"),
            ("aback bunny", "000200"),
            ("base elbow knew bag", "123456780102"),
            ("base elbow knew aback bag bunny", "123456780000102200"),
        ];
        for (phrase, hex) in cases {
            let bin = mnemonic2bin(phrase).expect("Failed to decode mnemonic");
            assert_eq!(bin2hstr(&bin, 0), hex, "decoding {phrase:?}");
        }

        assert_eq!(mnemonic2bin("aback absorb").unwrap(), vec![0, 0, 16]);
        assert_eq!(mnemonic2bin("absorb absorb").unwrap(), vec![1, 0, 16]);
    }

    #[test]
    fn test_bin_to_mnemonic_vectors() {
        let cases = [
            ("000000", "aback aback"),
            ("000100", "aback badge"),
            ("000200", "aback bunny"),
            ("123456780100", "base elbow knew badge"),
            ("123456780109", "base elbow knew bald"),
        ];
        for (hex, phrase) in cases {
            let bin = hstr2bin(hex).unwrap();
            assert_eq!(bin2mnemonic(&bin).unwrap(), phrase, "encoding {hex}");
        }
        assert_eq!(bin2mnemonic(&[]).unwrap(), "");
    }

    #[test]
    fn test_bin_to_mnemonic_rejects_partial_groups() {
        for len in [1usize, 2, 4, 5] {
            let result = bin2mnemonic(&vec![0u8; len]);
            assert!(
                matches!(result, Err(QrlError::InvalidEncoding(_))),
                "{len} bytes should be rejected"
            );
        }
    }

    #[test]
    fn test_odd_word_count() {
        match mnemonic2bin("absorb") {
            Err(QrlError::OddWordCount(n)) => assert_eq!(n, 1),
            other => panic!("Expected OddWordCount, got {other:?}"),
        }
        let err = mnemonic2bin("absorb bunny bunny").unwrap_err();
        assert!(err.to_string().contains("word count = 3 must be even"));
    }

    #[test]
    fn test_unknown_word() {
        match mnemonic2bin("aback xylophonez") {
            Err(QrlError::UnknownWord(w)) => assert_eq!(w, "xylophonez"),
            other => panic!("Expected UnknownWord, got {other:?}"),
        }
    }

    #[test]
    fn test_whitespace_tolerance() {
        assert_eq!(
            mnemonic2bin("  aback\tbadge\n").unwrap(),
            vec![0x00, 0x01, 0x00]
        );
        assert!(mnemonic2bin("").unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn prop_mnemonic_round_trip(groups in proptest::collection::vec(any::<[u8; 3]>(), 0..32)) {
            let bytes: Vec<u8> = groups.concat();
            let phrase = bin2mnemonic(&bytes).unwrap();
            prop_assert_eq!(phrase.split(' ').filter(|w| !w.is_empty()).count(), bytes.len() / 3 * 2);
            prop_assert_eq!(mnemonic2bin(&phrase).unwrap(), bytes);
        }
    }
}
