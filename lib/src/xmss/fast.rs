// XMSS signer backed by BDS traversal: O(h) memory, amortized (h - k) / 2 leaves per signature

use crate::error::Result;
use crate::hashing::HashFunction;
use crate::qrl::descriptor::{AddrFormatType, QrlDescriptor, SEED_SIZE};
use crate::xmss::bds::BdsState;
use crate::xmss::config::XmssConfig;
use crate::xmss::key::{XmssKey, XmssSigner};
use crate::xmss::wots::DEFAULT_WOTS_W;
use tracing::{debug, info};

/// Stateful signer. Neither `Clone` nor `Copy`: two copies would sign with
/// the same leaves.
#[derive(Debug)]
pub struct XmssFast {
    key: XmssKey,
    bds: BdsState,
}

impl XmssFast {
    /// Derive a keypair from a 48-byte seed.
    ///
    /// Preconditions:
    /// - seed.len() == 48
    /// - height is even, 4 <= height <= 30
    ///
    /// Postconditions:
    /// - index() == 0 and the BDS state holds the auth path of leaf 0
    pub fn new(
        seed: &[u8],
        height: u8,
        hash_function: HashFunction,
        address_format: AddrFormatType,
    ) -> Result<Self> {
        Self::with_w(seed, height, hash_function, address_format, DEFAULT_WOTS_W)
    }

    pub fn with_config(seed: &[u8], config: &XmssConfig) -> Result<Self> {
        Self::with_w(
            seed,
            config.height,
            config.hash_function,
            config.address_format,
            config.wots_w,
        )
    }

    /// Rebuild from descriptor || seed
    pub fn from_extended_seed(extended_seed: &[u8]) -> Result<Self> {
        let descriptor = QrlDescriptor::from_extended_seed(extended_seed)?;
        Self::new(
            &extended_seed[extended_seed.len() - SEED_SIZE..],
            descriptor.height(),
            descriptor.hash_function(),
            descriptor.address_format(),
        )
    }

    fn with_w(
        seed: &[u8],
        height: u8,
        hash_function: HashFunction,
        address_format: AddrFormatType,
        wots_w: u32,
    ) -> Result<Self> {
        info!(height, hash = hash_function.name(), "generating XMSS keypair (BDS)");
        let key = XmssKey::derive(seed, height, hash_function, address_format, wots_w)?;
        let (bds, root) = BdsState::setup(&key.tree_context(), key.params());
        let key = key.with_root(root)?;
        info!(height, lifetime = key.number_signatures(), "XMSS keypair ready");
        Ok(Self { key, bds })
    }

    fn advance_bds(&mut self, leaf_idx: u64) {
        let ctx = self.key.tree_context();
        self.bds.round(&ctx, leaf_idx);
        self.bds.update_treehashes(&ctx);
    }
}

impl XmssSigner for XmssFast {
    fn key(&self) -> &XmssKey {
        &self.key
    }

    fn sign(&mut self, message: &[u8]) -> Result<Vec<u8>> {
        let leaf = self.key.cursor_mut().claim()?;
        let index = u64::from(leaf.index());
        debug!(index, "signing with BDS auth path");

        let signature = self.key.sign_leaf(leaf, message, self.bds.auth_path());
        if index < self.key.number_signatures() - 1 {
            self.advance_bds(index);
        }
        Ok(signature)
    }

    /// Replays one BDS round per skipped leaf, O((new - old) h) hashes.
    fn set_index(&mut self, new_index: u32) -> Result<()> {
        let target = u64::from(new_index);
        self.key.cursor().validate_jump(target)?;

        let from = self.key.cursor().position();
        info!(from, to = target, "advancing XMSS index");
        for leaf_idx in from..target {
            self.advance_bds(leaf_idx);
        }
        self.key.cursor_mut().advance_to(target)
    }
}
