// XMSS signer that rebuilds the whole tree for every signature

use crate::error::Result;
use crate::hashing::HashFunction;
use crate::qrl::descriptor::{AddrFormatType, QrlDescriptor, SEED_SIZE};
use crate::xmss::config::XmssConfig;
use crate::xmss::key::{XmssKey, XmssSigner};
use crate::xmss::tree::{auth_path_from_tree, build_full_tree};
use crate::xmss::wots::DEFAULT_WOTS_W;
use tracing::{debug, info};

/// Same keys and signatures as [`crate::xmss::fast::XmssFast`], with no
/// traversal state: each `sign` costs 2^h leaf computations.
#[derive(Debug)]
pub struct XmssBasic {
    key: XmssKey,
}

impl XmssBasic {
    /// Preconditions:
    /// - seed.len() == 48
    /// - height is even, 4 <= height <= 30
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
        info!(height, hash = hash_function.name(), "generating XMSS keypair (full tree)");
        let key = XmssKey::derive(seed, height, hash_function, address_format, wots_w)?;
        let tree = build_full_tree(&key.tree_context(), u32::from(height));
        let root = tree[1];
        Ok(Self {
            key: key.with_root(root)?,
        })
    }
}

impl XmssSigner for XmssBasic {
    fn key(&self) -> &XmssKey {
        &self.key
    }

    fn sign(&mut self, message: &[u8]) -> Result<Vec<u8>> {
        let leaf = self.key.cursor_mut().claim()?;
        let height = u32::from(self.key.height());
        debug!(index = leaf.index(), "signing with recomputed auth path");

        let tree = build_full_tree(&self.key.tree_context(), height);
        let auth_path = auth_path_from_tree(&tree, height, u64::from(leaf.index()));
        Ok(self.key.sign_leaf(leaf, message, &auth_path))
    }

    fn set_index(&mut self, new_index: u32) -> Result<()> {
        info!(from = self.key.index(), to = new_index, "advancing XMSS index");
        self.key.cursor_mut().advance_to(u64::from(new_index))
    }
}
