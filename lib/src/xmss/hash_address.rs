// Eight-word hash address (ADRS) that domain-separates every keyed hash call

/// Address type tags stored in word 3
pub const ADDR_TYPE_OTS: u32 = 0;
pub const ADDR_TYPE_LTREE: u32 = 1;
pub const ADDR_TYPE_HASHTREE: u32 = 2;

/// Word layout:
///
/// ```text
/// [0] layer  [1..3] tree  [3] type
/// [4] ots / ltree index     (OTS, L-tree)   | padding (hash tree)
/// [5] chain / tree height
/// [6] hash / tree index
/// [7] key-and-mask
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashAddress([u32; 8]);

impl HashAddress {
    /// Zero layer/tree words with the given type tag
    pub fn with_type(addr_type: u32) -> Self {
        let mut addr = Self::default();
        addr.set_type(addr_type);
        addr
    }

    pub fn set_layer(&mut self, layer: u32) {
        self.0[0] = layer;
    }

    pub fn set_tree(&mut self, tree: u64) {
        self.0[1] = (tree >> 32) as u32;
        self.0[2] = tree as u32;
    }

    /// Changing the type clears the trailing type-specific words
    pub fn set_type(&mut self, addr_type: u32) {
        self.0[3] = addr_type;
        self.0[4..].fill(0);
    }

    pub fn set_ots(&mut self, ots: u32) {
        self.0[4] = ots;
    }

    pub fn set_ltree(&mut self, ltree: u32) {
        self.0[4] = ltree;
    }

    pub fn set_chain(&mut self, chain: u32) {
        self.0[5] = chain;
    }

    pub fn set_tree_height(&mut self, height: u32) {
        self.0[5] = height;
    }

    pub fn set_hash(&mut self, hash: u32) {
        self.0[6] = hash;
    }

    pub fn set_tree_index(&mut self, index: u32) {
        self.0[6] = index;
    }

    pub fn set_key_and_mask(&mut self, key_and_mask: u32) {
        self.0[7] = key_and_mask;
    }

    pub fn words(&self) -> &[u32; 8] {
        &self.0
    }

    /// Big-endian serialization, 4 bytes per word
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.0.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }
}
