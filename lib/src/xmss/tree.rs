// Merkle helpers: L-tree compression, leaf generation, full trees and auth path validation

use crate::hashing::HashFunction;
use crate::xmss::hash::{hash_h, Node};
use crate::xmss::hash_address::{HashAddress, ADDR_TYPE_HASHTREE, ADDR_TYPE_LTREE};
use crate::xmss::wots::{WotsParams, WotsSecretKey};

/// Compress a WOTS+ public key to one node. An unpaired last node is carried
/// up to the next level unchanged.
pub(crate) fn l_tree(
    hash_fn: HashFunction,
    mut pk: Vec<Node>,
    pub_seed: &Node,
    addr: &mut HashAddress,
) -> Node {
    let mut l = pk.len();
    let mut height = 0u32;
    addr.set_tree_height(height);

    while l > 1 {
        for i in 0..l / 2 {
            addr.set_tree_index(i as u32);
            pk[i] = hash_h(hash_fn, &pk[2 * i], &pk[2 * i + 1], pub_seed, addr);
        }
        if l % 2 == 1 {
            pk[l / 2] = pk[l - 1];
            l = l / 2 + 1;
        } else {
            l /= 2;
        }
        height += 1;
        addr.set_tree_height(height);
    }
    pk.first().copied().unwrap_or_default()
}

/// Root of the subtree that authenticates `leaf` at `leaf_idx`
pub(crate) fn validate_authpath(
    hash_fn: HashFunction,
    leaf: &Node,
    leaf_idx: u64,
    auth_path: &[Node],
    pub_seed: &Node,
    addr: &mut HashAddress,
) -> Node {
    let mut node = *leaf;
    let mut idx = leaf_idx;
    for (height, sibling) in auth_path.iter().enumerate() {
        addr.set_tree_height(height as u32);
        addr.set_tree_index((idx >> 1) as u32);
        node = if idx & 1 == 1 {
            hash_h(hash_fn, sibling, &node, pub_seed, addr)
        } else {
            hash_h(hash_fn, &node, sibling, pub_seed, addr)
        };
        idx >>= 1;
    }
    node
}

/// Everything needed to recompute leaves and inner nodes of one key's tree
#[derive(Clone, Copy)]
pub(crate) struct TreeContext<'a> {
    pub hash_fn: HashFunction,
    pub wots: WotsParams,
    pub sk_seed: &'a Node,
    pub pub_seed: &'a Node,
}

impl<'a> TreeContext<'a> {
    /// WOTS+ public key of leaf `idx`, compressed by the L-tree
    pub fn leaf(&self, idx: u64) -> Node {
        let wots = WotsSecretKey::derive(self.hash_fn, self.wots, self.sk_seed, self.pub_seed, idx as u32);
        let mut ltree_addr = HashAddress::with_type(ADDR_TYPE_LTREE);
        ltree_addr.set_ltree(idx as u32);
        l_tree(self.hash_fn, wots.public_key(), self.pub_seed, &mut ltree_addr)
    }

    /// Parent at `height + 1`, `index` counting nodes of that parent level
    pub fn node(&self, left: &Node, right: &Node, height: u32, index: u64) -> Node {
        let mut node_addr = HashAddress::with_type(ADDR_TYPE_HASHTREE);
        node_addr.set_tree_height(height);
        node_addr.set_tree_index(index as u32);
        hash_h(self.hash_fn, left, right, self.pub_seed, &mut node_addr)
    }
}

/// Heap-ordered full tree: root at 1, leaves at `2^height + i`. Slot 0 unused.
pub(crate) fn build_full_tree(ctx: &TreeContext<'_>, height: u32) -> Vec<Node> {
    let leaves = 1usize << height;
    let mut tree = vec![[0u8; 32]; 2 * leaves];
    for i in 0..leaves {
        tree[leaves + i] = ctx.leaf(i as u64);
    }

    let mut width = leaves;
    let mut level = 0u32;
    while width > 1 {
        for j in (0..width).step_by(2) {
            tree[width / 2 + j / 2] =
                ctx.node(&tree[width + j], &tree[width + j + 1], level, (j / 2) as u64);
        }
        width /= 2;
        level += 1;
    }
    tree
}

/// Sibling of every node on the path from `leaf_idx` to the root
pub(crate) fn auth_path_from_tree(tree: &[Node], height: u32, leaf_idx: u64) -> Vec<Node> {
    let leaves = 1usize << height;
    (0..height as usize)
        .map(|i| tree[(leaves >> i) + (((leaf_idx as usize) >> i) ^ 1)])
        .collect()
}
