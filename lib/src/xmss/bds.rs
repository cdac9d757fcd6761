// BDS tree traversal: keeps the current auth path and prepares the next one
//
// Buchmann, Dahmen and Szydlo, "Hash-based Digital Signature Schemes" (2009).
// Per round at most (h - k) / 2 leaf computations are spent on treehash
// instances, and the top k levels are served from `retain`.

use crate::xmss::config::XmssParams;
use crate::xmss::hash::Node;
use crate::xmss::tree::TreeContext;
use tracing::trace;

#[derive(Debug, Clone, Default)]
struct TreeHashInst {
    height: u32,
    next_idx: u64,
    stack_usage: u32,
    completed: bool,
    node: Node,
}

#[derive(Debug)]
pub(crate) struct BdsState {
    height: u32,
    k: u32,
    stack: Vec<Node>,
    stack_levels: Vec<u32>,
    stack_offset: usize,
    auth: Vec<Node>,
    keep: Vec<Node>,
    treehash: Vec<TreeHashInst>,
    retain: Vec<Node>,
}

impl BdsState {
    /// Run treehash over the whole tree, recording the nodes the traversal
    /// needs for leaf 0 and the retained top levels. Returns the state and the root.
    ///
    /// Preconditions:
    /// - params passed the BDS rule (k < h, h - k even)
    pub fn setup(ctx: &TreeContext<'_>, params: &XmssParams) -> (Self, Node) {
        let h = params.height;
        let k = params.k;
        let mut state = BdsState {
            height: h,
            k,
            stack: vec![Node::default(); h as usize + 1],
            stack_levels: vec![0; h as usize + 1],
            stack_offset: 0,
            auth: vec![Node::default(); h as usize],
            keep: vec![Node::default(); (h >> 1) as usize],
            treehash: (0..h - k)
                .map(|i| TreeHashInst {
                    height: i,
                    completed: true,
                    ..TreeHashInst::default()
                })
                .collect(),
            retain: vec![Node::default(); (1usize << k) - k as usize - 1],
        };

        let mut stack: Vec<(Node, u32)> = Vec::with_capacity(h as usize + 1);
        for idx in 0..(1u64 << h) {
            stack.push((ctx.leaf(idx), 0));
            while stack.len() > 1 && stack[stack.len() - 1].1 == stack[stack.len() - 2].1 {
                let (right, level) = stack[stack.len() - 1];
                let position = idx >> level;
                if position == 1 {
                    state.auth[level as usize] = right;
                } else if level < h - k && position == 3 {
                    state.treehash[level as usize].node = right;
                } else if level >= h - k {
                    let offset = state.retain_offset(level, (position - 3) >> 1);
                    state.retain[offset] = right;
                }

                stack.pop();
                let (left, _) = stack[stack.len() - 1];
                let parent = ctx.node(&left, &right, level, idx >> (level + 1));
                let last = stack.len() - 1;
                stack[last] = (parent, level + 1);
            }
        }

        let root = stack.first().map(|(node, _)| *node).unwrap_or_default();
        (state, root)
    }

    /// Auth path of the current leaf, level 0 first
    pub fn auth_path(&self) -> &[Node] {
        &self.auth
    }

    fn retain_offset(&self, level: u32, row: u64) -> usize {
        (1usize << (self.height - 1 - level)) + level as usize - self.height as usize + row as usize
    }

    /// Turn the auth path of `leaf_idx` into the auth path of `leaf_idx + 1`.
    ///
    /// Preconditions:
    /// - leaf_idx < 2^h - 1
    pub fn round(&mut self, ctx: &TreeContext<'_>, leaf_idx: u64) {
        let h = self.height;
        let k = self.k;

        // Height of the lowest left node on the path; the auth node there changes
        let tau = (0..h).find(|&i| (leaf_idx >> i) & 1 == 0).unwrap_or(h);
        if tau == h {
            return;
        }

        let pending = if tau > 0 {
            Some((
                self.auth[(tau - 1) as usize],
                self.keep[((tau - 1) >> 1) as usize],
            ))
        } else {
            None
        };

        if (leaf_idx >> (tau + 1)) & 1 == 0 && tau < h - 1 {
            self.keep[(tau >> 1) as usize] = self.auth[tau as usize];
        }

        match pending {
            None => {
                self.auth[0] = ctx.leaf(leaf_idx);
            }
            Some((left, right)) => {
                self.auth[tau as usize] = ctx.node(&left, &right, tau - 1, leaf_idx >> tau);

                for i in 0..tau {
                    self.auth[i as usize] = if i < h - k {
                        self.treehash[i as usize].node
                    } else {
                        let row = ((leaf_idx >> i) - 1) >> 1;
                        self.retain[self.retain_offset(i, row)]
                    };
                }

                for i in 0..tau.min(h - k) {
                    let start_idx = leaf_idx + 1 + 3 * (1u64 << i);
                    if start_idx < 1u64 << h {
                        let inst = &mut self.treehash[i as usize];
                        inst.height = i;
                        inst.next_idx = start_idx;
                        inst.completed = false;
                        inst.stack_usage = 0;
                    }
                }
            }
        }
        trace!(leaf_idx, tau, "bds round");
    }

    /// Spend up to (h - k) / 2 leaf computations on the instances with the
    /// lowest pending node. Returns the number of unused updates.
    pub fn update_treehashes(&mut self, ctx: &TreeContext<'_>) -> u32 {
        let h = self.height;
        let k = self.k;
        let updates = (h - k) >> 1;
        let mut used = 0;

        for _ in 0..updates {
            let mut l_min = h;
            let mut level = h - k;
            for i in 0..h - k {
                let inst = &self.treehash[i as usize];
                let low = if inst.completed {
                    h
                } else if inst.stack_usage == 0 {
                    i
                } else {
                    self.min_height_on_stack(inst)
                };
                if low < l_min {
                    level = i;
                    l_min = low;
                }
            }
            if level == h - k {
                break;
            }
            self.treehash_update(ctx, level as usize);
            used += 1;
        }
        updates - used
    }

    fn min_height_on_stack(&self, inst: &TreeHashInst) -> u32 {
        (0..inst.stack_usage as usize)
            .map(|i| self.stack_levels[self.stack_offset - i - 1])
            .fold(self.height, u32::min)
    }

    /// One leaf of progress for a treehash instance, sharing the common stack
    fn treehash_update(&mut self, ctx: &TreeContext<'_>, which: usize) {
        let next_idx = self.treehash[which].next_idx;
        let mut node = ctx.leaf(next_idx);
        let mut node_height = 0u32;

        while self.treehash[which].stack_usage > 0
            && self.stack_levels[self.stack_offset - 1] == node_height
        {
            let left = self.stack[self.stack_offset - 1];
            node = ctx.node(&left, &node, node_height, next_idx >> (node_height + 1));
            node_height += 1;
            self.treehash[which].stack_usage -= 1;
            self.stack_offset -= 1;
        }

        let inst = &mut self.treehash[which];
        if node_height == inst.height {
            inst.node = node;
            inst.completed = true;
        } else {
            self.stack[self.stack_offset] = node;
            self.stack_levels[self.stack_offset] = node_height;
            self.stack_offset += 1;
            inst.stack_usage += 1;
            inst.next_idx += 1;
        }
    }
}
