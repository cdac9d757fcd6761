// Leaf cursor: the only way to obtain the next one-time leaf of a key

use crate::error::{QrlError, Result};
use crate::hashing::HashFunction;
use crate::xmss::hash::Node;
use crate::xmss::wots::{WotsParams, WotsSecretKey};

/// Position of the next unused leaf.
///
/// Neither `Clone` nor `Copy`: a duplicated cursor would hand out the same
/// leaf twice.
#[derive(Debug)]
pub struct LeafCursor {
    next: u64,
    lifetime: u64,
}

/// A claimed leaf index. Move-only; consumed when its WOTS+ key is derived.
#[derive(Debug)]
pub struct OneTimeLeaf {
    index: u32,
}

impl LeafCursor {
    pub(crate) fn new(lifetime: u64) -> Self {
        Self { next: 0, lifetime }
    }

    pub fn position(&self) -> u64 {
        self.next
    }

    pub fn lifetime(&self) -> u64 {
        self.lifetime
    }

    pub fn remaining(&self) -> u64 {
        self.lifetime - self.next
    }

    pub fn is_exhausted(&self) -> bool {
        self.next >= self.lifetime
    }

    /// Take the current leaf and move past it
    ///
    /// Postconditions:
    /// - Returns the leaf at `position()` and increments the position
    /// - Returns Err(Exhausted) once all `lifetime` leaves are claimed
    pub fn claim(&mut self) -> Result<OneTimeLeaf> {
        if self.is_exhausted() {
            return Err(QrlError::Exhausted {
                signatures: self.lifetime,
            });
        }
        let leaf = OneTimeLeaf {
            index: self.next as u32,
        };
        self.next += 1;
        Ok(leaf)
    }

    /// Check a forward jump without moving
    ///
    /// Preconditions:
    /// - target < lifetime
    /// - target >= position() (leaves below the position may already be used)
    pub fn validate_jump(&self, target: u64) -> Result<()> {
        if target >= self.lifetime {
            return Err(QrlError::IndexOutOfRange {
                index: target,
                reason: format!("index too high, lifetime is {}", self.lifetime),
            });
        }
        if target < self.next {
            return Err(QrlError::IndexOutOfRange {
                index: target,
                reason: format!("cannot rewind below {}", self.next),
            });
        }
        Ok(())
    }

    pub(crate) fn advance_to(&mut self, target: u64) -> Result<()> {
        self.validate_jump(target)?;
        self.next = target;
        Ok(())
    }
}

impl OneTimeLeaf {
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Spend the leaf on its WOTS+ key
    pub fn into_wots_key(
        self,
        hash_fn: HashFunction,
        params: WotsParams,
        sk_seed: &Node,
        pub_seed: &Node,
    ) -> WotsSecretKey {
        WotsSecretKey::derive(hash_fn, params, sk_seed, pub_seed, self.index)
    }
}
