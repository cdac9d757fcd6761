// XMSS engine: WOTS+ leaves, Merkle trees, BDS traversal and the stateful signers
//
// Two signers share key derivation and the signature layout: `XmssFast`
// keeps BDS state between signatures, `XmssBasic` recomputes the tree.

pub mod basic;
pub(crate) mod bds;
pub mod config;
pub mod conversions;
pub mod cursor;
pub mod fast;
pub mod hash;
pub mod hash_address;
pub mod key;
pub mod signature;
pub(crate) mod tree;
pub mod verify;
pub mod wots;

pub use basic::XmssBasic;
pub use config::{get_height_from_sig_size, XmssConfig, XmssParams};
pub use conversions::TypeConverter;
pub use cursor::{LeafCursor, OneTimeLeaf};
pub use fast::XmssFast;
pub use key::{XmssKey, XmssSigner};
pub use verify::{verify, verify_with_w};
