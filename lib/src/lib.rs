pub mod codec;
pub mod error;
pub mod hashing;
pub mod mnemonic;
pub mod qrl;
pub mod seed;
pub mod xmss;

// Re-export main types
pub use error::{QrlError, Result};
pub use hashing::HashFunction;
pub use qrl::{AddrFormatType, QrlDescriptor};
pub use xmss::{XmssBasic, XmssConfig, XmssFast, XmssSigner};
