pub mod benchmark;

// Re-export the engine crate so downstream users need a single dependency
pub use qrl_xmss_lib::*;
pub use xmss_types;
