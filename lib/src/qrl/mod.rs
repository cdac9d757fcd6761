// QRL framing around XMSS keys: descriptors and addresses

pub mod address;
pub mod descriptor;

pub use address::{address_from_pk, address_is_valid, ADDRESS_SIZE};
pub use descriptor::{AddrFormatType, QrlDescriptor, SignatureType};
