//! Name and fuse codecs.

pub mod fuses;
pub use fuses::{DecodedFuses, FuseInput, FuseScope, NamedFuse, decode_fuses, encode_fuses};

mod labels;
pub use labels::{decode_labelhash, encode_labelhash, is_encoded_labelhash, labelhash, namehash};

mod wire;
pub use wire::{name_to_wire, name_to_wire_strict, wire_to_name};
