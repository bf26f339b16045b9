//! Packstream module: Binary value serialization for the Bolt protocol
//!
//! Values are packed into marker-prefixed big-endian byte sequences.
//! Structures carry a one-byte signature and are turned into graph
//! primitives by [`hydrate`].

mod error;
mod hydrate;
mod packer;
mod unpacker;
mod value;

pub use error::PackError;
pub use hydrate::{dehydrate, hydrate};
pub use packer::{pack, pack_struct_header};
pub use unpacker::{unpack, MAX_DEPTH};
pub use value::PackValue;
