//! # Fieldpack Core
//!
//! A binary struct codec: a compact format string describes a sequence of
//! typed fields with a byte order and alignment mode, and the engine packs
//! value tuples into bytes and unpacks them back.
//!
//! ## Modules
//!
//! - `constants`: Format limits and widths
//! - `types`: Core types (Mode, FieldKind, FormatSpec, Value)
//! - `error`: Error taxonomy
//! - `parser`: Format string parsing
//! - `encoder`: Strict value encoding
//! - `decoder`: Strict value decoding and record iteration
//! - `compiled`: Reusable compiled-format handle

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod compiled;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
mod float16;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use compiled::CompiledFormat;
pub use decoder::UnpackIter;
pub use error::{ErrorKind, PackError};
pub use types::{FieldDescriptor, FieldKind, FormatSpec, Mode, Value};

use alloc::vec::Vec;
use bytes::Bytes;

/// Result type alias for fieldpack operations
pub type Result<T> = core::result::Result<T, PackError>;

/// Compute the encoded size of a format string
///
/// The convenience path: parses the format on every call. Use
/// [`CompiledFormat`] to parse once and reuse.
pub fn calcsize(format: &str) -> Result<usize> {
    Ok(parser::parse(format)?.size)
}

/// Encode one record of values per a format string
pub fn pack(format: &str, values: &[Value]) -> Result<Bytes> {
    encoder::pack_spec(&parser::parse(format)?, values)
}

/// Encode one record into `buf` at `offset` per a format string
pub fn pack_into(format: &str, buf: &mut [u8], offset: usize, values: &[Value]) -> Result<()> {
    encoder::pack_into_spec(&parser::parse(format)?, buf, offset, values)
}

/// Decode one record from an exact-length buffer per a format string
pub fn unpack(format: &str, buf: &[u8]) -> Result<Vec<Value>> {
    decoder::unpack_spec(&parser::parse(format)?, buf)
}

/// Decode one record starting at `offset` per a format string
pub fn unpack_from(format: &str, buf: &[u8], offset: usize) -> Result<Vec<Value>> {
    decoder::unpack_from_spec(&parser::parse(format)?, buf, offset)
}

/// Iterate over back-to-back records in `buf` per a format string
pub fn iter_unpack<'b>(format: &str, buf: &'b [u8]) -> Result<UnpackIter<'b>> {
    UnpackIter::new(parser::parse(format)?, buf)
}
