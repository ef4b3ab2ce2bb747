//! Error types for fieldpack operations

use alloc::string::String;

/// Broad classification of a [`PackError`]
///
/// Every error variant falls into exactly one of these categories, so callers
/// that only care about the class of failure (bad format vs. bad value vs.
/// bad buffer) can match on [`PackError::kind`] instead of every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The format string itself is malformed
    Format,
    /// The number of supplied values does not match the format
    Arity,
    /// A value has the wrong category for its field
    Type,
    /// A value is out of the representable range of its field
    Range,
    /// A source or destination buffer has the wrong size
    Buffer,
}

/// Errors that can occur while parsing formats or packing/unpacking values
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq)]
pub enum PackError {
    /// Unrecognized type code in the format string
    #[cfg_attr(feature = "std", error("bad char {0:?} in format string"))]
    BadFormatChar(char),

    /// A repeat count at the end of the format with no type code after it
    #[cfg_attr(feature = "std", error("repeat count given without type code"))]
    DanglingCount,

    /// A repeat count too large to represent
    #[cfg_attr(feature = "std", error("repeat count overflows"))]
    CountOverflow,

    /// A native-only type code used outside the default `@` mode
    #[cfg_attr(
        feature = "std",
        error("type code '{0}' only available in native-aligned mode")
    )]
    NativeOnly(char),

    /// Total format size exceeds the maximum allowed
    #[cfg_attr(feature = "std", error("format size {0} exceeds maximum {1}"))]
    FormatTooLarge(usize, usize),

    /// Iterative unpacking over a format that encodes zero bytes
    #[cfg_attr(feature = "std", error("cannot iterate over a zero-sized format"))]
    ZeroSizedFormat,

    /// Value count mismatch
    #[cfg_attr(feature = "std", error("format expects {expected} values, got {actual}"))]
    ArityMismatch {
        /// Number of values the format produces/consumes.
        expected: usize,
        /// Number of values actually supplied.
        actual: usize,
    },

    /// Wrong value category for a field
    #[cfg_attr(
        feature = "std",
        error("field '{code}' requires a {expected} value, got {actual}")
    )]
    WrongType {
        /// Type code of the offending field.
        code: char,
        /// Value category the field requires.
        expected: &'static str,
        /// Category of the value actually supplied.
        actual: &'static str,
    },

    /// Numeric value outside the representable range of its field
    #[cfg_attr(feature = "std", error("value {value} out of range for field '{code}'"))]
    OutOfRange {
        /// Type code of the offending field.
        code: char,
        /// Display form of the rejected value.
        value: String,
    },

    /// Bytes value longer than its fixed-length field
    #[cfg_attr(
        feature = "std",
        error("bytes value of {actual} bytes too long for {declared}-byte field '{code}'")
    )]
    BytesTooLong {
        /// Type code of the offending field.
        code: char,
        /// Declared field length in bytes.
        declared: usize,
        /// Length of the value actually supplied.
        actual: usize,
    },

    /// Destination or source buffer smaller than the encoded size
    #[cfg_attr(
        feature = "std",
        error("buffer too small: need {needed} bytes, have {available}")
    )]
    BufferTooSmall {
        /// Bytes required by the format.
        needed: usize,
        /// Bytes available in the buffer (past the offset, if any).
        available: usize,
    },

    /// Source buffer not exactly the encoded size (strict unpack)
    #[cfg_attr(
        feature = "std",
        error("unpack requires a buffer of exactly {expected} bytes, got {actual}")
    )]
    SizeMismatch {
        /// Encoded size of the format.
        expected: usize,
        /// Length of the buffer actually supplied.
        actual: usize,
    },

    /// Source buffer not an exact multiple of the record size (iteration)
    #[cfg_attr(
        feature = "std",
        error("buffer length {len} is not a multiple of record size {record}")
    )]
    NotMultipleOf {
        /// Length of the buffer supplied.
        len: usize,
        /// Encoded size of one record.
        record: usize,
    },
}

impl PackError {
    /// Classify this error into the five-way taxonomy
    pub const fn kind(&self) -> ErrorKind {
        match self {
            PackError::BadFormatChar(_)
            | PackError::DanglingCount
            | PackError::CountOverflow
            | PackError::NativeOnly(_)
            | PackError::FormatTooLarge(_, _)
            | PackError::ZeroSizedFormat => ErrorKind::Format,
            PackError::ArityMismatch { .. } => ErrorKind::Arity,
            PackError::WrongType { .. } => ErrorKind::Type,
            PackError::OutOfRange { .. } | PackError::BytesTooLong { .. } => ErrorKind::Range,
            PackError::BufferTooSmall { .. }
            | PackError::SizeMismatch { .. }
            | PackError::NotMultipleOf { .. } => ErrorKind::Buffer,
        }
    }
}
