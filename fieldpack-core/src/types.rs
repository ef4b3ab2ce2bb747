//! Core types for compiled formats and dynamic values

use crate::constants::POINTER_WIDTH;
use alloc::vec::Vec;
use bytes::Bytes;
use core::mem::align_of;
use serde::{Deserialize, Serialize};

/// Byte order and alignment mode of a format
///
/// Selected by the optional first character of the format string. Only
/// [`Mode::NativeAligned`] inserts alignment padding, uses native sizes for
/// `l`/`L`, and permits pointer-sized type codes; `=` keeps native byte
/// order but standard sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// `@` (default): native byte order, natural alignment padding
    NativeAligned,
    /// `=`: native byte order, no padding
    NativePacked,
    /// `<`: little-endian, no padding
    LittleEndian,
    /// `>` and `!`: big-endian, no padding
    BigEndian,
}

impl Mode {
    /// Map a format prefix character to a mode, if it is one
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            '@' => Some(Mode::NativeAligned),
            '=' => Some(Mode::NativePacked),
            '<' => Some(Mode::LittleEndian),
            '>' | '!' => Some(Mode::BigEndian),
            _ => None,
        }
    }

    /// Whether this mode uses native sizes (and permits native-only codes)
    ///
    /// True only for `@`; `=` shares the native byte order but sticks to the
    /// standard sizes, like the explicit-endian modes.
    pub const fn uses_native_sizes(&self) -> bool {
        matches!(self, Mode::NativeAligned)
    }

    /// Whether alignment padding is inserted between fields
    pub const fn is_aligned(&self) -> bool {
        matches!(self, Mode::NativeAligned)
    }

    /// Whether multi-byte values are encoded little-endian
    pub const fn is_little_endian(&self) -> bool {
        match self {
            Mode::LittleEndian => true,
            Mode::BigEndian => false,
            Mode::NativeAligned | Mode::NativePacked => cfg!(target_endian = "little"),
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::NativeAligned
    }
}

/// Field type tag, one per format type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// `x`: pad byte, no value
    Pad,
    /// `c`: single byte, decoded as a one-byte bytes value
    Char,
    /// `?`: one-byte boolean
    Bool,
    /// `b`: signed 8-bit integer
    I8,
    /// `B`: unsigned 8-bit integer
    U8,
    /// `h`: signed 16-bit integer
    I16,
    /// `H`: unsigned 16-bit integer
    U16,
    /// `i`: signed 32-bit integer
    I32,
    /// `I`: unsigned 32-bit integer
    U32,
    /// `l`: signed C long (4 bytes standard, pointer width under `@`)
    Long,
    /// `L`: unsigned C long (4 bytes standard, pointer width under `@`)
    Ulong,
    /// `q`: signed 64-bit integer
    I64,
    /// `Q`: unsigned 64-bit integer
    U64,
    /// `n`: signed pointer-width integer, native only
    Ssize,
    /// `N`: unsigned pointer-width integer, native only
    Size,
    /// `P`: raw pointer value, native only
    Ptr,
    /// `e`: IEEE-754 binary16 float
    F16,
    /// `f`: IEEE-754 binary32 float
    F32,
    /// `d`: IEEE-754 binary64 float
    F64,
    /// `s`: fixed-length byte string (count is the length)
    Bytes,
    /// `p`: Pascal string, one-byte length prefix (count is the field length)
    Pascal,
}

impl FieldKind {
    /// Map a type code character to a kind, if it is one
    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'x' => Some(FieldKind::Pad),
            'c' => Some(FieldKind::Char),
            '?' => Some(FieldKind::Bool),
            'b' => Some(FieldKind::I8),
            'B' => Some(FieldKind::U8),
            'h' => Some(FieldKind::I16),
            'H' => Some(FieldKind::U16),
            'i' => Some(FieldKind::I32),
            'I' => Some(FieldKind::U32),
            'l' => Some(FieldKind::Long),
            'L' => Some(FieldKind::Ulong),
            'q' => Some(FieldKind::I64),
            'Q' => Some(FieldKind::U64),
            'n' => Some(FieldKind::Ssize),
            'N' => Some(FieldKind::Size),
            'P' => Some(FieldKind::Ptr),
            'e' => Some(FieldKind::F16),
            'f' => Some(FieldKind::F32),
            'd' => Some(FieldKind::F64),
            's' => Some(FieldKind::Bytes),
            'p' => Some(FieldKind::Pascal),
            _ => None,
        }
    }

    /// The format type code for this kind
    pub const fn code(&self) -> char {
        match self {
            FieldKind::Pad => 'x',
            FieldKind::Char => 'c',
            FieldKind::Bool => '?',
            FieldKind::I8 => 'b',
            FieldKind::U8 => 'B',
            FieldKind::I16 => 'h',
            FieldKind::U16 => 'H',
            FieldKind::I32 => 'i',
            FieldKind::U32 => 'I',
            FieldKind::Long => 'l',
            FieldKind::Ulong => 'L',
            FieldKind::I64 => 'q',
            FieldKind::U64 => 'Q',
            FieldKind::Ssize => 'n',
            FieldKind::Size => 'N',
            FieldKind::Ptr => 'P',
            FieldKind::F16 => 'e',
            FieldKind::F32 => 'f',
            FieldKind::F64 => 'd',
            FieldKind::Bytes => 's',
            FieldKind::Pascal => 'p',
        }
    }

    /// Size in bytes of one element of this kind under the given mode
    ///
    /// For `s` and `p` this is the per-byte element size (1); the field
    /// length is the repeat count.
    pub fn size(&self, mode: Mode) -> usize {
        match self {
            FieldKind::Pad
            | FieldKind::Char
            | FieldKind::Bool
            | FieldKind::I8
            | FieldKind::U8
            | FieldKind::Bytes
            | FieldKind::Pascal => 1,
            FieldKind::I16 | FieldKind::U16 | FieldKind::F16 => 2,
            FieldKind::I32 | FieldKind::U32 | FieldKind::F32 => 4,
            FieldKind::I64 | FieldKind::U64 | FieldKind::F64 => 8,
            FieldKind::Long | FieldKind::Ulong => {
                if mode.uses_native_sizes() {
                    POINTER_WIDTH
                } else {
                    4
                }
            }
            FieldKind::Ssize | FieldKind::Size | FieldKind::Ptr => POINTER_WIDTH,
        }
    }

    /// Natural alignment of this kind under the given mode
    ///
    /// 1 everywhere except [`Mode::NativeAligned`], where it follows the
    /// platform ABI via `align_of` of the corresponding Rust type.
    pub fn align(&self, mode: Mode) -> usize {
        if !mode.is_aligned() {
            return 1;
        }
        match self {
            FieldKind::I16 | FieldKind::U16 | FieldKind::F16 => align_of::<u16>(),
            FieldKind::I32 | FieldKind::U32 => align_of::<u32>(),
            FieldKind::F32 => align_of::<f32>(),
            FieldKind::I64 | FieldKind::U64 => align_of::<u64>(),
            FieldKind::F64 => align_of::<f64>(),
            FieldKind::Long | FieldKind::Ulong => align_of::<isize>(),
            FieldKind::Ssize | FieldKind::Size | FieldKind::Ptr => align_of::<usize>(),
            _ => 1,
        }
    }

    /// Whether this code is only valid in the default native-aligned mode
    pub const fn native_only(&self) -> bool {
        matches!(self, FieldKind::Ssize | FieldKind::Size | FieldKind::Ptr)
    }

    /// Whether the repeat count is a byte length rather than an element count
    pub const fn counts_bytes(&self) -> bool {
        matches!(self, FieldKind::Bytes | FieldKind::Pascal)
    }

    /// Whether fields of this kind are signed integers
    pub const fn signed(&self) -> bool {
        matches!(
            self,
            FieldKind::I8
                | FieldKind::I16
                | FieldKind::I32
                | FieldKind::I64
                | FieldKind::Long
                | FieldKind::Ssize
        )
    }

    /// Value category this kind produces and consumes, for error messages
    pub const fn category(&self) -> &'static str {
        match self {
            FieldKind::Pad => "no",
            FieldKind::Bool => "bool",
            FieldKind::F16 | FieldKind::F32 | FieldKind::F64 => "float",
            FieldKind::Char | FieldKind::Bytes | FieldKind::Pascal => "bytes",
            _ => "integer",
        }
    }

    /// Number of values produced/consumed by a field of this kind with the
    /// given count
    pub const fn arity(&self, count: usize) -> usize {
        match self {
            FieldKind::Pad => 0,
            FieldKind::Bytes | FieldKind::Pascal => 1,
            _ => count,
        }
    }
}

/// One parsed field of a format string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Type code this descriptor was parsed from
    pub code: char,

    /// Field type tag
    pub kind: FieldKind,

    /// Repeat count, or byte length for `s`/`p`
    pub count: usize,
}

impl FieldDescriptor {
    /// Total encoded size of this field under the given mode, excluding any
    /// alignment padding before it
    pub fn size(&self, mode: Mode) -> usize {
        if self.kind.counts_bytes() {
            self.count
        } else {
            self.kind.size(mode) * self.count
        }
    }

    /// Number of values this field produces/consumes
    pub fn arity(&self) -> usize {
        self.kind.arity(self.count)
    }
}

/// A compiled format: mode, ordered fields, and derived totals
///
/// Immutable once parsed; safe to share across threads and reuse for any
/// number of encode/decode calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSpec {
    /// Byte order / alignment mode
    pub mode: Mode,

    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,

    /// Total encoded size in bytes, including alignment padding
    pub size: usize,

    /// Number of values one record produces/consumes
    pub arity: usize,
}

impl FormatSpec {
    /// Parse a format string; shorthand for [`crate::parser::parse`]
    pub fn parse(format: &str) -> Result<Self, crate::error::PackError> {
        crate::parser::parse(format)
    }
}

/// A dynamic value, the tuple element type for pack/unpack
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    Uint(u64),
    /// Floating-point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Byte string
    Bytes(Bytes),
}

impl Value {
    /// Category name of this value, for error messages
    pub const fn category(&self) -> &'static str {
        match self {
            Value::Int(_) | Value::Uint(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Bytes(_) => "bytes",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(v))
    }
}
