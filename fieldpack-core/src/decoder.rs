//! Value decoding (strict mode)
//!
//! `unpack` demands an exact-length buffer; `unpack_from` demands at least
//! `size` bytes past the offset and consumes exactly `size`. Once the length
//! check has passed, decoding itself cannot fail: every bit pattern is a
//! valid value for its field.

use crate::error::PackError;
use crate::float16;
use crate::types::{FieldKind, FormatSpec, Value};
use alloc::vec::Vec;
use bytes::Bytes;

#[cfg(feature = "logging")]
use tracing::debug;

/// Decode one record from a buffer of exactly `spec.size` bytes
pub fn unpack_spec(spec: &FormatSpec, buf: &[u8]) -> Result<Vec<Value>, PackError> {
    if buf.len() != spec.size {
        return Err(PackError::SizeMismatch {
            expected: spec.size,
            actual: buf.len(),
        });
    }
    Ok(decode_exact(spec, buf))
}

/// Decode one record starting at `offset`, ignoring any trailing bytes
pub fn unpack_from_spec(
    spec: &FormatSpec,
    buf: &[u8],
    offset: usize,
) -> Result<Vec<Value>, PackError> {
    let available = buf.len().saturating_sub(offset);
    if available < spec.size {
        return Err(PackError::BufferTooSmall {
            needed: spec.size,
            available,
        });
    }
    Ok(decode_exact(spec, &buf[offset..offset + spec.size]))
}

/// Decode a record from a slice already known to be exactly `spec.size` long
fn decode_exact(spec: &FormatSpec, buf: &[u8]) -> Vec<Value> {
    debug_assert_eq!(buf.len(), spec.size);

    let le = spec.mode.is_little_endian();
    let mut out = Vec::with_capacity(spec.arity);
    let mut pos = 0usize;

    for field in &spec.fields {
        let align = field.kind.align(spec.mode);
        pos += (align - pos % align) % align;

        match field.kind {
            FieldKind::Pad => pos += field.count,

            FieldKind::Bytes => {
                out.push(Value::Bytes(Bytes::copy_from_slice(
                    &buf[pos..pos + field.count],
                )));
                pos += field.count;
            }

            FieldKind::Pascal => {
                if field.count == 0 {
                    out.push(Value::Bytes(Bytes::new()));
                } else {
                    // Length prefix may claim more than the field holds;
                    // clamp to the declared capacity.
                    let len = (buf[pos] as usize).min(field.count - 1);
                    out.push(Value::Bytes(Bytes::copy_from_slice(
                        &buf[pos + 1..pos + 1 + len],
                    )));
                }
                pos += field.count;
            }

            _ => {
                let width = field.kind.size(spec.mode);
                for _ in 0..field.count {
                    out.push(read_scalar(field.kind, &buf[pos..pos + width], le));
                    pos += width;
                }
            }
        }
    }

    out
}

fn read_scalar(kind: FieldKind, bytes: &[u8], le: bool) -> Value {
    match kind {
        FieldKind::Char => Value::Bytes(Bytes::copy_from_slice(bytes)),
        FieldKind::Bool => Value::Bool(bytes[0] != 0),
        FieldKind::F16 => {
            Value::Float(float16::bits_to_f32(read_uint(bytes, le) as u16) as f64)
        }
        FieldKind::F32 => Value::Float(f32::from_bits(read_uint(bytes, le) as u32) as f64),
        FieldKind::F64 => Value::Float(f64::from_bits(read_uint(bytes, le))),
        _ => {
            let raw = read_uint(bytes, le);
            if kind.signed() {
                Value::Int(sign_extend(raw, bytes.len() as u32 * 8))
            } else {
                Value::Uint(raw)
            }
        }
    }
}

fn read_uint(bytes: &[u8], le: bool) -> u64 {
    let mut v = 0u64;
    if le {
        for &b in bytes.iter().rev() {
            v = (v << 8) | b as u64;
        }
    } else {
        for &b in bytes {
            v = (v << 8) | b as u64;
        }
    }
    v
}

fn sign_extend(raw: u64, bits: u32) -> i64 {
    ((raw << (64 - bits)) as i64) >> (64 - bits)
}

/// Lazy record iterator over a buffer of back-to-back records
///
/// Validated up front: the format must encode at least one byte and the
/// buffer length must be an exact multiple of the record size, so iteration
/// itself never fails. Each call to the constructor gives a fresh iterator.
#[derive(Debug)]
pub struct UnpackIter<'b> {
    spec: FormatSpec,
    buf: &'b [u8],
    pos: usize,
}

impl<'b> UnpackIter<'b> {
    /// Build an iterator over `buf`, one record of `spec` per chunk
    pub fn new(spec: FormatSpec, buf: &'b [u8]) -> Result<Self, PackError> {
        if spec.size == 0 {
            return Err(PackError::ZeroSizedFormat);
        }
        if buf.len() % spec.size != 0 {
            return Err(PackError::NotMultipleOf {
                len: buf.len(),
                record: spec.size,
            });
        }

        #[cfg(feature = "logging")]
        debug!(
            "Iterating {} records of {} bytes",
            buf.len() / spec.size,
            spec.size
        );

        Ok(Self { spec, buf, pos: 0 })
    }
}

impl Iterator for UnpackIter<'_> {
    type Item = Vec<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.buf.len() {
            return None;
        }
        let chunk = &self.buf[self.pos..self.pos + self.spec.size];
        self.pos += self.spec.size;
        Some(decode_exact(&self.spec, chunk))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.buf.len() - self.pos) / self.spec.size;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for UnpackIter<'_> {}
