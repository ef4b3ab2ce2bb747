//! Value encoding
//!
//! Encoding is strict: arity is checked up front, every value must match its
//! field's category and range, and oversized `s` input is an error rather
//! than a silent truncation. Only the Pascal type (`p`) truncates, to the
//! capacity implied by its declared length.

use crate::constants::PASCAL_MAX_PAYLOAD;
use crate::error::PackError;
use crate::float16;
use crate::types::{FieldDescriptor, FieldKind, FormatSpec, Value};
use alloc::format;
use bytes::{BufMut, Bytes, BytesMut};
use core::slice;

/// Encode one record of values per the compiled format
///
/// The output layout follows the spec exactly: fields in declaration order,
/// alignment padding (native-aligned mode only) and pad-byte fields written
/// as zeros, multi-byte scalars in the mode's byte order.
pub fn pack_spec(spec: &FormatSpec, values: &[Value]) -> Result<Bytes, PackError> {
    if values.len() != spec.arity {
        return Err(PackError::ArityMismatch {
            expected: spec.arity,
            actual: values.len(),
        });
    }

    let mut buf = BytesMut::with_capacity(spec.size);
    let mut pending = values.iter();
    let mut pos = 0usize;

    for field in &spec.fields {
        write_field(&mut buf, spec, field, &mut pending, &mut pos, values.len())?;
    }

    Ok(buf.freeze())
}

/// Encode one record into a caller buffer at `offset`
///
/// The record is encoded to a scratch buffer first, so the destination is
/// untouched unless every value validates and the whole write succeeds.
pub fn pack_into_spec(
    spec: &FormatSpec,
    buf: &mut [u8],
    offset: usize,
    values: &[Value],
) -> Result<(), PackError> {
    let available = buf.len().saturating_sub(offset);
    if available < spec.size {
        return Err(PackError::BufferTooSmall {
            needed: spec.size,
            available,
        });
    }

    let encoded = pack_spec(spec, values)?;
    buf[offset..offset + spec.size].copy_from_slice(&encoded);
    Ok(())
}

fn write_field<B: BufMut>(
    buf: &mut B,
    spec: &FormatSpec,
    field: &FieldDescriptor,
    pending: &mut slice::Iter<'_, Value>,
    pos: &mut usize,
    supplied: usize,
) -> Result<(), PackError> {
    let align = field.kind.align(spec.mode);
    let pad = (align - *pos % align) % align;
    buf.put_bytes(0, pad);
    *pos += pad;

    let le = spec.mode.is_little_endian();

    match field.kind {
        FieldKind::Pad => buf.put_bytes(0, field.count),

        FieldKind::Bytes => {
            let data = expect_bytes(field, next_value(spec, pending, supplied)?)?;
            if data.len() > field.count {
                return Err(PackError::BytesTooLong {
                    code: field.code,
                    declared: field.count,
                    actual: data.len(),
                });
            }
            buf.put_slice(data);
            buf.put_bytes(0, field.count - data.len());
        }

        FieldKind::Pascal => {
            let data = expect_bytes(field, next_value(spec, pending, supplied)?)?;
            if field.count > 0 {
                let capacity = (field.count - 1).min(PASCAL_MAX_PAYLOAD);
                let len = data.len().min(capacity);
                buf.put_u8(len as u8);
                buf.put_slice(&data[..len]);
                buf.put_bytes(0, field.count - 1 - len);
            }
        }

        _ => {
            for _ in 0..field.count {
                let value = next_value(spec, pending, supplied)?;
                write_scalar(buf, spec, field, value, le)?;
            }
        }
    }

    *pos += field.size(spec.mode);
    Ok(())
}

fn write_scalar<B: BufMut>(
    buf: &mut B,
    spec: &FormatSpec,
    field: &FieldDescriptor,
    value: &Value,
    le: bool,
) -> Result<(), PackError> {
    match field.kind {
        FieldKind::Char => {
            let data = expect_bytes(field, value)?;
            if data.len() != 1 {
                return Err(PackError::WrongType {
                    code: field.code,
                    expected: "one-byte bytes",
                    actual: value.category(),
                });
            }
            buf.put_u8(data[0]);
        }

        FieldKind::Bool => match value {
            Value::Bool(b) => buf.put_u8(*b as u8),
            other => {
                return Err(PackError::WrongType {
                    code: field.code,
                    expected: "bool",
                    actual: other.category(),
                })
            }
        },

        FieldKind::F16 => {
            let v = float_arg(field, value)?;
            let narrowed = v as f32;
            let bits = if v.is_finite() && narrowed.is_infinite() {
                None
            } else {
                float16::f32_to_bits(narrowed)
            };
            let bits = bits.ok_or_else(|| PackError::OutOfRange {
                code: field.code,
                value: format!("{v}"),
            })?;
            if le {
                buf.put_u16_le(bits);
            } else {
                buf.put_u16(bits);
            }
        }

        FieldKind::F32 => {
            let v = float_arg(field, value)?;
            let narrowed = v as f32;
            if v.is_finite() && narrowed.is_infinite() {
                return Err(PackError::OutOfRange {
                    code: field.code,
                    value: format!("{v}"),
                });
            }
            if le {
                buf.put_f32_le(narrowed);
            } else {
                buf.put_f32(narrowed);
            }
        }

        FieldKind::F64 => {
            let v = float_arg(field, value)?;
            if le {
                buf.put_f64_le(v);
            } else {
                buf.put_f64(v);
            }
        }

        // Every remaining kind is an integer of some width
        _ => {
            let width = field.kind.size(spec.mode);
            let raw = int_raw(field, width, value)?;
            if le {
                buf.put_uint_le(raw, width);
            } else {
                buf.put_uint(raw, width);
            }
        }
    }

    Ok(())
}

/// Convert an integer value to its two's-complement raw bits, range-checked
/// against the field's width and signedness
fn int_raw(field: &FieldDescriptor, width: usize, value: &Value) -> Result<u64, PackError> {
    let bits = width as u32 * 8;
    let umax = if bits == 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    };

    match value {
        Value::Int(i) => {
            if field.kind.signed() {
                let max = (umax >> 1) as i64;
                let min = -max - 1;
                if *i < min || *i > max {
                    return Err(out_of_range(field, i));
                }
                Ok((*i as u64) & umax)
            } else {
                if *i < 0 || (*i as u64) > umax {
                    return Err(out_of_range(field, i));
                }
                Ok(*i as u64)
            }
        }
        Value::Uint(u) => {
            let max = if field.kind.signed() { umax >> 1 } else { umax };
            if *u > max {
                return Err(out_of_range(field, u));
            }
            Ok(*u)
        }
        other => Err(PackError::WrongType {
            code: field.code,
            expected: "integer",
            actual: other.category(),
        }),
    }
}

fn float_arg(field: &FieldDescriptor, value: &Value) -> Result<f64, PackError> {
    match value {
        Value::Float(v) => Ok(*v),
        Value::Int(i) => Ok(*i as f64),
        Value::Uint(u) => Ok(*u as f64),
        other => Err(PackError::WrongType {
            code: field.code,
            expected: "float",
            actual: other.category(),
        }),
    }
}

fn expect_bytes<'v>(field: &FieldDescriptor, value: &'v Value) -> Result<&'v Bytes, PackError> {
    match value {
        Value::Bytes(data) => Ok(data),
        other => Err(PackError::WrongType {
            code: field.code,
            expected: "bytes",
            actual: other.category(),
        }),
    }
}

fn next_value<'v>(
    spec: &FormatSpec,
    pending: &mut slice::Iter<'v, Value>,
    supplied: usize,
) -> Result<&'v Value, PackError> {
    pending.next().ok_or(PackError::ArityMismatch {
        expected: spec.arity,
        actual: supplied,
    })
}

fn out_of_range<V: core::fmt::Display>(field: &FieldDescriptor, value: &V) -> PackError {
    PackError::OutOfRange {
        code: field.code,
        value: format!("{value}"),
    }
}
