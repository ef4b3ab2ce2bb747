//! Format string parsing

use crate::constants::MAX_FORMAT_SIZE;
use crate::error::PackError;
use crate::types::{FieldDescriptor, FieldKind, FormatSpec, Mode};
use alloc::vec::Vec;

#[cfg(feature = "logging")]
use tracing::debug;

/// Parse a format string into a [`FormatSpec`]
///
/// The optional first character selects the mode (`@`, `=`, `<`, `>`, `!`);
/// the rest is a sequence of `(decimal count)(type code)` pairs. Whitespace
/// between pairs is ignored, but a count must be immediately followed by its
/// type code. The empty format is valid and has size 0.
///
/// Size and arity are accumulated with checked arithmetic and capped at
/// [`MAX_FORMAT_SIZE`], so hostile formats fail here rather than at
/// allocation time.
pub fn parse(format: &str) -> Result<FormatSpec, PackError> {
    let mut chars = format.chars().peekable();

    let mode = match chars.peek().copied().and_then(Mode::from_prefix) {
        Some(mode) => {
            chars.next();
            mode
        }
        None => Mode::default(),
    };

    let mut fields = Vec::new();
    let mut size = 0usize;
    let mut arity = 0usize;

    while let Some(c) = chars.next() {
        if c.is_ascii_whitespace() {
            continue;
        }

        // Optional decimal repeat count
        let (count, code) = if c.is_ascii_digit() {
            let mut count = (c as u8 - b'0') as usize;
            loop {
                match chars.peek().copied() {
                    Some(d) if d.is_ascii_digit() => {
                        chars.next();
                        count = count
                            .checked_mul(10)
                            .and_then(|n| n.checked_add((d as u8 - b'0') as usize))
                            .ok_or(PackError::CountOverflow)?;
                    }
                    Some(code) => break (count, code),
                    None => return Err(PackError::DanglingCount),
                }
            }
        } else {
            (1, c)
        };

        if c.is_ascii_digit() {
            // Consume the code char the count peeked at
            chars.next();
        }

        let kind = FieldKind::from_code(code).ok_or(PackError::BadFormatChar(code))?;

        if kind.native_only() && !mode.uses_native_sizes() {
            return Err(PackError::NativeOnly(code));
        }

        let descriptor = FieldDescriptor { code, kind, count };

        // Alignment applies even to zero-count fields, so "0l" can be used
        // to force alignment without adding data.
        let align = kind.align(mode);
        size = align_up(size, align).ok_or(PackError::CountOverflow)?;
        size = size
            .checked_add(field_size(&descriptor, mode)?)
            .ok_or(PackError::CountOverflow)?;

        if size > MAX_FORMAT_SIZE {
            return Err(PackError::FormatTooLarge(size, MAX_FORMAT_SIZE));
        }

        arity = arity
            .checked_add(descriptor.arity())
            .ok_or(PackError::CountOverflow)?;

        fields.push(descriptor);
    }

    #[cfg(feature = "logging")]
    debug!(
        "Parsed format {:?}: {} fields, {} bytes, arity {}",
        format,
        fields.len(),
        size,
        arity
    );

    Ok(FormatSpec {
        mode,
        fields,
        size,
        arity,
    })
}

/// Encoded size of one field, with checked multiplication
fn field_size(descriptor: &FieldDescriptor, mode: Mode) -> Result<usize, PackError> {
    if descriptor.kind.counts_bytes() {
        Ok(descriptor.count)
    } else {
        descriptor
            .kind
            .size(mode)
            .checked_mul(descriptor.count)
            .ok_or(PackError::CountOverflow)
    }
}

/// Round `offset` up to the next multiple of `align`
pub(crate) fn align_up(offset: usize, align: usize) -> Option<usize> {
    let rem = offset % align;
    if rem == 0 {
        Some(offset)
    } else {
        offset.checked_add(align - rem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::POINTER_WIDTH;

    #[test]
    fn test_empty_format() {
        let spec = parse("").unwrap();
        assert_eq!(spec.size, 0);
        assert_eq!(spec.arity, 0);
        assert_eq!(spec.mode, Mode::NativeAligned);
    }

    #[test]
    fn test_mode_prefixes() {
        assert_eq!(parse("@").unwrap().mode, Mode::NativeAligned);
        assert_eq!(parse("=").unwrap().mode, Mode::NativePacked);
        assert_eq!(parse("<").unwrap().mode, Mode::LittleEndian);
        assert_eq!(parse(">").unwrap().mode, Mode::BigEndian);
        assert_eq!(parse("!").unwrap().mode, Mode::BigEndian);
    }

    #[test]
    fn test_standard_sizes() {
        assert_eq!(parse("<bBhHiIlLqQ").unwrap().size, 1 + 1 + 2 + 2 + 4 + 4 + 4 + 4 + 8 + 8);
        assert_eq!(parse(">efd").unwrap().size, 2 + 4 + 8);
        assert_eq!(parse("<10s").unwrap().size, 10);
        assert_eq!(parse("<5p").unwrap().size, 5);
    }

    #[test]
    fn test_repeat_counts() {
        let spec = parse("<3h2x4B").unwrap();
        assert_eq!(spec.size, 6 + 2 + 4);
        assert_eq!(spec.arity, 3 + 0 + 4);
        assert_eq!(spec.fields.len(), 3);
    }

    #[test]
    fn test_bytes_count_is_length_not_repeat() {
        let spec = parse("<10s").unwrap();
        assert_eq!(spec.arity, 1);
        let spec = parse("<0s").unwrap();
        assert_eq!(spec.size, 0);
        assert_eq!(spec.arity, 1);
    }

    #[test]
    fn test_native_alignment_pads() {
        // Pad byte then int32: offset rounds up to 4 before the int
        let aligned = parse("@bi").unwrap();
        assert_eq!(aligned.size, 4 + 4);

        let packed = parse("=bi").unwrap();
        assert_eq!(packed.size, 1 + 4);
    }

    #[test]
    fn test_zero_count_forces_alignment() {
        let spec = parse("@b0q").unwrap();
        assert_eq!(spec.size, core::mem::align_of::<u64>());
        assert_eq!(spec.arity, 1);
    }

    #[test]
    fn test_native_only_codes() {
        assert_eq!(parse("@nNP").unwrap().size, 3 * POINTER_WIDTH);
        assert_eq!(parse("<n"), Err(PackError::NativeOnly('n')));
        assert_eq!(parse(">N"), Err(PackError::NativeOnly('N')));
        assert_eq!(parse("!P"), Err(PackError::NativeOnly('P')));
        // "=" is native byte order only; pointer-sized codes need "@"
        assert_eq!(parse("=n"), Err(PackError::NativeOnly('n')));
        assert_eq!(parse("=N"), Err(PackError::NativeOnly('N')));
        assert_eq!(parse("=P"), Err(PackError::NativeOnly('P')));
    }

    #[test]
    fn test_native_packed_uses_standard_sizes() {
        assert_eq!(parse("=l").unwrap().size, 4);
        assert_eq!(parse("=L").unwrap().size, 4);
        assert_eq!(parse("=lLq").unwrap().size, 4 + 4 + 8);
        assert_eq!(parse("@l").unwrap().size, POINTER_WIDTH);
    }

    #[test]
    fn test_whitespace_between_pairs() {
        let spec = parse("< h  2B ").unwrap();
        assert_eq!(spec.size, 2 + 2);
        assert_eq!(spec.arity, 3);
    }

    #[test]
    fn test_count_must_touch_its_code() {
        assert_eq!(parse("<2 h"), Err(PackError::BadFormatChar(' ')));
        assert_eq!(parse("<3"), Err(PackError::DanglingCount));
    }

    #[test]
    fn test_bad_code() {
        assert_eq!(parse("<z"), Err(PackError::BadFormatChar('z')));
    }

    #[test]
    fn test_oversized_format_rejected() {
        let err = parse("<999999999999999999999999s").unwrap_err();
        assert_eq!(err, PackError::CountOverflow);

        let err = parse("<999999999s").unwrap_err();
        assert!(matches!(err, PackError::FormatTooLarge(_, _)));
    }
}
