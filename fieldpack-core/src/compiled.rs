//! Reusable compiled-format handle

use crate::decoder::{self, UnpackIter};
use crate::encoder;
use crate::error::PackError;
use crate::parser;
use crate::types::{FormatSpec, Mode, Value};
use alloc::vec::Vec;
use bytes::Bytes;

/// A format parsed once and bound to every codec operation
///
/// The free functions re-parse their format string on every call; code that
/// encodes or decodes the same layout repeatedly should compile it once:
///
/// ```
/// use fieldpack_core::{CompiledFormat, Value};
///
/// let point = CompiledFormat::new("<2hB")?;
/// let wire = point.pack(&[Value::Int(3), Value::Int(-4), Value::Uint(9)])?;
/// assert_eq!(wire.len(), point.size());
/// assert_eq!(point.unpack(&wire)?[1], Value::Int(-4));
/// # Ok::<(), fieldpack_core::PackError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFormat {
    spec: FormatSpec,
}

impl CompiledFormat {
    /// Compile a format string; fails exactly as the parser does
    pub fn new(format: &str) -> Result<Self, PackError> {
        Ok(Self {
            spec: parser::parse(format)?,
        })
    }

    /// Wrap an already-parsed spec
    pub fn from_spec(spec: FormatSpec) -> Self {
        Self { spec }
    }

    /// Encoded size of one record, in bytes
    pub fn size(&self) -> usize {
        self.spec.size
    }

    /// Number of values one record produces/consumes
    pub fn arity(&self) -> usize {
        self.spec.arity
    }

    /// Byte order / alignment mode
    pub fn mode(&self) -> Mode {
        self.spec.mode
    }

    /// Borrow the underlying spec
    pub fn spec(&self) -> &FormatSpec {
        &self.spec
    }

    /// Encode one record of values
    pub fn pack(&self, values: &[Value]) -> Result<Bytes, PackError> {
        encoder::pack_spec(&self.spec, values)
    }

    /// Encode one record into `buf` at `offset`
    pub fn pack_into(
        &self,
        buf: &mut [u8],
        offset: usize,
        values: &[Value],
    ) -> Result<(), PackError> {
        encoder::pack_into_spec(&self.spec, buf, offset, values)
    }

    /// Decode one record from an exact-length buffer
    pub fn unpack(&self, buf: &[u8]) -> Result<Vec<Value>, PackError> {
        decoder::unpack_spec(&self.spec, buf)
    }

    /// Decode one record starting at `offset`
    pub fn unpack_from(&self, buf: &[u8], offset: usize) -> Result<Vec<Value>, PackError> {
        decoder::unpack_from_spec(&self.spec, buf, offset)
    }

    /// Iterate over back-to-back records in `buf`
    pub fn iter_unpack<'b>(&self, buf: &'b [u8]) -> Result<UnpackIter<'b>, PackError> {
        UnpackIter::new(self.spec.clone(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_fails_like_the_parser() {
        assert_eq!(
            CompiledFormat::new("<z").unwrap_err(),
            PackError::BadFormatChar('z')
        );
    }

    #[test]
    fn test_handle_reuse() {
        let fmt = CompiledFormat::new(">HH").unwrap();
        assert_eq!(fmt.size(), 4);
        assert_eq!(fmt.arity(), 2);
        assert_eq!(fmt.mode(), Mode::BigEndian);

        for n in 0u64..100 {
            let packed = fmt.pack(&[Value::Uint(n), Value::Uint(n + 1)]).unwrap();
            let values = fmt.unpack(&packed).unwrap();
            assert_eq!(values, alloc::vec![Value::Uint(n), Value::Uint(n + 1)]);
        }
    }

    #[test]
    fn test_iter_unpack_is_restartable() {
        let fmt = CompiledFormat::new("<B").unwrap();
        let buf = [1u8, 2, 3];
        let first: Vec<_> = fmt.iter_unpack(&buf).unwrap().collect();
        let second: Vec<_> = fmt.iter_unpack(&buf).unwrap().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }
}
