//! IEEE-754 binary16 conversions
//!
//! The `e` type code stores half-precision floats. Rust has no primitive
//! half type, so the bit-level conversions live here. Rounding is
//! round-to-nearest, ties-to-even, matching hardware conversion semantics.

/// Convert an `f32` to binary16 bits
///
/// Returns `None` when the magnitude is finite but too large for binary16
/// (including values that only overflow after rounding); the caller reports
/// that as a range error. Infinities and NaN convert losslessly.
pub(crate) fn f32_to_bits(value: f32) -> Option<u16> {
    let bits = value.to_bits();
    let sign = ((bits >> 16) & 0x8000) as u16;
    let exp32 = ((bits >> 23) & 0xff) as i32;
    let mant = bits & 0x007f_ffff;

    if exp32 == 0xff {
        // Inf stays inf, NaN becomes a quiet NaN
        return Some(if mant == 0 { sign | 0x7c00 } else { sign | 0x7e00 });
    }

    let exp = exp32 - 127 + 15;

    if exp >= 0x1f {
        return None;
    }

    if exp <= 0 {
        // Subnormal half, or zero if the value is too small
        if exp < -10 {
            return Some(sign);
        }
        let mant = mant | 0x0080_0000;
        let shift = (14 - exp) as u32;
        let mut half = (mant >> shift) as u16;
        let round_bit = 1u32 << (shift - 1);
        if (mant & round_bit) != 0 && ((mant & (round_bit - 1)) != 0 || (half & 1) != 0) {
            half += 1;
        }
        return Some(sign | half);
    }

    let mut half = ((exp as u16) << 10) | ((mant >> 13) as u16);
    let round_bit = 0x1000u32;
    if (mant & round_bit) != 0 && ((mant & (round_bit - 1)) != 0 || (half & 1) != 0) {
        // Rounding can carry all the way into the exponent
        half += 1;
        if half >= 0x7c00 {
            return None;
        }
    }
    Some(sign | half)
}

/// Expand binary16 bits to an `f32`
pub(crate) fn bits_to_f32(bits: u16) -> f32 {
    let sign = ((bits & 0x8000) as u32) << 16;
    let exp = ((bits >> 10) & 0x1f) as u32;
    let mant = (bits & 0x03ff) as u32;

    if exp == 0 {
        if mant == 0 {
            return f32::from_bits(sign);
        }
        // Subnormal half: renormalize for the wider exponent range
        let mut exp32 = 113u32;
        let mut mant = mant;
        while mant & 0x0400 == 0 {
            mant <<= 1;
            exp32 -= 1;
        }
        return f32::from_bits(sign | (exp32 << 23) | ((mant & 0x03ff) << 13));
    }

    if exp == 0x1f {
        return f32::from_bits(sign | 0x7f80_0000 | (mant << 13));
    }

    f32::from_bits(sign | ((exp + 112) << 23) | (mant << 13))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_values_round_trip() {
        for v in [0.0f32, -0.0, 1.0, -1.0, 0.5, 1.5, 2.0, 65504.0, -65504.0] {
            let bits = f32_to_bits(v).unwrap();
            assert_eq!(bits_to_f32(bits), v, "value {v}");
        }
    }

    #[test]
    fn test_known_bit_patterns() {
        assert_eq!(f32_to_bits(1.0).unwrap(), 0x3c00);
        assert_eq!(f32_to_bits(-2.0).unwrap(), 0xc000);
        assert_eq!(f32_to_bits(65504.0).unwrap(), 0x7bff);
        assert_eq!(bits_to_f32(0x3555), 0.33325195f32);
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(f32_to_bits(65520.0), None);
        assert_eq!(f32_to_bits(1e10), None);
        assert_eq!(f32_to_bits(-70000.0), None);
    }

    #[test]
    fn test_infinity_and_nan_pass_through() {
        assert_eq!(f32_to_bits(f32::INFINITY).unwrap(), 0x7c00);
        assert_eq!(f32_to_bits(f32::NEG_INFINITY).unwrap(), 0xfc00);
        let nan = f32_to_bits(f32::NAN).unwrap();
        assert!(bits_to_f32(nan).is_nan());
        assert!(bits_to_f32(0x7c01).is_nan());
    }

    #[test]
    fn test_subnormals() {
        // Smallest positive half subnormal: 2^-24
        let tiny = f32_to_bits(5.960_464_5e-8).unwrap();
        assert_eq!(tiny, 0x0001);
        assert_eq!(bits_to_f32(0x0001), 5.960_464_5e-8);

        // Below half the smallest subnormal rounds to zero
        assert_eq!(f32_to_bits(1e-9).unwrap(), 0x0000);
    }
}
