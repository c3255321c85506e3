//! An independent `f32` to `f16` conversion for cross-checking [`f32_bits_to_f16_bits`].
//!
//! Instead of rounding with integer arithmetic, this delegates the rounding of subnormal results
//! to the floating point unit: adding a suitable power of two aligns the significand so that the
//! hardware's own round-half-to-even does the work. It shares no code with the main
//! implementation.
//!
//! It does not preserve NaN payloads (every NaN becomes a quiet NaN), so [`cross_check`] compares
//! NaNs separately.

use anyhow::{Result, ensure};

use crate::f32_bits_to_f16_bits;

/// `2^(-1)`, i.e., the `f32` whose ulp is exactly the smallest subnormal `f16` (`2^(-24)`).
const DENORM_MAGIC: u32 = ((127 - 14) + (23 - 10)) << 23;

pub fn f32_bits_to_f16_bits_via_float_addition(x: u32) -> u16 {
    let sign = x & 0x8000_0000;
    let x = x ^ sign;

    let magnitude = if x >= 0x4780_0000 {
        if x > 0x7f80_0000 { 0x7e00 } else { 0x7c00 }
    } else if x < 0x3880_0000 {
        // Subnormal or zero result. After the addition, the 10 subnormal significand bits (plus a
        // possible carry into the smallest normal exponent) sit at the bottom of the sum.
        let sum = f32::from_bits(x) + f32::from_bits(DENORM_MAGIC);
        (sum.to_bits() - DENORM_MAGIC) as u16
    } else {
        let mantissa_odd = (x >> 13) & 1;
        // Rebias the exponent and add just under one half ulp; the extra `mantissa_odd` tips exact
        // ties towards the even neighbor.
        ((x - (112 << 23) + 0xfff + mantissa_odd) >> 13) as u16
    };

    (sign >> 16) as u16 | magnitude
}

/// Checks [`f32_bits_to_f16_bits`] against [`f32_bits_to_f16_bits_via_float_addition`] for a
/// single input.
///
/// Non-NaN inputs must convert to identical bits. For NaN inputs, the result must be a NaN with
/// the same sign that carries the upper 10 payload bits (or a payload of one if these are all
/// zero).
pub fn cross_check(f: u32) -> Result<()> {
    let actual = f32_bits_to_f16_bits(f);

    ensure!(
        actual >> 15 == (f >> 31) as u16,
        "Sign mismatch: {f:#010x} converted to {actual:#06x}"
    );

    if f & 0x7fff_ffff > 0x7f80_0000 {
        let payload = ((f & 0x007f_ffff) >> 13) as u16;
        let expected = (actual & 0x8000) | 0x7c00 | payload.max(1);
        ensure!(
            actual == expected,
            "NaN {f:#010x} converted to {actual:#06x}, expected {expected:#06x}"
        );
    } else {
        let expected = f32_bits_to_f16_bits_via_float_addition(f);
        ensure!(
            actual == expected,
            "{f:#010x} converted to {actual:#06x}, but reference gives {expected:#06x}"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::{cross_check, f32_bits_to_f16_bits_via_float_addition};

    #[test]
    fn reference_special_values() {
        assert_eq!(f32_bits_to_f16_bits_via_float_addition(0x0000_0000), 0x0000);
        assert_eq!(f32_bits_to_f16_bits_via_float_addition(0x8000_0000), 0x8000);
        assert_eq!(f32_bits_to_f16_bits_via_float_addition(0x7f80_0000), 0x7c00);
        assert_eq!(f32_bits_to_f16_bits_via_float_addition(0xff80_0000), 0xfc00);
        assert_eq!(f32_bits_to_f16_bits_via_float_addition(0x7f80_0001), 0x7e00);
        assert_eq!(f32_bits_to_f16_bits_via_float_addition(0xffc0_0000), 0xfe00);
        assert_eq!(f32_bits_to_f16_bits_via_float_addition(1.0f32.to_bits()), 0x3c00);
        assert_eq!(f32_bits_to_f16_bits_via_float_addition(65520.0f32.to_bits()), 0x7c00);
        assert_eq!(f32_bits_to_f16_bits_via_float_addition(0x3300_0000), 0x0000);
        assert_eq!(f32_bits_to_f16_bits_via_float_addition(0x3300_0001), 0x0001);
        assert_eq!(f32_bits_to_f16_bits_via_float_addition(0x387f_e000), 0x0400);
    }

    #[test]
    fn exponent_boundaries() {
        // Every exponent, combined with significands that sit on or next to rounding boundaries.
        let significands = [
            0x00_0000, 0x00_0001, 0x00_0fff, 0x00_1000, 0x00_1001, 0x00_2000, 0x00_3000, 0x00_3fff,
            0x40_0000, 0x7f_efff, 0x7f_f000, 0x7f_ffff,
        ];
        for sign in [0, 0x8000_0000u32] {
            for exponent in 0..=0xffu32 {
                for significand in significands {
                    let f = sign | (exponent << 23) | significand;
                    if let Err(err) = cross_check(f) {
                        panic!("{err}");
                    }
                }
            }
        }
    }

    #[test]
    fn random_inputs() {
        let mut rng = StdRng::seed_from_u64(20250319);
        for _ in 0..1_000_000 {
            let f = rng.random::<u32>();
            if let Err(err) = cross_check(f) {
                panic!("{err}");
            }
        }
    }

    #[test]
    fn random_inputs_near_half_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1_000_000 {
            let exponent = rng.random_range(100u32..=145);
            let f = (rng.random::<u32>() & 0x807f_ffff) | (exponent << 23);
            if let Err(err) = cross_check(f) {
                panic!("{err}");
            }
        }
    }
}
