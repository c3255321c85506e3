/// Converts the bit pattern of an IEEE 754 single precision float into the bit pattern of the
/// nearest IEEE 754 half precision float, rounding ties to even.
///
/// The function is defined for every `u32`:
/// - finite values whose magnitude is too large for `f16` become infinity (with the sign of `f`);
/// - values whose magnitude is below half of the smallest subnormal `f16` become zero (again with
///   the sign of `f`), and so do all `f32` subnormals;
/// - NaNs stay NaNs and keep the 10 most significant bits of their payload. If those bits are all
///   zero, the least significant payload bit of the result is set so that the result does not
///   turn into infinity. Whether a NaN is quiet or signaling is not preserved beyond that.
///
/// # Bit layout
///
/// ```text
/// f32:  S EEEEEEEE MMMMMMMMMMMMMMMMMMMMMMM     (bias 127)
///       31 30   23 22                   0
///
/// f16:  S EEEEE MMMMMMMMMM                     (bias 15)
///       15 14 10 9        0
/// ```
///
/// All comparisons below are done on the exponent field *in place*, i.e., without shifting it
/// down first. For example, `0x3800_0000` is a biased `f32` exponent of 112, i.e., a logical
/// exponent of `-15`.
pub const fn f32_bits_to_f16_bits(f: u32) -> u16 {
    let h_sgn = ((f & 0x8000_0000) >> 16) as u16;
    let f_exp = f & 0x7f80_0000;
    let mut f_sig = f & 0x007f_ffff;

    if f_exp >= 0x4780_0000 {
        // Logical exponent is at least 16, so the result is infinity or NaN.
        if f_exp == 0x7f80_0000 && f_sig != 0 {
            let mut ret = 0x7c00 + (f_sig >> 13) as u16;
            // All set payload bits were shifted out; keep it a NaN.
            ret += (ret == 0x7c00) as u16;
            return h_sgn + ret;
        }
        return h_sgn + 0x7c00;
    }

    if f_exp <= 0x3800_0000 {
        if f_exp < 0x3300_0000 {
            // Logical exponent below `-25`: even after rounding, `|f| < 2^(-25)` is closer to
            // zero than to the smallest subnormal `f16`, which is `2^(-24)`.
            return h_sgn;
        }

        // Logical exponent in `-25..=-15`, so the result is a subnormal `f16` (or, after
        // rounding up, the smallest normal one).
        let f_exp = f_exp >> 23;
        f_sig += 0x0080_0000; // Restore the implicit leading one.
        f_sig >>= 113 - f_exp; // `1 <= 113 - f_exp <= 11`

        // Round half to even. The shift above may have discarded up to 11 set bits of the
        // original significand, so they have to be checked separately (sticky bit): only if
        // they are all zero and the remaining bits look like an exact tie with an even last
        // kept bit, we round down.
        if (f_sig & 0x3fff) != 0x1000 || (f & 0x07ff) != 0 {
            f_sig += 0x1000;
        }

        // A carry out of the 10 significand bits lands in the exponent field and produces the
        // smallest normal `f16`, which is the correct result.
        return h_sgn + (f_sig >> 13) as u16;
    }

    // Logical exponent in `-14..=15`, so the result is a normal `f16`. Subtracting `112 << 23`
    // rebiases from 127 to 15, and the shift by 13 moves the exponent field from bit 23 to bit 10.
    let h_exp = ((f_exp - 0x3800_0000) >> 13) as u16;

    // Round half to even: round down only on an exact tie with an even last kept bit.
    if (f_sig & 0x3fff) != 0x1000 {
        f_sig += 0x1000;
    }

    // A carry out of the significand increments the exponent. For the largest exponent, this
    // turns the result into infinity, which is what IEEE 754 prescribes for overflow.
    h_sgn + h_exp + (f_sig >> 13) as u16
}
