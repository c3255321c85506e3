use crate::f32_bits_to_f16_bits;

/// A 16-bit floating point number, stored as its raw IEEE 754 bit pattern.
///
/// This type only exists to carry the result of converting from `f32` in a type safe way and to
/// classify it. It does not implement any arithmetic, and it deliberately has no conversion back
/// to `f32`.
///
/// Since the type is `#[repr(transparent)]` and [`bytemuck::Pod`], a slice `&[SimpleF16]` can be
/// reinterpreted as `&[u16]` with [`bytemuck::cast_slice`].
#[derive(Clone, Copy, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct SimpleF16 {
    /// - most significant bit: sign
    /// - next 5 bits: biased exponent (bias 15)
    /// - least significant 10 bits: mantissa
    ///
    /// An exponent of `(00000)_2` denotes zero or a subnormal number, and an exponent of
    /// `(11111)_2` denotes infinity (if the mantissa is zero) or NaN (otherwise).
    bits: u16,
}

impl PartialEq for SimpleF16 {
    fn eq(&self, other: &Self) -> bool {
        (self.bits == other.bits && !self.is_nan()) || (self.is_zero() && other.is_zero())
    }
}

impl SimpleF16 {
    pub const ZERO: Self = Self::from_bits(0x0000);
    pub const NEG_ZERO: Self = Self::from_bits(0x8000);
    pub const INFINITY: Self = Self::from_bits(0x7c00);
    pub const NEG_INFINITY: Self = Self::from_bits(0xfc00);

    /// The canonical quiet NaN.
    pub const NAN: Self = Self::from_bits(0x7e00);

    /// `65504.0`
    pub const MAX: Self = Self::from_bits(0x7bff);

    /// Smallest positive normal number, `2^(-14)`.
    pub const MIN_POSITIVE: Self = Self::from_bits(0x0400);

    /// Smallest positive subnormal number, `2^(-24)`.
    pub const MIN_POSITIVE_SUBNORMAL: Self = Self::from_bits(0x0001);

    /// Rounds to the nearest representable value, breaking ties to even.
    ///
    /// See [`f32_bits_to_f16_bits`] for the treatment of overflow, underflow, and NaNs.
    pub fn from_f32(x: f32) -> Self {
        Self::from_f32_bits(x.to_bits())
    }

    /// Same as [`from_f32`](Self::from_f32), but takes the raw bit pattern of the `f32`.
    pub const fn from_f32_bits(f32_bits: u32) -> Self {
        Self::from_bits(f32_bits_to_f16_bits(f32_bits))
    }

    pub const fn from_bits(bits: u16) -> Self {
        Self { bits }
    }

    pub const fn to_bits(self) -> u16 {
        self.bits
    }

    pub fn is_nan(self) -> bool {
        self.exponent() == 0b1_1111 && self.mantissa() != 0
    }

    /// Returns `true` if this value is positive infinity or negative infinity, and `false` otherwise.
    pub fn is_infinite(self) -> bool {
        self.exponent() == 0b1_1111 && self.mantissa() == 0
    }

    pub fn is_finite(self) -> bool {
        self.exponent() != 0b1_1111
    }

    /// Returns `true` for both positive and negative zero.
    pub fn is_zero(self) -> bool {
        // Ignore sign bit.
        self.bits << 1 == 0
    }

    pub fn is_subnormal(self) -> bool {
        self.exponent() == 0 && self.mantissa() != 0
    }

    pub fn is_sign_positive(self) -> bool {
        self.sign() == 0
    }

    pub fn is_sign_negative(self) -> bool {
        self.sign() == 1
    }

    fn sign(self) -> u16 {
        self.bits >> 15
    }

    fn exponent(self) -> u16 {
        (self.bits >> 10) & 0b1_1111
    }

    fn mantissa(self) -> u16 {
        self.bits & 0b11_1111_1111
    }
}
