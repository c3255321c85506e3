use std::{
    hash::{Hash, Hasher},
    io::{Read, Write},
};

use anyhow::{Result, bail, ensure};
use byteorder::{ByteOrder, WriteBytesExt};
use rand::SeedableRng;
use rayon::prelude::*;

mod convert;
mod f16;
pub mod reference;

pub use convert::f32_bits_to_f16_bits;
pub use f16::SimpleF16;

/// Converts each `f32` bit pattern in `input` and stores the result at the same position in
/// `output`. Runs in parallel on rayon's global thread pool.
pub fn convert_slice(input: &[u32], output: &mut [SimpleF16]) -> Result<()> {
    ensure!(
        input.len() == output.len(),
        "Length mismatch: {} inputs but room for {} outputs",
        input.len(),
        output.len()
    );

    input
        .par_iter()
        .zip(output.par_iter_mut())
        .for_each(|(&f32_bits, dst)| *dst = SimpleF16::from_f32_bits(f32_bits));

    Ok(())
}

pub fn convert_f32_slice(input: &[f32], output: &mut [SimpleF16]) -> Result<()> {
    convert_slice(bytemuck::cast_slice(input), output)
}

/// Reads raw 4-byte values in byte order `B` until the end of `reader`.
pub fn read_f32_bits<B: ByteOrder>(mut reader: impl Read) -> Result<Vec<u32>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    if bytes.len() % 4 != 0 {
        bail!(
            "Input has {} bytes, which is not a multiple of 4 (the size of an `f32`).",
            bytes.len()
        );
    }

    let mut values = vec![0u32; bytes.len() / 4];
    B::read_u32_into(&bytes, &mut values);
    Ok(values)
}

/// Returns the number of bytes written.
pub fn write_f32_bits<B: ByteOrder>(values: &[u32], mut writer: impl Write) -> Result<usize> {
    for &value in values {
        writer.write_u32::<B>(value)?;
    }
    Ok(4 * values.len())
}

/// Returns the number of bytes written.
pub fn write_f16_bits<B: ByteOrder>(values: &[SimpleF16], mut writer: impl Write) -> Result<usize> {
    let mut bytes = vec![0u8; 2 * values.len()];
    B::write_u16_into(bytemuck::cast_slice(values), &mut bytes);
    writer.write_all(&bytes)?;
    Ok(bytes.len())
}

/// Counts what happened to the values of a bulk conversion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub total: usize,
    pub nan: usize,

    /// Finite inputs that became infinite.
    pub overflowed: usize,

    /// Nonzero inputs that became zero.
    pub flushed_to_zero: usize,

    /// Outputs that are subnormal.
    pub subnormal: usize,
}

impl ConversionSummary {
    pub fn tally(input: &[u32], output: &[SimpleF16]) -> Self {
        input
            .par_iter()
            .zip(output)
            .map(|(&f32_bits, &half)| {
                let magnitude = f32_bits & 0x7fff_ffff;
                Self {
                    total: 1,
                    nan: half.is_nan() as usize,
                    overflowed: (magnitude < 0x7f80_0000 && half.is_infinite()) as usize,
                    flushed_to_zero: (magnitude != 0 && half.is_zero()) as usize,
                    subnormal: half.is_subnormal() as usize,
                }
            })
            .reduce(Self::default, |a, b| Self {
                total: a.total + b.total,
                nan: a.nan + b.nan,
                overflowed: a.overflowed + b.overflowed,
                flushed_to_zero: a.flushed_to_zero + b.flushed_to_zero,
                subnormal: a.subnormal + b.subnormal,
            })
    }
}

/// Derives reproducible, statistically independent RNGs from a global seed.
#[derive(Clone, Debug)]
pub struct RngSeeder {
    hasher: fxhash::FxHasher64,
}

impl RngSeeder {
    pub fn new(global_seed: impl Hash) -> Self {
        let mut hasher = fxhash::FxHasher64::default();
        global_seed.hash(&mut hasher);
        Self { hasher }
    }

    pub fn rng(&self, id: impl Hash) -> rand::rngs::StdRng {
        let mut hasher = self.hasher.clone();
        id.hash(&mut hasher);
        rand::rngs::StdRng::seed_from_u64(hasher.finish())
    }
}
