use std::{io::Write, path::PathBuf};

use anyhow::Result;
use byteorder::{BigEndian, LittleEndian};
use clap::{Parser, ValueEnum};
use log::info;
use rand::{Rng, RngCore};

use halfbits::{RngSeeder, write_f32_bits};

#[derive(Clone, Copy, Debug, Hash, ValueEnum)]
enum Mode {
    /// Uniformly distributed over all 2^32 bit patterns (including NaNs and infinities).
    Bits,

    /// Random sign and significand, with a biased exponent between 100 and 145. This concentrates
    /// on the range where `f16` goes from flushing to zero, over subnormals and normals, to
    /// overflowing.
    NearHalf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Endian {
    Little,
    Big,
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to output file. If the file already exists it will be overwritten. Otherwise, a new
    /// file will be created.
    output: PathBuf,

    /// The number of `f32` values to generate.
    #[arg(short = 'n', long, default_value = "1000000")]
    count: usize,

    #[arg(long, value_enum, default_value = "near-half")]
    mode: Mode,

    #[arg(long, value_enum, default_value = "little")]
    endian: Endian,

    /// The seed to use for the random number generator. Together with `count` and `mode`, it
    /// determines the output. Set to zero to use a random seed.
    #[arg(long, default_value = "20250319")]
    seed: u64,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let seed = if cli.seed == 0 {
        let seed = rand::rng().next_u64();
        info!("Using randomly generated seed {}.", seed);
        seed
    } else {
        cli.seed
    };

    let rng_seeder = RngSeeder::new((seed, cli.count, cli.mode));
    let mut rng = rng_seeder.rng("values");

    let values = (0..cli.count)
        .map(|_| match cli.mode {
            Mode::Bits => rng.next_u32(),
            Mode::NearHalf => {
                let exponent = rng.random_range(100u32..=145);
                (rng.next_u32() & 0x807f_ffff) | (exponent << 23)
            }
        })
        .collect::<Vec<_>>();

    let file = std::fs::File::create(&cli.output)?;
    let mut writer = std::io::BufWriter::new(file);

    let bytes_written = match cli.endian {
        Endian::Little => write_f32_bits::<LittleEndian>(&values, &mut writer)?,
        Endian::Big => write_f32_bits::<BigEndian>(&values, &mut writer)?,
    };
    writer.flush()?;

    info!("Wrote {} bytes to {}.", bytes_written, cli.output.display());

    Ok(())
}
