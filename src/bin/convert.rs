use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use halfbits::{ConversionSummary, SimpleF16, convert_slice, read_f32_bits, write_f16_bits};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Endian {
    Little,
    Big,
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a file containing a headerless array of `f32` values (use `mk-random` to create a
    /// file with mock data in this format).
    input: PathBuf,

    /// Path to output file, which will contain the `f16` values as a headerless array. If the file
    /// already exists it will be overwritten. If not provided, the bit patterns of inputs and
    /// outputs are printed in hex, one pair per line.
    output: Option<PathBuf>,

    /// Byte order of both the input and the output file.
    #[arg(long, value_enum, default_value = "little")]
    endian: Endian,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    match cli.endian {
        Endian::Little => run::<LittleEndian>(&cli),
        Endian::Big => run::<BigEndian>(&cli),
    }
}

fn run<B: ByteOrder>(cli: &Cli) -> Result<()> {
    let file = std::fs::File::open(&cli.input)
        .with_context(|| format!("Failed to open {}", cli.input.display()))?;
    let input = read_f32_bits::<B>(std::io::BufReader::new(file))?;
    info!("Read {} values from {}.", input.len(), cli.input.display());

    let mut output = vec![SimpleF16::default(); input.len()];
    convert_slice(&input, &mut output)?;

    let summary = ConversionSummary::tally(&input, &output);
    info!(
        "Converted {} values ({} NaN, {} subnormal).",
        summary.total, summary.nan, summary.subnormal
    );
    if summary.overflowed != 0 {
        warn!("{} finite values overflowed to infinity.", summary.overflowed);
    }
    if summary.flushed_to_zero != 0 {
        warn!("{} nonzero values were flushed to zero.", summary.flushed_to_zero);
    }

    match &cli.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = std::io::BufWriter::new(file);
            let bytes_written = write_f16_bits::<B>(&output, &mut writer)?;
            writer.flush()?;
            info!("Wrote {} bytes to {}.", bytes_written, path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            for (f32_bits, half) in input.iter().zip(&output) {
                writeln!(stdout, "{:#010x} -> {:#06x}", f32_bits, half.to_bits())?;
            }
        }
    }

    Ok(())
}
