use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Result, bail};
use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;

use halfbits::reference::cross_check;

/// Number of discrepancies that get logged individually.
const MAX_REPORTED: u64 = 20;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// First value of the upper 16 bits of the inputs to check (inclusive).
    #[arg(long, default_value = "0")]
    start: u16,

    /// Last value of the upper 16 bits of the inputs to check (inclusive).
    #[arg(long, default_value = "65535")]
    end: u16,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    if cli.start > cli.end {
        bail!("`--start` ({}) must not exceed `--end` ({}).", cli.start, cli.end);
    }

    let num_chunks = cli.end as u64 - cli.start as u64 + 1;
    info!(
        "Checking {} inputs from {:#010x} to {:#010x}.",
        num_chunks << 16,
        (cli.start as u32) << 16,
        ((cli.end as u32) << 16) | 0xffff
    );

    let progress_bar = indicatif::ProgressBar::new(num_chunks);
    progress_bar.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} [{elapsed_precise}]")
            .expect("valid template"),
    );

    let discrepancies = AtomicU64::new(0);

    (cli.start..=cli.end).into_par_iter().for_each(|high| {
        let high = (high as u32) << 16;
        for low in 0..=0xffff {
            if let Err(err) = cross_check(high | low) {
                if discrepancies.fetch_add(1, Ordering::Relaxed) < MAX_REPORTED {
                    warn!("{err}");
                }
            }
        }
        progress_bar.inc(1);
    });

    progress_bar.finish();

    let discrepancies = discrepancies.into_inner();
    if discrepancies != 0 {
        bail!("Found {} discrepancies.", discrepancies);
    }

    info!("All inputs agree.");

    Ok(())
}
