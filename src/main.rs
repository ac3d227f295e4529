mod palette;
mod recolor;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use crate::recolor::batch::{run_batch, BatchOptions};
use crate::recolor::job;

/// Recolor images by swapping each opaque pixel to the nearest base palette
/// color's counterpart in the target palette.
///
/// Reads a JSON array of jobs:
/// [{"img_path", "out_path", "base_palette": ["#rrggbb", ...], "target_palette": [...]}, ...]
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Job document to read ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    input: PathBuf,
    /// Worker threads
    #[arg(short, long, default_value_t = num_cpus::get())]
    threads: usize,
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let jobs = if cli.input.as_os_str() == "-" {
        job::read_jobs(io::stdin().lock())?
    } else {
        let file = File::open(&cli.input)
            .with_context(|| format!("Failed to open {}", cli.input.display()))?;
        job::read_jobs(BufReader::new(file))?
    };

    if jobs.is_empty() {
        eprintln!("No jobs provided.");
        std::process::exit(1);
    }

    let map = job::palette_map_for(&jobs)?;
    job::validate_output_paths(&jobs)?;

    let options = BatchOptions {
        threads: cli.threads,
        verbose: cli.verbose,
    };
    if options.verbose {
        eprintln!("Recoloring {} images with {} colors on {} threads", jobs.len(), map.len(), options.threads);
    }

    let report = run_batch(&jobs, &map, &options)?;
    if options.verbose {
        eprintln!(
            "done: {} succeeded, {} failed, {} pixels recolored",
            report.succeeded(),
            report.failed(),
            report.recolored_pixels()
        );
        for (path, error) in report.failures() {
            eprintln!("  failed: {}: {}", path.display(), error);
        }
    }

    Ok(())
}
