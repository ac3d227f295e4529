use anyhow::{anyhow, ensure, Context, Result};
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use super::job::Job;
use super::processor::ImageRecolorer;
use crate::palette::PaletteMap;

pub struct BatchOptions {
    pub threads: usize,
    pub verbose: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            verbose: false,
        }
    }
}

#[derive(Debug)]
pub enum JobOutcome {
    Done { recolored: usize },
    Failed { img_path: PathBuf, error: String },
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<JobOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, JobOutcome::Done { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn recolored_pixels(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                JobOutcome::Done { recolored } => *recolored,
                JobOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            JobOutcome::Failed { img_path, error } => Some((img_path.as_path(), error.as_str())),
            JobOutcome::Done { .. } => None,
        })
    }
}

/// Recolor every job on a fixed-size worker pool.
///
/// Job failures are printed and recorded, never returned as errors; only pool
/// setup can fail. Blocks until every job has been attempted.
pub fn run_batch(jobs: &[Job], map: &PaletteMap, options: &BatchOptions) -> Result<BatchReport> {
    ensure!(options.threads > 0, "Worker pool size must be at least 1");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads)
        .thread_name(|i| format!("recolor-{}", i))
        .build()
        .context("Failed to build worker pool")?;

    let recolorer = ImageRecolorer::new(map);
    let outcomes: Vec<JobOutcome> = pool.install(|| {
        jobs.par_iter()
            .map(|job| {
                run_job(job, options.verbose, || {
                    recolorer.recolor_file(&job.img_path, &job.out_path)
                })
            })
            .collect()
    });

    Ok(BatchReport { outcomes })
}

// Panics are contained to the job that raised them.
fn run_job<F>(job: &Job, verbose: bool, work: F) -> JobOutcome
where
    F: FnOnce() -> Result<usize>,
{
    let result = panic::catch_unwind(AssertUnwindSafe(work))
        .unwrap_or_else(|payload| Err(anyhow!("panicked: {}", panic_message(&*payload))));

    match result {
        Ok(recolored) => {
            if verbose {
                eprintln!(
                    "Recolored {} -> {} ({} pixels)",
                    job.img_path.display(),
                    job.out_path.display(),
                    recolored
                );
            }
            JobOutcome::Done { recolored }
        }
        Err(e) => {
            let error = format!("{:#}", e);
            eprintln!("Failed to process {}: {}", job.img_path.display(), error);
            JobOutcome::Failed {
                img_path: job.img_path.clone(),
                error,
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
