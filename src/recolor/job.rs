use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use crate::palette::PaletteMap;

/// One image to recolor, as read from the job document
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Job {
    pub img_path: PathBuf,
    pub out_path: PathBuf,
    #[serde(default)]
    pub base_palette: Vec<String>,
    #[serde(default)]
    pub target_palette: Vec<String>,
}

/// Parse a JSON array of jobs. An empty array is not an error here.
pub fn read_jobs<R: Read>(reader: R) -> Result<Vec<Job>> {
    serde_json::from_reader(reader).context("Failed to parse job list")
}

/// The first job's palettes are authoritative for the whole batch.
pub fn palette_map_for(jobs: &[Job]) -> Result<PaletteMap> {
    let Some(first) = jobs.first() else {
        bail!("No jobs provided.");
    };

    for job in &jobs[1..] {
        let base_differs = !job.base_palette.is_empty() && job.base_palette != first.base_palette;
        let target_differs = !job.target_palette.is_empty() && job.target_palette != first.target_palette;
        if base_differs || target_differs {
            eprintln!(
                "Warning: palettes for {} differ from the first job; using the first job's palettes",
                job.img_path.display()
            );
        }
    }

    PaletteMap::build(&first.base_palette[..], &first.target_palette[..]).with_context(|| {
        format!("Invalid palette in job for {}", first.img_path.display())
    })
}

/// Reject batches where two jobs would write the same file.
pub fn validate_output_paths(jobs: &[Job]) -> Result<()> {
    let mut seen = HashSet::with_capacity(jobs.len());
    for job in jobs {
        if !seen.insert(normalized(&job.out_path)) {
            bail!("Duplicate output path {}", job.out_path.display());
        }
    }
    Ok(())
}

// Lexical only: `.` components are dropped, `..` and symlinks are not resolved.
fn normalized(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
