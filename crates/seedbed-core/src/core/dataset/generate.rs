use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;
use seedbed_domain::TreeLayout;

use super::CHUNK_SIZE;
use crate::core::engine::Mulberry32;
use crate::core::tooling::progress::ProgressReporter;
use crate::core::tooling::timings::TimingGuard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    pub files: u64,
    pub bytes: u64,
}

/// Materializes the dataset tree under `base_dir`, creating parents as
/// needed. Each file's bytes depend only on its own derived seed, so files
/// are written by `jobs` workers in whatever order the pool schedules them;
/// revisited files are overwritten in place. Partial state from an aborted
/// earlier run is neither detected nor repaired; delete and regenerate.
pub fn generate_tree(base_dir: &Path, layout: &TreeLayout, jobs: usize) -> Result<GenerateSummary> {
    let _timing = TimingGuard::new("dataset.generate");

    fs::create_dir_all(base_dir)
        .with_context(|| format!("failed to create {}", base_dir.display()))?;
    for rel in layout.leaf_dirs() {
        let dir = base_dir.join(rel.as_std_path());
        fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let positions: Vec<_> = layout.files().collect();
    tracing::debug!(
        base_dir = %base_dir.display(),
        files = positions.len(),
        bytes = layout.total_bytes(),
        jobs,
        "generating dataset"
    );

    let progress = ProgressReporter::bar("Generating dataset", positions.len());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("failed to build generation worker pool")?;
    pool.install(|| {
        positions.par_iter().try_for_each(|position| {
            let path = base_dir.join(position.rel_path().as_std_path());
            write_data_file(&path, position.seed(layout.master_seed), layout.file_size)?;
            progress.increment();
            Ok::<_, anyhow::Error>(())
        })
    })?;

    Ok(GenerateSummary {
        files: layout.file_count(),
        bytes: layout.total_bytes(),
    })
}

/// Streams `size` bytes from a freshly seeded engine. The handle closes on
/// drop, including on the error paths.
fn write_data_file(path: &Path, seed: u32, size: u64) -> Result<()> {
    let mut engine = Mulberry32::new(seed);
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut file =
        fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?;

    let mut remaining = size;
    while remaining > 0 {
        let len = remaining.min(CHUNK_SIZE as u64) as usize;
        engine.fill(&mut chunk[..len]);
        file.write_all(&chunk[..len])
            .with_context(|| format!("failed to write {}", path.display()))?;
        remaining -= len as u64;
    }
    Ok(())
}
