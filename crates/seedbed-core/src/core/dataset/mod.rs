use std::path::Path;

use anyhow::Result;

mod generate;
mod verify;


pub use generate::{generate_tree, GenerateSummary};
pub use verify::{verify_tree, VerifyFailure, VerifyMode, VerifyReport};

/// Bytes written or compared per I/O call. A tuning knob only: the engine's
/// byte stream is chunk-size independent, so any value yields identical files.
pub(crate) const CHUNK_SIZE: usize = 64 * 1024;

/// Removes a dataset tree. Absent trees are a no-op success, so delete can
/// run unconditionally before a fresh generate.
pub fn delete_tree(base_dir: &Path) -> Result<()> {
    let _timing = crate::core::tooling::timings::TimingGuard::new("dataset.delete");
    crate::core::fs::remove_dir_all_writable(base_dir)?;
    tracing::debug!(base_dir = %base_dir.display(), "dataset deleted");
    Ok(())
}
