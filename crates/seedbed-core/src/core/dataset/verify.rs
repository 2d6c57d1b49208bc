use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use seedbed_domain::TreeLayout;

use super::CHUNK_SIZE;
use crate::core::engine::Mulberry32;
use crate::core::tooling::timings::TimingGuard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyMode {
    /// Presence and exact size of every expected file. The historical check:
    /// fast, but a corrupted file of the right size passes.
    Structural,
    /// Structural plus a byte-for-byte comparison against the recomputed
    /// stream for each file.
    Content,
}

/// First expectation the tree failed to meet. Paths are relative to the base
/// directory; verification stops at the first failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyFailure {
    #[error("missing file {path}")]
    Missing { path: Utf8PathBuf },
    #[error("{path}: expected {expected} bytes, found {actual}")]
    SizeMismatch {
        path: Utf8PathBuf,
        expected: u64,
        actual: u64,
    },
    #[error("{path}: content mismatch at byte {offset}")]
    ContentMismatch { path: Utf8PathBuf, offset: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// Files confirmed before the walk stopped.
    pub files: u64,
    /// Bytes accounted for by the confirmed files.
    pub bytes: u64,
    pub failure: Option<VerifyFailure>,
}

impl VerifyReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }
}

/// Walks the expected path set in traversal order and checks each file
/// against the layout. Read-only; safe to re-run any number of times. A
/// mismatch is a structured report, not an error; I/O failures other than
/// a missing path are errors.
pub fn verify_tree(base_dir: &Path, layout: &TreeLayout, mode: VerifyMode) -> Result<VerifyReport> {
    let _timing = TimingGuard::new("dataset.verify");

    let mut files = 0u64;
    let mut bytes = 0u64;
    for position in layout.files() {
        let rel = position.rel_path();
        let path = base_dir.join(rel.as_std_path());
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(VerifyReport {
                    files,
                    bytes,
                    failure: Some(VerifyFailure::Missing { path: rel }),
                });
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to stat {}", path.display()))
            }
        };
        if meta.len() != layout.file_size {
            return Ok(VerifyReport {
                files,
                bytes,
                failure: Some(VerifyFailure::SizeMismatch {
                    path: rel,
                    expected: layout.file_size,
                    actual: meta.len(),
                }),
            });
        }
        if mode == VerifyMode::Content {
            if let Some(offset) =
                first_content_mismatch(&path, position.seed(layout.master_seed), layout.file_size)?
            {
                return Ok(VerifyReport {
                    files,
                    bytes,
                    failure: Some(VerifyFailure::ContentMismatch { path: rel, offset }),
                });
            }
        }
        files += 1;
        bytes += meta.len();
    }

    tracing::debug!(base_dir = %base_dir.display(), files, bytes, "dataset verified");
    Ok(VerifyReport {
        files,
        bytes,
        failure: None,
    })
}

/// Recomputes the file's stream and returns the offset of the first byte
/// that differs, if any.
fn first_content_mismatch(path: &Path, seed: u32, size: u64) -> Result<Option<u64>> {
    let mut engine = Mulberry32::new(seed);
    let mut expected = vec![0u8; CHUNK_SIZE];
    let mut actual = vec![0u8; CHUNK_SIZE];
    let mut file =
        fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    let mut offset = 0u64;
    while offset < size {
        let len = (size - offset).min(CHUNK_SIZE as u64) as usize;
        file.read_exact(&mut actual[..len])
            .with_context(|| format!("failed to read {}", path.display()))?;
        engine.fill(&mut expected[..len]);
        if let Some(pos) = expected[..len]
            .iter()
            .zip(&actual[..len])
            .position(|(want, got)| want != got)
        {
            return Ok(Some(offset + pos as u64));
        }
        offset += len as u64;
    }
    Ok(None)
}
