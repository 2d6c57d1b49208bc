use std::path::PathBuf;

use anyhow::Result;
use serde_json::json;
use seedbed_domain::TreeLayout;

use crate::core::dataset::{
    delete_tree, generate_tree, verify_tree, VerifyFailure, VerifyMode,
};
use crate::core::tooling::outcome::ExecutionOutcome;

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub base_dir: PathBuf,
    pub size_gb: u32,
    pub master_seed: u32,
    pub jobs: Option<usize>,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct VerifyRequest {
    pub base_dir: PathBuf,
    pub size_gb: u32,
    pub master_seed: u32,
    pub content: bool,
}

#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub base_dir: PathBuf,
}

/// Materializes the standard tree for the requested size.
///
/// # Errors
/// Returns an error if directories or files cannot be created or written.
pub fn dataset_generate(request: &GenerateRequest) -> Result<ExecutionOutcome> {
    let layout = TreeLayout::standard(request.size_gb).with_master_seed(request.master_seed);

    if request.dry_run {
        return Ok(ExecutionOutcome::success(
            format!(
                "would generate {} files ({}) under {}",
                layout.file_count(),
                format_bytes(layout.total_bytes()),
                request.base_dir.display()
            ),
            json!({
                "base_dir": request.base_dir.display().to_string(),
                "size_gb": request.size_gb,
                "files": layout.file_count(),
                "bytes": layout.total_bytes(),
                "master_seed": seed_hex(request.master_seed),
                "dry_run": true,
            }),
        ));
    }

    let jobs = worker_count(request.jobs, layout.file_count());
    let summary = generate_tree(&request.base_dir, &layout, jobs)?;
    Ok(ExecutionOutcome::success(
        format!(
            "generated {} files ({}) under {}",
            summary.files,
            format_bytes(summary.bytes),
            request.base_dir.display()
        ),
        json!({
            "base_dir": request.base_dir.display().to_string(),
            "size_gb": request.size_gb,
            "files": summary.files,
            "bytes": summary.bytes,
            "master_seed": seed_hex(request.master_seed),
            "jobs": jobs,
        }),
    ))
}

/// Checks the tree against the expected shape; `content` additionally
/// recompares every byte. A mismatch is a failure outcome, not an error.
///
/// # Errors
/// Returns an error only for I/O problems other than missing files.
pub fn dataset_verify(request: &VerifyRequest) -> Result<ExecutionOutcome> {
    let layout = TreeLayout::standard(request.size_gb).with_master_seed(request.master_seed);
    let mode = if request.content {
        VerifyMode::Content
    } else {
        VerifyMode::Structural
    };

    let report = verify_tree(&request.base_dir, &layout, mode)?;
    match report.failure {
        None => Ok(ExecutionOutcome::success(
            format!(
                "verified {} files ({}) under {}",
                report.files,
                format_bytes(report.bytes),
                request.base_dir.display()
            ),
            json!({
                "base_dir": request.base_dir.display().to_string(),
                "size_gb": request.size_gb,
                "files": report.files,
                "bytes": report.bytes,
                "content_checked": request.content,
            }),
        )),
        Some(failure) => {
            const HINT: &str =
                "Run `seedbed delete` then `seedbed generate` to rebuild the dataset.";
            let base_dir = request.base_dir.display().to_string();
            let details = match &failure {
                VerifyFailure::Missing { path } => json!({
                    "base_dir": base_dir,
                    "size_gb": request.size_gb,
                    "files_checked": report.files,
                    "reason": "missing_file",
                    "path": path.as_str(),
                    "hint": HINT,
                }),
                VerifyFailure::SizeMismatch {
                    path,
                    expected,
                    actual,
                } => json!({
                    "base_dir": base_dir,
                    "size_gb": request.size_gb,
                    "files_checked": report.files,
                    "reason": "size_mismatch",
                    "path": path.as_str(),
                    "expected_bytes": expected,
                    "actual_bytes": actual,
                    "hint": HINT,
                }),
                VerifyFailure::ContentMismatch { path, offset } => json!({
                    "base_dir": base_dir,
                    "size_gb": request.size_gb,
                    "files_checked": report.files,
                    "reason": "content_mismatch",
                    "path": path.as_str(),
                    "offset": offset,
                    "hint": HINT,
                }),
            };
            Ok(ExecutionOutcome::failure(failure.to_string(), details))
        }
    }
}

/// Removes the dataset tree; an absent tree is still a success.
///
/// # Errors
/// Returns an error if the tree exists but cannot be removed.
pub fn dataset_delete(request: &DeleteRequest) -> Result<ExecutionOutcome> {
    let existed = request.base_dir.exists();
    delete_tree(&request.base_dir)?;
    let message = if existed {
        format!("deleted {}", request.base_dir.display())
    } else {
        format!("nothing to delete at {}", request.base_dir.display())
    };
    Ok(ExecutionOutcome::success(
        message,
        json!({
            "base_dir": request.base_dir.display().to_string(),
            "existed": existed,
        }),
    ))
}

fn seed_hex(seed: u32) -> String {
    format!("0x{seed:08X}")
}

fn worker_count(requested: Option<usize>, total_files: u64) -> usize {
    let env_requested = std::env::var("SEEDBED_JOBS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok());
    let available = std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(4)
        .max(1);
    let max_workers = requested.or(env_requested).unwrap_or(available).clamp(1, 16);
    let total = usize::try_from(total_files).unwrap_or(usize::MAX);
    max_workers.min(total.max(1))
}

fn format_bytes(bytes: u64) -> String {
    const GIB: u64 = 1024 * 1024 * 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes >= GIB && bytes % GIB == 0 {
        format!("{} GiB", bytes / GIB)
    } else if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MiB", bytes / MIB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use seedbed_domain::DEFAULT_MASTER_SEED;

    use super::*;
    use crate::core::tooling::outcome::CommandStatus;

    #[test]
    fn dry_run_reports_the_plan_without_touching_disk() {
        let temp = tempfile::tempdir().expect("tempdir");
        let base = temp.path().join("data");
        let outcome = dataset_generate(&GenerateRequest {
            base_dir: base.clone(),
            size_gb: 3,
            master_seed: DEFAULT_MASTER_SEED,
            jobs: None,
            dry_run: true,
        })
        .expect("dry run");

        assert_eq!(outcome.status, CommandStatus::Ok);
        assert_eq!(outcome.details["files"], 1500);
        assert_eq!(outcome.details["bytes"], 3u64 * 1024 * 1024 * 1024);
        assert_eq!(outcome.details["master_seed"], "0xDEADBEEF");
        assert!(!base.exists(), "dry run must not create the tree");
    }

    #[test]
    fn verify_of_an_absent_tree_is_a_structured_failure() {
        let temp = tempfile::tempdir().expect("tempdir");
        let outcome = dataset_verify(&VerifyRequest {
            base_dir: temp.path().join("missing"),
            size_gb: 1,
            master_seed: DEFAULT_MASTER_SEED,
            content: false,
        })
        .expect("verify");

        assert_eq!(outcome.status, CommandStatus::Failure);
        assert_eq!(outcome.details["reason"], "missing_file");
        assert_eq!(outcome.details["path"], "dir_0/sub_0/leaf_0/data_0.bin");
        assert_eq!(outcome.details["files_checked"], 0);
    }

    #[test]
    fn delete_of_an_absent_tree_succeeds() {
        let temp = tempfile::tempdir().expect("tempdir");
        let outcome = dataset_delete(&DeleteRequest {
            base_dir: temp.path().join("missing"),
        })
        .expect("delete");

        assert_eq!(outcome.status, CommandStatus::Ok);
        assert_eq!(outcome.details["existed"], false);
    }

    #[test]
    fn worker_count_respects_request_and_clamp() {
        assert_eq!(worker_count(Some(4), 500), 4);
        assert_eq!(worker_count(Some(64), 500), 16);
        assert_eq!(worker_count(Some(0), 500), 1);
        // Never more workers than files.
        assert_eq!(worker_count(Some(8), 2), 2);
    }

    #[test]
    fn byte_counts_format_exactly() {
        assert_eq!(format_bytes(1_073_741_824), "1 GiB");
        assert_eq!(format_bytes(5 * 1_073_741_824), "5 GiB");
        assert_eq!(format_bytes(2 * 1024 * 1024), "2 MiB");
        assert_eq!(format_bytes(1000), "1000 B");
    }
}
