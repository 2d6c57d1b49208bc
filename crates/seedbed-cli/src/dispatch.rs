use color_eyre::Result;
use seedbed_core::progress::ProgressReporter;
use seedbed_core::{
    CommandKind, DeleteRequest, ExecutionOutcome, GenerateRequest, VerifyRequest,
};
use serde_json::json;

use crate::cli::{CommandCli, DeleteArgs, GenerateArgs, VerifyArgs};

pub fn dispatch_command(command: &CommandCli) -> Result<(CommandKind, ExecutionOutcome)> {
    match command {
        CommandCli::Generate(args) => {
            let request = generate_request_from_args(args);
            core_call(CommandKind::Generate, || {
                seedbed_core::dataset_generate(&request)
            })
        }
        CommandCli::Verify(args) => {
            let request = verify_request_from_args(args);
            core_call(CommandKind::Verify, || seedbed_core::dataset_verify(&request))
        }
        CommandCli::Delete(args) => {
            let request = delete_request_from_args(args);
            core_call(CommandKind::Delete, || seedbed_core::dataset_delete(&request))
        }
    }
}

fn generate_request_from_args(args: &GenerateArgs) -> GenerateRequest {
    GenerateRequest {
        base_dir: args.base_dir.clone(),
        size_gb: args.size_gb,
        master_seed: args.seed,
        jobs: args.jobs,
        dry_run: args.dry_run,
    }
}

fn verify_request_from_args(args: &VerifyArgs) -> VerifyRequest {
    VerifyRequest {
        base_dir: args.base_dir.clone(),
        size_gb: args.size_gb,
        master_seed: args.seed,
        content: args.content,
    }
}

fn delete_request_from_args(args: &DeleteArgs) -> DeleteRequest {
    DeleteRequest {
        base_dir: args.base_dir.clone(),
    }
}

fn core_call<F>(command: CommandKind, action: F) -> Result<(CommandKind, ExecutionOutcome)>
where
    F: FnOnce() -> anyhow::Result<ExecutionOutcome>,
{
    let _spinner = ProgressReporter::spinner(format!("Running {command}"));
    match action() {
        Ok(outcome) => Ok((command, outcome)),
        Err(err) => {
            let issues: Vec<String> = err.chain().map(std::string::ToString::to_string).collect();
            Ok((
                command,
                ExecutionOutcome::failure(
                    err.to_string(),
                    json!({
                        "reason": "internal_error",
                        "error": err.to_string(),
                        "issues": issues,
                        "hint": "Re-run with --trace for more detail.",
                    }),
                ),
            ))
        }
    }
}
