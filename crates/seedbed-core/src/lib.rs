mod core;

pub use crate::core::commands::{
    dataset_delete, dataset_generate, dataset_verify, format_status_message, to_json_response,
    CommandKind, DeleteRequest, GenerateRequest, VerifyRequest,
};
pub use crate::core::dataset::{
    delete_tree, generate_tree, verify_tree, GenerateSummary, VerifyFailure, VerifyMode,
    VerifyReport,
};
pub use crate::core::engine::Mulberry32;
pub use crate::core::tooling::outcome::{CommandStatus, ExecutionOutcome};

pub mod progress {
    pub use crate::core::tooling::progress::ProgressReporter;
}
