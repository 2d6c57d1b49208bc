use std::fmt;

use serde_json::{json, Value};

use crate::core::tooling::outcome::{CommandStatus, ExecutionOutcome};

mod dataset;

pub use dataset::{
    dataset_delete, dataset_generate, dataset_verify, DeleteRequest, GenerateRequest,
    VerifyRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Generate,
    Verify,
    Delete,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::Generate => "generate",
            CommandKind::Verify => "verify",
            CommandKind::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[must_use]
pub fn format_status_message(command: CommandKind, message: &str) -> String {
    let prefix = format!("seedbed {command}");
    if message.is_empty() {
        prefix
    } else if message.starts_with(&prefix) {
        message.to_string()
    } else {
        format!("{prefix}: {message}")
    }
}

#[must_use]
pub fn to_json_response(command: CommandKind, outcome: &ExecutionOutcome) -> Value {
    let status = match outcome.status {
        CommandStatus::Ok => "ok",
        CommandStatus::UserError => "user-error",
        CommandStatus::Failure => "error",
    };
    let details = match &outcome.details {
        Value::Object(_) => outcome.details.clone(),
        Value::Null => json!({}),
        other => json!({ "value": other }),
    };
    json!({
        "status": status,
        "message": format_status_message(command, &outcome.message),
        "details": details,
    })
}
