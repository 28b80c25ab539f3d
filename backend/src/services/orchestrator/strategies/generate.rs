//! Default passthrough strategy
//!
//! Used for quick-builder requests and for any unrecognized task-type tag:
//! the task description goes to the model unmodified.

use super::{OutputFormat, PromptStage};

pub const STAGES: &[PromptStage] =
    &[PromptStage { build_prompt: passthrough, output: OutputFormat::PlainTrimmed }];

fn passthrough(task: &str) -> String {
    task.to_string()
}
