//! Prompt strategies
//!
//! One module per task type. A strategy is a static pipeline of
//! [`PromptStage`]s: each stage builds a prompt from its input and declares
//! how its raw model output is post-processed. Revising a template only
//! touches the owning module, never the dispatch logic.

pub mod generate;
pub mod persona;
pub mod refine;

/// How a stage's raw model output becomes the stage result (and the input
/// of the next stage, if any).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Free text, trimmed of surrounding whitespace
    PlainTrimmed,
    /// Structured-output mode: parse as JSON and extract the named string
    /// field. A malformed result is a hard failure, never a raw-text
    /// fallback.
    JsonField(&'static str),
}

/// A single model call within a task pipeline.
pub struct PromptStage {
    pub build_prompt: fn(&str) -> String,
    pub output: OutputFormat,
}
