//! Task refinement strategy
//!
//! Rewrites a raw user request into a polished Hebrew mission statement the
//! downstream prompt builder can use as-is.

use super::{OutputFormat, PromptStage};

pub const STAGES: &[PromptStage] =
    &[PromptStage { build_prompt: build_refine_prompt, output: OutputFormat::PlainTrimmed }];

pub fn build_refine_prompt(task: &str) -> String {
    format!(
        r#"Rewrite the following raw request as a polished, detailed mission statement in Hebrew.
State the goal directly as an instruction, not as a description of the request.
If a target audience is mentioned, incorporate it naturally.
Add the context, constraints, and quality standards that can reasonably be inferred, so the statement is actionable on its own.
Return only the mission statement.

Raw request: "{task}""#
    )
}
