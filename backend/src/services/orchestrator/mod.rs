//! Request Orchestrator
//!
//! Maps a task-type tag to a prompt pipeline and drives the generation
//! capability through it, one stage at a time.
//!
//! # Architecture
//! ```text
//! ┌──────────────┐   task + tag   ┌───────────────────┐
//! │   handler    │ ─────────────► │   Orchestrator    │
//! └──────────────┘                └─────────┬─────────┘
//!                                           │ strategy table
//!                                 ┌─────────┴─────────┐
//!                                 ▼                   ▼
//!                           ┌──────────┐       ┌─────────────┐
//!                           │ stages   │       │TextGenerator│
//!                           │ (static) │       │ (Gemini)    │
//!                           └──────────┘       └─────────────┘
//! ```
//!
//! # Supported task types
//! - `generate`: passthrough (default for unrecognized tags)
//! - `identify_persona`: two-stage identify-then-localize pipeline
//! - `refine_task`: single-stage mission-statement rewrite
//!
//! The orchestrator is stateless; nothing survives a request and concurrent
//! requests share no mutable state. Within one request the stages run
//! strictly in order because each stage consumes the previous stage's
//! output.

pub mod strategies;

use serde_json::Value;
use std::sync::Arc;

use crate::services::gemini_client::TextGenerator;
use crate::utils::{ApiError, ApiResult};
use strategies::{OutputFormat, PromptStage, generate, persona, refine};


/// Strategy selector carried in the request body as `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskType {
    Generate,
    IdentifyPersona,
    RefineTask,
}

impl TaskType {
    /// Map a request tag to a task type.
    ///
    /// The tag selects a strategy, it is not validated input: anything
    /// unrecognized falls back to `Generate` rather than erroring.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "identify_persona" => Self::IdentifyPersona,
            "refine_task" => Self::RefineTask,
            _ => Self::Generate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::IdentifyPersona => "identify_persona",
            Self::RefineTask => "refine_task",
        }
    }

    /// Strategy table: task type → prompt pipeline.
    fn stages(&self) -> &'static [PromptStage] {
        match self {
            Self::Generate => generate::STAGES,
            Self::IdentifyPersona => persona::STAGES,
            Self::RefineTask => refine::STAGES,
        }
    }
}

/// Drives a task through its prompt pipeline.
///
/// Holds no per-request state and no credential: the generation backend is
/// injected once at startup. When no backend was configured (missing API
/// key), every run reports the fixed configuration error without issuing
/// any outbound call.
pub struct Orchestrator {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Orchestrator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator: Some(generator) }
    }

    /// An orchestrator with no generation backend configured.
    pub fn without_generator() -> Self {
        Self { generator: None }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Run the pipeline for `task_type`, feeding each stage the previous
    /// stage's post-processed output. The first stage receives the task
    /// description itself.
    pub async fn run(&self, task_type: TaskType, task: &str) -> ApiResult<String> {
        let generator = self.generator.as_ref().ok_or(ApiError::ApiKeyMissing)?;

        let stages = task_type.stages();
        let mut input = task.to_string();

        for (index, stage) in stages.iter().enumerate() {
            let prompt = (stage.build_prompt)(&input);
            tracing::debug!(
                "Running {} stage {}/{}",
                task_type.as_str(),
                index + 1,
                stages.len()
            );

            input = match stage.output {
                OutputFormat::PlainTrimmed => {
                    generator.generate(&prompt).await?.trim().to_string()
                }
                OutputFormat::JsonField(field) => {
                    let value = generator.generate_structured(&prompt).await?;
                    extract_string_field(&value, field)?.trim().to_string()
                }
            };
        }

        Ok(input)
    }
}

fn extract_string_field(value: &Value, field: &str) -> ApiResult<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ApiError::malformed_output(format!("missing string field \"{}\" in model output", field))
        })
}
