pub mod gemini_client;
pub mod orchestrator;

pub use gemini_client::{GeminiClient, TextGenerator};
pub use orchestrator::{Orchestrator, TaskType};
