//! Persona identification strategy
//!
//! Two sequential model calls. Stage 1 reasons about which persona the
//! request implies and answers in English, where the model is most reliable.
//! Stage 2 is a lookup: it maps the English label to its conventional Hebrew
//! spelling through structured-output mode. Splitting the calls keeps the
//! reasoning step and the translation step from degrading each other.

use super::{OutputFormat, PromptStage};

pub const STAGES: &[PromptStage] = &[
    PromptStage { build_prompt: build_identify_prompt, output: OutputFormat::PlainTrimmed },
    PromptStage {
        build_prompt: build_localize_prompt,
        output: OutputFormat::JsonField(TRANSLATION_FIELD),
    },
];

/// Field the localization stage must return in its JSON result.
pub const TRANSLATION_FIELD: &str = "translation";

pub fn build_identify_prompt(task: &str) -> String {
    format!(
        r#"Analyze the following user request and identify the single most suitable persona, character, or specific style for generating a response.
Return ONLY the name of the persona or style, in 1-5 words, in English, with no explanation.
If the request directly or indirectly implies a specific, iconic figure, prefer that figure.
For example, a request for an epic poem about a mythological hero should return "Homer" rather than "Greek epic poet".
Fall back to a general role or style label only when no specific figure is implied, e.g. "a pirate" for "explain this like a pirate".

User request: "{task}"

Identified Persona/Style:"#
    )
}

pub fn build_localize_prompt(persona: &str) -> String {
    format!(
        r#"Translate the following persona or style name into Hebrew.
Use the standard, conventional Hebrew spelling for this name, without niqqud (vowel marks).
Respond with JSON only, in exactly this shape: {{"{TRANSLATION_FIELD}": "<Hebrew spelling>"}}

Persona/Style: "{persona}""#
    )
}
