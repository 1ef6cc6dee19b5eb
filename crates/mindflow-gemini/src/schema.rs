// SPDX-FileCopyrightText: 2026 Mindflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The analysis contract sent to the model and the strict parser for its reply.

use mindflow_core::{AnalysisResult, MindflowError};
use serde_json::{Value, json};

/// Persona and task description sent as the system instruction.
pub const SYSTEM_INSTRUCTION: &str = "\
You are Mindflow, an empathetic AI journaling assistant. \
Analyze journal entries to identify sentiment, emotions, and potential triggers. \
Provide a concise summary and constructive, personalized wellness suggestions \
to help the user understand their thoughts and feelings. \
Respond with a JSON object that follows the specified schema.";

/// MIME type that switches the model into structured JSON output.
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Builds the user turn for one journal entry.
pub fn analysis_prompt(text: &str) -> String {
    format!("Analyze the following journal entry: \"{text}\"")
}

/// Output schema in the Gemini OpenAPI subset.
///
/// All five fields are required and `sentiment` is limited to the three
/// values [`mindflow_core::Sentiment`] accepts.
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sentiment": {
                "type": "STRING",
                "enum": ["Positive", "Negative", "Neutral"],
                "description": "The overall sentiment of the journal entry."
            },
            "emotions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of 2-5 primary emotions detected in the text (e.g., Joy, Sadness, Anger, Fear, Surprise)."
            },
            "triggers": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of 1-3 potential emotional triggers mentioned in the text (e.g., 'Work stress', 'Family conflict', 'Positive social interaction')."
            },
            "suggestions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of 2-3 actionable, personalized coping strategies or wellness suggestions based on the entry's content."
            },
            "summary": {
                "type": "STRING",
                "description": "A concise, one-sentence summary of the journal entry."
            }
        },
        "required": ["sentiment", "emotions", "triggers", "suggestions", "summary"]
    })
}

/// Parses the model's raw text into an [`AnalysisResult`].
///
/// Anything short of a complete, well-typed object is a
/// [`MindflowError::MalformedResponse`]; no field is ever defaulted.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, MindflowError> {
    let trimmed = strip_code_fence(raw.trim());
    serde_json::from_str::<AnalysisResult>(trimmed).map_err(|e| MindflowError::MalformedResponse {
        message: format!("analysis did not match schema: {e}"),
    })
}

/// Removes a surrounding Markdown code fence, which some models add even in
/// JSON mode.
fn strip_code_fence(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
