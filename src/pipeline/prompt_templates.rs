//! Interpretation prompt handed to the downstream LLM step.
//!
//! This module only renders the request; it never talks to a model.

use serde::{Deserialize, Serialize};

use crate::pipeline::extraction::ExtractedDocument;

pub const INTERPRETATION_SYSTEM_PROMPT: &str =
    "Analyze the following lab test results carefully.";

/// Chat role as understood by OpenAI-compatible completion APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Request body for a chat completion: model id plus system and user messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationPrompt {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Build the user message asking for a structured lab interpretation.
pub fn build_interpretation_user_prompt(doc: &ExtractedDocument) -> String {
    format!(
        r#"You are a medical assistant experienced in reading comprehensive lab panels, including blood and urine markers.
Write a detailed, structured interpretation of the lab data below. Cover:
- a general explanation of the panel
- key findings
- how the markers relate to each other
- possible causes and health implications
- next steps and recommendations
- a short conclusion

### Patient Information
- Patient's Name: {name}
- Test Date: {date}

Base the analysis on the whole report. If every marker is within range, still give practical health tips.

### Lab Test Data
{text}
"#,
        name = doc.patient_name,
        date = doc.test_date,
        text = doc.raw_text,
    )
}

/// Assemble the full chat request for `model`.
pub fn build_interpretation_prompt(doc: &ExtractedDocument, model: &str) -> InterpretationPrompt {
    InterpretationPrompt {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: ChatRole::System,
                content: INTERPRETATION_SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: ChatRole::User,
                content: build_interpretation_user_prompt(doc),
            },
        ],
    }
}
