//! Gemini text-generation client for slot content
//!
//! One blocking `generateContent` round-trip per request, run on a worker
//! thread that reports back to the main loop over an mpsc channel. Every
//! request carries a monotonically increasing id plus the slot id that was
//! active when it was issued, so a stale response can be discarded instead of
//! overwriting newer edits.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

use crate::config::SlotId;

const GEMINI_MODEL: &str = "gemini-2.5-flash";
const API_KEY_ENV: &str = "GEMINI_API_KEY";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// The two-field payload the service is required to return
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratedContent {
    pub headline: String,
    pub subheadline: String,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("topic must not be empty")]
    EmptyTopic,
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned {0}")]
    Status(reqwest::StatusCode),
    #[error("service returned no text")]
    EmptyResponse,
    #[error("malformed generation payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Identity of one in-flight generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    pub id: u64,
    /// Slot that was active when the request was issued; the result is
    /// applied to this slot, not whichever slot is active on arrival
    pub slot_id: SlotId,
}

/// What a worker thread reports back to the main loop
#[derive(Debug)]
pub struct GenerationOutcome {
    pub request: GenerationRequest,
    pub result: Result<GeneratedContent, GenerationError>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn build_prompt(topic: &str) -> String {
    format!(
        "Generate a creative and professional lower third headline and subheadline \
         for a live stream about: \"{topic}\". \
         The headline should be a name or a catchy main title (max 25 chars). \
         The subheadline should be a job title, topic description, or call to action (max 40 chars)."
    )
}

/// Structured-output schema requiring exactly the two string fields
fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "headline": {
                "type": "STRING",
                "description": "The main text, e.g., a name or main topic."
            },
            "subheadline": {
                "type": "STRING",
                "description": "The secondary text, e.g., role or sub-topic."
            }
        },
        "required": ["headline", "subheadline"]
    })
}

/// Parse the candidate text; any shape other than the two required string
/// fields is a parse failure
fn parse_generated(text: &str) -> Result<GeneratedContent, GenerationError> {
    Ok(serde_json::from_str(text)?)
}

fn first_candidate_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.is_empty())
}

/// Blocking generation round-trip; call from a worker thread
pub fn generate(topic: &str) -> Result<GeneratedContent, GenerationError> {
    if topic.trim().is_empty() {
        return Err(GenerationError::EmptyTopic);
    }
    let api_key = std::env::var(API_KEY_ENV).map_err(|_| GenerationError::MissingApiKey)?;

    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{GEMINI_MODEL}:generateContent"
    );
    let body = GenerateContentRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart {
                text: build_prompt(topic),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
        },
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent("lower-third-studio")
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;

    let response = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&body)
        .send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(GenerationError::Status(status));
    }

    let payload: GenerateContentResponse = response.json()?;
    let text = first_candidate_text(payload).ok_or(GenerationError::EmptyResponse)?;
    parse_generated(&text)
}

/// Run a generation request on a worker thread, reporting the outcome over
/// `sender`; the receiving side decides whether the outcome is still current
pub fn spawn_generation(
    topic: String,
    request: GenerationRequest,
    sender: Sender<GenerationOutcome>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        info!(request_id = request.id, slot_id = request.slot_id, topic = %topic, "Generating slot content");
        let result = generate(&topic);
        if let Err(err) = &result {
            error!(request_id = request.id, error = %err, "Generation failed");
        }
        // The receiver is gone when the app quit mid-request; nothing to do
        let _ = sender.send(GenerationOutcome { request, result });
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_prompt_embeds_topic_and_length_guidance() {
        let prompt = build_prompt("Tech News");
        assert!(prompt.contains("\"Tech News\""));
        assert!(prompt.contains("max 25 chars"));
        assert!(prompt.contains("max 40 chars"));
    }

    #[test]
    fn test_schema_requires_both_fields() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, ["headline", "subheadline"]);
        assert_eq!(schema["properties"]["headline"]["type"], "STRING");
        assert_eq!(schema["properties"]["subheadline"]["type"], "STRING");
    }

    #[test]
    fn test_parse_valid_payload() {
        let content =
            parse_generated(r#"{"headline":"Tech Desk","subheadline":"Daily AI Briefing"}"#)
                .unwrap();
        assert_eq!(content.headline, "Tech Desk");
        assert_eq!(content.subheadline, "Daily AI Briefing");
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        assert!(parse_generated(r#"{"headline":"Tech Desk"}"#).is_err());
    }

    #[test]
    fn test_parse_rejects_extra_fields() {
        let payload = r#"{"headline":"A","subheadline":"B","footnote":"C"}"#;
        assert!(parse_generated(payload).is_err());
    }

    #[test]
    fn test_parse_rejects_non_object_payload() {
        assert!(parse_generated("plain text, not JSON").is_err());
        assert!(parse_generated(r#"["headline","subheadline"]"#).is_err());
    }

    #[test]
    fn test_generate_rejects_empty_topic_before_any_io() {
        assert!(matches!(generate(""), Err(GenerationError::EmptyTopic)));
        assert!(matches!(generate("   "), Err(GenerationError::EmptyTopic)));
    }

    #[test]
    fn test_first_candidate_text_handles_empty_response() {
        let empty = GenerateContentResponse { candidates: vec![] };
        assert!(first_candidate_text(empty).is_none());

        let blank = GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts: vec![CandidatePart {
                        text: Some(String::new()),
                    }],
                }),
            }],
        };
        assert!(first_candidate_text(blank).is_none());
    }

    #[test]
    fn test_spawned_request_reports_failure_over_channel() {
        let (tx, rx) = mpsc::channel();
        let request = GenerationRequest { id: 7, slot_id: 3 };
        let handle = spawn_generation(String::new(), request, tx);
        handle.join().unwrap();

        let outcome = rx.recv().unwrap();
        assert_eq!(outcome.request, request);
        assert!(matches!(outcome.result, Err(GenerationError::EmptyTopic)));
    }
}
