//! Wire types for the `generateContent` endpoint.

use interview_domain::{ContextEntry, SamplingConfig};
use serde::{Deserialize, Serialize};

const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";
const SAFETY_CATEGORIES: [&str; 2] = ["HARM_CATEGORY_HARASSMENT", "HARM_CATEGORY_HATE_SPEECH"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerateRequest {
    pub fn new(entries: &[ContextEntry], sampling: &SamplingConfig) -> Self {
        Self {
            contents: entries.iter().map(Content::from).collect(),
            generation_config: GenerationConfig::from(sampling),
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: SAFETY_THRESHOLD,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl From<&ContextEntry> for Content {
    fn from(entry: &ContextEntry) -> Self {
        Self {
            role: Some(entry.role.as_str().to_string()),
            parts: vec![Part {
                text: Some(entry.text.clone()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl From<&SamplingConfig> for GenerationConfig {
    fn from(sampling: &SamplingConfig) -> Self {
        Self {
            temperature: sampling.temperature,
            top_k: sampling.top_k,
            top_p: sampling.top_p,
            max_output_tokens: sampling.max_output_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(self) -> Result<String, String> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| "response has no candidates".to_string())?;
        let finish = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        candidate
            .content
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| format!("candidate has no text (finish reason: {finish})"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> GenerateResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_request_shape() {
        let entries = vec![ContextEntry::user("instruction"), ContextEntry::model("Hi!")];
        let request = GenerateRequest::new(&entries, &SamplingConfig::ASSESSMENT);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "instruction");
        assert_eq!(value["contents"][1]["role"], "model");
        assert_eq!(value["generationConfig"]["topK"], 20);
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 300);
        assert!(value["generationConfig"].get("top_k").is_none());
        assert_eq!(value["safetySettings"].as_array().unwrap().len(), 2);
        assert_eq!(
            value["safetySettings"][1]["category"],
            "HARM_CATEGORY_HATE_SPEECH"
        );
        assert_eq!(
            value["safetySettings"][0]["threshold"],
            "BLOCK_MEDIUM_AND_ABOVE"
        );
    }

    #[test]
    fn test_first_text() {
        let response = parse(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello"},{"text":"ignored"}]},"finishReason":"STOP"}]}"#,
        );
        assert_eq!(response.first_text().unwrap(), "Hello");
    }

    #[test]
    fn test_first_text_missing_pieces() {
        assert!(parse(r#"{}"#).first_text().is_err());
        assert!(parse(r#"{"candidates":[]}"#).first_text().is_err());
        assert!(
            parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#)
                .first_text()
                .unwrap_err()
                .contains("SAFETY")
        );
        assert!(
            parse(r#"{"candidates":[{"content":{"parts":[]}}]}"#)
                .first_text()
                .is_err()
        );
    }
}
