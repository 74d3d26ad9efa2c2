//! GeminiClient - Direct REST implementation of the two generation stages.
//!
//! Calls `models/{model}:generateContent` once per operation. No retry, no
//! streaming.

use crate::prompts::{SYSTEM_INSTRUCTION, build_idea_prompt};
use architect_core::error::{ArchitectError, Result, ValidationError};
use architect_core::prompt::{PromptGenerator, SuperPromptRequest};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Nucleus sampling applied to both stages.
pub const TOP_P: f32 = 0.95;
/// Temperature of the execution stage.
pub const EXECUTION_TEMPERATURE: f32 = 0.7;

pub const GENERATION_FALLBACK: &str = "Could not generate the prompt. Please try again.";
pub const EXECUTION_FALLBACK: &str = "No response generated.";

const API_KEY_HEADER: &str = "x-goog-api-key";

const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Client for the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Creates a client for `model` against the public endpoint.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: BASE_URL.to_string(),
            model: model.into(),
        }
    }

    /// Creates a client with a request timeout.
    pub fn with_timeout(model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ArchitectError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
            model: model.into(),
        })
    }

    /// Overrides the endpoint base (e.g. a proxy or regional endpoint).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, api_key: &str, body: &GenerateContentRequest) -> Result<Option<String>> {
        if api_key.trim().is_empty() {
            return Err(ValidationError::MissingCredential.into());
        }

        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| ArchitectError::service(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| ArchitectError::service(format!("Failed to parse Gemini response: {err}")))?;

        Ok(extract_text(parsed))
    }
}

/// Request body for the super-prompt stage.
pub(crate) fn super_prompt_body(request: &SuperPromptRequest) -> GenerateContentRequest {
    let mut parts = vec![Part::Text {
        text: build_idea_prompt(request),
    }];
    parts.extend(request.attachments.iter().map(|attachment| Part::InlineData {
        inline_data: InlineDataPayload {
            mime_type: attachment.mime_type.clone(),
            data: attachment.payload.clone(),
        },
    }));

    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts,
        }],
        system_instruction: Some(SystemInstruction {
            parts: vec![Part::Text {
                text: SYSTEM_INSTRUCTION.to_string(),
            }],
        }),
        generation_config: GenerationConfig {
            temperature: request.creativity.temperature(),
            top_p: TOP_P,
        },
        safety_settings: safety_settings(),
    }
}

/// Request body for the execution stage: the prompt is the whole input.
pub(crate) fn execution_body(super_prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part::Text {
                text: super_prompt.to_string(),
            }],
        }],
        system_instruction: None,
        generation_config: GenerationConfig {
            temperature: EXECUTION_TEMPERATURE,
            top_p: TOP_P,
        },
        safety_settings: safety_settings(),
    }
}

fn safety_settings() -> Vec<SafetySetting> {
    HARM_CATEGORIES
        .iter()
        .map(|category| SafetySetting {
            category: category.to_string(),
            threshold: "BLOCK_ONLY_HIGH".to_string(),
        })
        .collect()
}

#[async_trait]
impl PromptGenerator for GeminiClient {
    async fn generate_super_prompt(
        &self,
        api_key: &str,
        request: &SuperPromptRequest,
    ) -> Result<String> {
        let body = super_prompt_body(request);
        tracing::info!(
            model = %self.model,
            style = %request.style,
            creativity = %request.creativity,
            attachments = request.attachments.len(),
            "Requesting super prompt"
        );

        match self.send_request(api_key, &body).await {
            Ok(Some(text)) => Ok(text),
            Ok(None) => {
                tracing::warn!("Gemini returned no text for super prompt; using fallback");
                Ok(GENERATION_FALLBACK.to_string())
            }
            Err(e) => {
                tracing::error!("Error calling Gemini API: {}", e);
                Err(e)
            }
        }
    }

    async fn execute_prompt(&self, api_key: &str, super_prompt: &str) -> Result<String> {
        let body = execution_body(super_prompt);
        tracing::info!(model = %self.model, chars = super_prompt.len(), "Executing super prompt");

        match self.send_request(api_key, &body).await {
            Ok(Some(text)) => Ok(text),
            Ok(None) => {
                tracing::warn!("Gemini returned no text for execution; using fallback");
                Ok(EXECUTION_FALLBACK.to_string())
            }
            Err(e) => {
                tracing::error!("Error executing prompt: {}", e);
                Err(e)
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: String,
    threshold: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Concatenates the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates?.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|part| part.text).collect();
    (!text.is_empty()).then_some(text)
}

fn map_http_error(status: StatusCode, body: String) -> ArchitectError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    ArchitectError::service(format!("HTTP {}: {}", status.as_u16(), message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use architect_core::attachment;
    use architect_core::prompt::{CreativityLevel, PromptStyle};
    use serde_json::json;

    fn cold_call_request() -> SuperPromptRequest {
        SuperPromptRequest {
            idea: "Write a cold-call script".into(),
            style: PromptStyle::SalesMarketing,
            creativity: CreativityLevel::Medium,
            attachments: vec![attachment::encode("deck.pdf", "application/pdf", b"%PDF").unwrap()],
        }
    }

    #[test]
    fn super_prompt_body_shape() {
        let body = serde_json::to_value(super_prompt_body(&cold_call_request())).unwrap();

        assert_eq!(body["generationConfig"]["temperature"], json!(0.5));
        assert_eq!(body["generationConfig"]["topP"], json!(0.95_f32));
        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("[OUTPUT FORMAT]"));

        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts[0]["text"].as_str().unwrap().contains("cold-call"));
        assert_eq!(parts[1]["inlineData"]["mimeType"], "application/pdf");
        assert_eq!(parts[1]["inlineData"]["data"], "JVBERg==");
    }

    #[test]
    fn temperature_follows_creativity() {
        for (level, expected) in [
            (CreativityLevel::Low, 0.2_f32),
            (CreativityLevel::Medium, 0.5),
            (CreativityLevel::High, 0.9),
        ] {
            let mut request = cold_call_request();
            request.creativity = level;
            assert_eq!(super_prompt_body(&request).generation_config.temperature, expected);
        }
    }

    #[test]
    fn execution_body_has_no_system_instruction() {
        let body = serde_json::to_value(execution_body("[PERSONA]\nYou are...")).unwrap();
        assert!(body.get("systemInstruction").is_none());
        assert_eq!(body["generationConfig"]["temperature"], json!(0.7_f32));
        assert_eq!(body["contents"][0]["parts"][0]["text"], "[PERSONA]\nYou are...");
    }

    #[test]
    fn safety_settings_block_only_high() {
        let body = serde_json::to_value(execution_body("x")).unwrap();
        let settings = body["safetySettings"].as_array().unwrap();
        assert_eq!(settings.len(), 4);
        assert!(settings.iter().all(|s| s["threshold"] == "BLOCK_ONLY_HIGH"));
        let categories: Vec<&str> = settings
            .iter()
            .map(|s| s["category"].as_str().unwrap())
            .collect();
        assert!(categories.contains(&"HARM_CATEGORY_SEXUALLY_EXPLICIT"));
    }

    #[test]
    fn extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "[PERSONA]\n" }, { "text": "Expert" }] } }]
        }))
        .unwrap();
        assert_eq!(extract_text(response).as_deref(), Some("[PERSONA]\nExpert"));
    }

    #[test]
    fn extract_text_none_when_blocked() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [{ "finishReason": "SAFETY" }] })).unwrap();
        assert!(extract_text(response).is_none());

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(extract_text(empty).is_none());
    }

    #[test]
    fn http_errors_become_service_errors() {
        let body = json!({ "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" } });
        let err = map_http_error(StatusCode::FORBIDDEN, body.to_string());
        assert!(err.is_service());
        assert!(err.to_string().contains("PERMISSION_DENIED: API key not valid"));

        let err = map_http_error(StatusCode::BAD_GATEWAY, "<html>".to_string());
        assert!(err.to_string().contains("HTTP 502: <html>"));
    }

    #[tokio::test]
    async fn empty_credential_fails_without_request() {
        let client = GeminiClient::new(DEFAULT_GEMINI_MODEL).with_base_url("http://127.0.0.1:9");
        let err = client.execute_prompt("  ", "prompt").await.unwrap_err();
        assert_eq!(err.as_validation(), Some(ValidationError::MissingCredential));
    }
}
