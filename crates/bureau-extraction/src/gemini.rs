use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use bureau_core::config::GeminiConfig;
use bureau_core::error::{BureauError, Result};
use bureau_core::inference::InferenceClient;

/// Inference adapter for the Gemini `generateContent` REST endpoint.
///
/// Documents are sent inline (base64) next to the instruction text. Every failure is
/// reported as [`BureauError::Inference`]; nothing is retried here.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_url: String,
}

// ── Gemini generateContent request/response types ──────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

// ── Implementation ─────────────────────────────────────────────────────────

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| BureauError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }

    fn response_text(response: GenerateContentResponse) -> Result<String> {
        let candidate = match response.candidates.into_iter().next() {
            Some(c) => c,
            None => {
                let reason = response
                    .prompt_feedback
                    .and_then(|f| f.block_reason)
                    .unwrap_or_else(|| "no candidates returned".to_string());
                return Err(BureauError::Inference(format!(
                    "Gemini returned no candidates: {reason}"
                )));
            }
        };

        let parts: Vec<String> = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        // A blank reply is still a reply; the parser reports it.
        if parts.is_empty() {
            return Err(BureauError::Inference(format!(
                "Gemini response contained no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(parts.concat())
    }
}

#[async_trait]
impl InferenceClient for GeminiClient {
    async fn infer(&self, instruction: &str, document: &[u8], mime_type: &str) -> Result<String> {
        if self.api_key.trim().is_empty() {
            return Err(BureauError::Inference(
                "GEMINI_API_KEY is not configured".to_string(),
            ));
        }
        if instruction.trim().is_empty() {
            return Err(BureauError::Inference("instruction is empty".to_string()));
        }
        if document.is_empty() {
            return Err(BureauError::Inference("document is empty".to_string()));
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    RequestPart::Text { text: instruction },
                    RequestPart::InlineData {
                        inline_data: InlineData {
                            mime_type,
                            data: base64::engine::general_purpose::STANDARD.encode(document),
                        },
                    },
                ],
            }],
        };

        tracing::debug!(
            model = %self.model,
            mime_type = %mime_type,
            document_len = document.len(),
            "Sending generateContent request to Gemini"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| BureauError::Inference(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(BureauError::Inference(format!(
                "Gemini API returned status {status}: {body}"
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| BureauError::Inference(format!("Failed to decode API response: {e}")))?;

        let text = Self::response_text(api_response)?;

        tracing::debug!(
            model = %self.model,
            response_len = text.len(),
            "Received response from Gemini"
        );

        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
