use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// One uploaded document queued for extraction. Fields are private so a request
/// cannot change once it has been handed to the orchestrator.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    document_bytes: Vec<u8>,
    mime_type: String,
    file_name: String,
}

impl ExtractionRequest {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        document_bytes: Vec<u8>,
    ) -> Self {
        Self {
            document_bytes,
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }

    pub fn pdf(file_name: impl Into<String>, document_bytes: Vec<u8>) -> Self {
        Self::new(file_name, PDF_MIME_TYPE, document_bytes)
    }

    pub fn document_bytes(&self) -> &[u8] {
        &self.document_bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// The three fields the model is asked for. Absent keys decode to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub bureau: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
}

/// Accepts strings as-is, `null` as empty, and numbers/booleans as their JSON text.
/// Arrays and objects are rejected.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Null => Ok(String::new()),
        v @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_)) => Ok(v.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string value, found {}",
            match other {
                serde_json::Value::Array(_) => "an array",
                _ => "an object",
            }
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    pub bureau: String,
    pub category: String,
    pub title: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
}

impl ExtractionRecord {
    /// Stamps parsed fields with the file name of the request they came from.
    pub fn from_fields(fields: ExtractedFields, request: &ExtractionRequest) -> Self {
        Self {
            bureau: fields.bureau,
            category: fields.category,
            title: fields.title,
            file_name: request.file_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionError {
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub cause: String,
}

impl ExtractionError {
    pub fn new(file_name: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            cause: cause.into(),
        }
    }
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "エラー ({}): {}", self.file_name, self.cause)
    }
}

/// Successful records in submission order.
pub type BatchResult = Vec<ExtractionRecord>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total: usize,
    pub records: BatchResult,
    pub errors: Vec<ExtractionError>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.records.len()
    }

    pub fn failed(&self) -> usize {
        self.errors.len()
    }
}
