use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::{BatchOutcome, ExtractionError};
use crate::error::{BureauError, Result};
use crate::table::{format_table, DisplayRow};

// --- Health ---

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: String,
    pub api_key_configured: bool,
}

// --- Vocabulary ---

#[derive(Debug, Serialize, Deserialize)]
pub struct VocabularyResponse {
    pub bureaus: Vec<String>,
    pub categories: Vec<String>,
}

// --- Extraction ---

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub tsv: String,
    pub rows: Vec<DisplayRow>,
    pub errors: Vec<ExtractionError>,
}

impl TryFrom<BatchOutcome> for ExtractResponse {
    type Error = BureauError;

    fn try_from(outcome: BatchOutcome) -> Result<Self> {
        let table = format_table(&outcome.records)?;
        Ok(Self {
            run_id: outcome.run_id,
            started_at: outcome.started_at,
            finished_at: outcome.finished_at,
            total: outcome.total,
            succeeded: outcome.succeeded(),
            failed: outcome.failed(),
            tsv: table.tsv,
            rows: table.rows,
            errors: outcome.errors,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
