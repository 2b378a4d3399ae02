pub mod api_types;
pub mod config;
pub mod document;
pub mod error;
pub mod inference;
pub mod instruction;
pub mod progress;
pub mod table;
pub mod vocabulary;

pub use config::{AppConfig, GeminiConfig};
pub use document::{
    BatchOutcome, BatchResult, ExtractedFields, ExtractionError, ExtractionRecord,
    ExtractionRequest, PDF_MIME_TYPE,
};
pub use error::{BureauError, Result};
pub use inference::InferenceClient;
pub use instruction::build_instruction;
pub use progress::{BatchObserver, NoopObserver, Progress, TracingObserver};
pub use table::{format_table, DisplayRow, TableOutput};
pub use vocabulary::{Vocabulary, VALID_BUREAUS, VALID_CATEGORIES};
