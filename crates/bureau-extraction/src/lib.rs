pub mod batch;
pub mod gemini;
pub mod parser;

pub use batch::{extract_one, BatchExtractor};
pub use gemini::GeminiClient;
pub use parser::{extract_json_slice, parse_response};
