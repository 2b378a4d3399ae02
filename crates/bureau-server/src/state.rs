use std::sync::Arc;

use bureau_core::{AppConfig, Vocabulary};
use bureau_extraction::BatchExtractor;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub vocabulary: Vocabulary,
    pub extractor: Arc<BatchExtractor>,
}
