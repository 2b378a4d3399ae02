use axum::{extract::State, Json};

use bureau_core::api_types::VocabularyResponse;

use crate::state::AppState;

/// GET /api/vocabulary — the bureau and category lists offered to the model.
pub async fn get_vocabulary(State(state): State<AppState>) -> Json<VocabularyResponse> {
    Json(VocabularyResponse {
        bureaus: state.vocabulary.bureaus.clone(),
        categories: state.vocabulary.categories.clone(),
    })
}
