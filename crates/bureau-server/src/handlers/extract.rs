use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info, instrument, warn};

use bureau_core::api_types::{ErrorResponse, ExtractResponse};
use bureau_core::{ExtractionRequest, TracingObserver, PDF_MIME_TYPE};

use crate::state::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Accepts PDFs either by declared content type or by file extension.
pub(crate) fn is_pdf_upload(file_name: &str, content_type: Option<&str>) -> bool {
    let by_type = content_type
        .map(|ct| ct.split(';').next().unwrap_or("").trim().eq_ignore_ascii_case(PDF_MIME_TYPE))
        .unwrap_or(false);
    by_type || file_name.to_ascii_lowercase().ends_with(".pdf")
}

/// POST /api/extract — multipart upload of one or more PDFs, processed as one batch.
///
/// Per-document failures do not fail the request; they are listed in `errors`.
#[instrument(skip(state, multipart))]
pub async fn extract_documents(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, ApiError> {
    let mut requests = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Malformed multipart body: {e}")))?
    {
        // Non-file form fields are ignored.
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);

        if !is_pdf_upload(&file_name, content_type.as_deref()) {
            warn!(file_name = %file_name, content_type = ?content_type, "Rejected non-PDF upload");
            return Err(bad_request(format!("Only PDF files are accepted: {file_name}")));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| bad_request(format!("Failed to read upload {file_name}: {e}")))?;

        requests.push(ExtractionRequest::pdf(file_name, bytes.to_vec()));
    }

    if requests.is_empty() {
        return Err(bad_request("No PDF files were uploaded"));
    }

    info!(count = requests.len(), "Received documents for extraction");

    let outcome = state.extractor.run(requests, &TracingObserver).await;

    info!(
        run_id = %outcome.run_id,
        succeeded = outcome.succeeded(),
        failed = outcome.failed(),
        "Extraction request finished"
    );

    let response = ExtractResponse::try_from(outcome).map_err(|e| {
        error!(error = %e, "Failed to format extraction results");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to format extraction results: {e}"),
            }),
        )
    })?;

    Ok(Json(response))
}
