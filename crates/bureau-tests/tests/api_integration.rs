use bureau_core::api_types::{ErrorResponse, ExtractResponse, HealthResponse, VocabularyResponse};
use bureau_core::config::AppConfig;
use bureau_core::{BatchOutcome, ExtractionError, ExtractionRecord, Vocabulary};
use chrono::Utc;
use uuid::Uuid;

fn record(bureau: &str, category: &str, title: &str, file_name: &str) -> ExtractionRecord {
    ExtractionRecord {
        bureau: bureau.to_string(),
        category: category.to_string(),
        title: title.to_string(),
        file_name: file_name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// ExtractResponse
// ---------------------------------------------------------------------------

#[test]
fn extract_response_from_outcome() {
    let run_id = Uuid::new_v4();
    let outcome = BatchOutcome {
        run_id,
        started_at: Utc::now(),
        finished_at: Utc::now(),
        total: 3,
        records: vec![
            record("財務局", "入試関係", "入札結果", "a.pdf"),
            record("水道局", "災害関係", "断水のお知らせ", "c.pdf"),
        ],
        errors: vec![ExtractionError::new("b.pdf", "Inference error: timeout")],
    };

    let response = ExtractResponse::try_from(outcome).expect("format table");

    assert_eq!(response.run_id, run_id);
    assert_eq!(response.total, 3);
    assert_eq!(response.succeeded, 2);
    assert_eq!(response.failed, 1);
    assert_eq!(
        response.tsv,
        "入試関係\t入札結果\t財務局\n災害関係\t断水のお知らせ\t水道局"
    );
    assert_eq!(response.rows.len(), 2);
    assert_eq!(response.rows[1].file_name, "c.pdf");
    assert_eq!(response.errors[0].file_name, "b.pdf");
}

#[test]
fn extract_response_json_shape() {
    let outcome = BatchOutcome {
        run_id: Uuid::new_v4(),
        started_at: Utc::now(),
        finished_at: Utc::now(),
        total: 1,
        records: vec![record("X", "Y", "Z", "f1.pdf")],
        errors: Vec::new(),
    };

    let json = serde_json::to_value(ExtractResponse::try_from(outcome).expect("format table"))
        .expect("serialize");

    assert_eq!(json["tsv"], "Y\tZ\tX");
    assert_eq!(json["rows"][0]["区分"], "Y");
    assert_eq!(json["rows"][0]["件名"], "Z");
    assert_eq!(json["rows"][0]["局名"], "X");
    assert_eq!(json["rows"][0]["ファイル名"], "f1.pdf");
    assert!(json["errors"].as_array().unwrap().is_empty());
}

#[test]
fn extract_response_for_empty_outcome() {
    let outcome = BatchOutcome {
        run_id: Uuid::new_v4(),
        started_at: Utc::now(),
        finished_at: Utc::now(),
        total: 2,
        records: Vec::new(),
        errors: vec![
            ExtractionError::new("a.pdf", "boom"),
            ExtractionError::new("b.pdf", "boom"),
        ],
    };

    let response = ExtractResponse::try_from(outcome).expect("format table");
    assert_eq!(response.tsv, "");
    assert!(response.rows.is_empty());
    assert_eq!(response.failed, 2);
}

#[test]
fn extract_response_quotes_titles_containing_tabs() {
    let outcome = BatchOutcome {
        run_id: Uuid::new_v4(),
        started_at: Utc::now(),
        finished_at: Utc::now(),
        total: 1,
        records: vec![record("X", "Y", "A\tB", "f1.pdf")],
        errors: Vec::new(),
    };

    let response = ExtractResponse::try_from(outcome).expect("format table");

    assert_eq!(response.tsv, "Y\t\"A\tB\"\tX");
    assert_eq!(response.rows[0].title, "A\tB");
}

#[test]
fn extraction_error_serializes_file_name_in_camel_case() {
    let err = ExtractionError::new("x.pdf", "bad");
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["fileName"], "x.pdf");
    assert_eq!(json["cause"], "bad");
    assert_eq!(err.to_string(), "エラー (x.pdf): bad");
}

// ---------------------------------------------------------------------------
// Small response types
// ---------------------------------------------------------------------------

#[test]
fn health_response_roundtrip() {
    let hr = HealthResponse {
        status: "ok".to_string(),
        version: "0.1.0".to_string(),
        model: "gemini-2.5-flash-lite".to_string(),
        api_key_configured: true,
    };

    let json = serde_json::to_string(&hr).expect("failed to serialize HealthResponse");
    let deserialized: HealthResponse =
        serde_json::from_str(&json).expect("failed to deserialize HealthResponse");

    assert_eq!(deserialized.status, "ok");
    assert_eq!(deserialized.model, "gemini-2.5-flash-lite");
    assert!(deserialized.api_key_configured);
}

#[test]
fn vocabulary_response_matches_default_lists() {
    let vocab = Vocabulary::default();
    let response = VocabularyResponse {
        bureaus: vocab.bureaus.clone(),
        categories: vocab.categories.clone(),
    };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["bureaus"][0], "政策企画局");
    assert_eq!(json["bureaus"][30], "東京消防庁");
    assert_eq!(json["categories"][19], "災害関係");
}

#[test]
fn error_response_shape() {
    let json = serde_json::to_value(ErrorResponse {
        error: "No PDF files were uploaded".to_string(),
    })
    .unwrap();
    assert_eq!(json, serde_json::json!({ "error": "No PDF files were uploaded" }));
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

#[test]
fn app_config_serialization_roundtrip() {
    let config = AppConfig::from_lookup(|key| match key {
        "GEMINI_API_KEY" => Some("k".to_string()),
        "EXTRACTION_CONCURRENCY" => Some("2".to_string()),
        _ => None,
    });

    let json = serde_json::to_string(&config).expect("failed to serialize AppConfig");
    let deserialized: AppConfig =
        serde_json::from_str(&json).expect("failed to deserialize AppConfig");

    assert_eq!(deserialized.gemini.api_key, "k");
    assert_eq!(deserialized.extraction_concurrency, 2);
    assert_eq!(deserialized.server_port, 8080);
}
