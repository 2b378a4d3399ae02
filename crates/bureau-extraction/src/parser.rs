use bureau_core::document::ExtractedFields;
use bureau_core::error::{BureauError, Result};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Pulls the JSON payload out of a model reply.
///
/// The model is only loosely held to "JSON only" and often wraps the object in a
/// Markdown fence with prose around it, so the fenced slice wins when present.
pub fn extract_json_slice(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(start) = trimmed.find(JSON_FENCE) {
        let rest = &trimmed[start + JSON_FENCE.len()..];
        return until_fence(rest);
    }

    if let Some(start) = trimmed.find(FENCE) {
        let rest = &trimmed[start + FENCE.len()..];
        return until_fence(rest);
    }

    trimmed
}

// Unclosed fences run to the end of the text.
fn until_fence(text: &str) -> &str {
    match text.find(FENCE) {
        Some(end) => &text[..end],
        None => text,
    }
}

pub fn parse_response(raw: &str) -> Result<ExtractedFields> {
    let slice = extract_json_slice(raw);

    let value: serde_json::Value = serde_json::from_str(slice).map_err(|e| parse_error(slice, e))?;
    if !value.is_object() {
        let e = <serde_json::Error as serde::de::Error>::custom(format!(
            "expected a JSON object, found {}",
            json_kind(&value)
        ));
        return Err(parse_error(slice, e));
    }

    serde_json::from_value(value).map_err(|e| parse_error(slice, e))
}

fn parse_error(slice: &str, source: serde_json::Error) -> BureauError {
    tracing::warn!(raw = %slice, error = %source, "Failed to parse model response");
    BureauError::Parse {
        raw: slice.to_string(),
        source,
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(bureau: &str, category: &str, title: &str) -> ExtractedFields {
        ExtractedFields {
            bureau: bureau.into(),
            category: category.into(),
            title: title.into(),
        }
    }

    #[test]
    fn test_parse_pure_json() {
        let parsed = parse_response(r#"{"bureau":"A","category":"B","title":"C"}"#).unwrap();
        assert_eq!(parsed, fields("A", "B", "C"));
    }

    #[test]
    fn test_parse_is_idempotent_on_serialized_fields() {
        let original = fields("環境局", "ｲﾍﾞﾝﾄ･講演", "「エコフェア」の開催について");
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(parse_response(&json).unwrap(), original);
    }

    #[test]
    fn test_parse_json_fence_with_prose() {
        let raw = "prefix ```json\n{\"bureau\":\"A\",\"category\":\"B\",\"title\":\"C\"}\n``` suffix";
        assert_eq!(parse_response(raw).unwrap(), fields("A", "B", "C"));
    }

    #[test]
    fn test_parse_untagged_fence() {
        let raw = "```\n{\"bureau\":\"A\",\"category\":\"B\",\"title\":\"C\"}\n```";
        assert_eq!(parse_response(raw).unwrap(), fields("A", "B", "C"));
    }

    #[test]
    fn test_json_fence_preferred_over_earlier_plain_fence() {
        let raw = "```\nnot this\n```\nhere:\n```json\n{\"bureau\":\"A\"}\n```";
        assert_eq!(extract_json_slice(raw).trim(), "{\"bureau\":\"A\"}");
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let raw = "```json\n{\"bureau\":\"A\",\"category\":\"B\",\"title\":\"C\"}";
        assert_eq!(parse_response(raw).unwrap(), fields("A", "B", "C"));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let raw = "\n\n  {\"title\":\"C\"}  \n";
        assert_eq!(parse_response(raw).unwrap(), fields("", "", "C"));
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let parsed = parse_response("{}").unwrap();
        assert_eq!(parsed, ExtractedFields::default());
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let parsed =
            parse_response(r#"{"bureau":"A","category":"B","title":"C","confidence":0.9}"#).unwrap();
        assert_eq!(parsed, fields("A", "B", "C"));
    }

    #[test]
    fn test_malformed_text_is_parse_failure() {
        let err = parse_response("申し訳ありませんが、文書を読み取れませんでした。").unwrap_err();
        match err {
            BureauError::Parse { raw, .. } => {
                assert_eq!(raw, "申し訳ありませんが、文書を読み取れませんでした。")
            }
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn test_non_object_json_is_parse_failure() {
        let err = parse_response(r#"["A", "B", "C"]"#).unwrap_err();
        assert!(matches!(err, BureauError::Parse { .. }));
        assert!(err.to_string().contains("expected a JSON object, found an array"));
    }

    #[test]
    fn test_nested_field_value_is_parse_failure() {
        let err = parse_response(r#"{"bureau":{"name":"A"}}"#).unwrap_err();
        assert!(matches!(err, BureauError::Parse { .. }));
    }

    #[test]
    fn test_prose_without_fence_is_parse_failure() {
        // Without a fence the whole text is decoded, so leading prose is fatal.
        let raw = "Here is the result: {\"bureau\":\"A\"}";
        assert!(parse_response(raw).is_err());
    }
}
