use crate::utils::error::{AnalysisError, Result};
use serde_json::Value;

const FENCE: &str = "```";
const EXCERPT_LIMIT: usize = 200;

/// 移除模型回應外層的 markdown code fence（```json 或 ```），可重複包覆
pub fn strip_code_fences(raw: &str) -> &str {
    let mut current = raw.trim();
    loop {
        let mut next = current;
        if let Some(rest) = next.strip_prefix(FENCE) {
            next = strip_language_tag(rest);
        }
        if let Some(rest) = next.strip_suffix(FENCE) {
            next = rest;
        }
        let next = next.trim();
        if next.len() == current.len() {
            return current;
        }
        current = next;
    }
}

fn strip_language_tag(rest: &str) -> &str {
    match rest.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    }
}

/// 解析模型回應中的 JSON；空結果（null、{}、[]）視為失敗
pub fn parse_model_json(raw: &str) -> Result<Value> {
    let cleaned = strip_code_fences(raw);
    let value: Value =
        serde_json::from_str(cleaned).map_err(|source| AnalysisError::ResponseParseError {
            source,
            content: excerpt(cleaned),
        })?;

    if is_empty_result(&value) {
        return Err(AnalysisError::EmptyResultError);
    }

    Ok(value)
}

/// 假值結果（null、false、0、""、{}、[]）都不算有效的分析結果
pub fn is_empty_result(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn excerpt(content: &str) -> String {
    if content.chars().count() <= EXCERPT_LIMIT {
        return content.to_string();
    }
    let head: String = content.chars().take(EXCERPT_LIMIT).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "emotions": {
                "primary": {"emotion": "joy", "intensity": 0.8},
                "secondary": {"emotion": "trust", "intensity": 0.4}
            },
            "adorescore": {"overall": 72, "breakdown": {"Delivery": 80}},
            "themes": {"Delivery": 0.9, "Quality": 0.6}
        })
    }

    #[test]
    fn test_fenced_variants_parse_identically() {
        let body = serde_json::to_string_pretty(&sample()).unwrap();
        let variants = [
            body.clone(),
            format!("```json\n{}\n```", body),
            format!("```\n{}\n```", body),
            format!("```JSON{}```", body),
            format!("  \n```json\n```\n{}\n```\n```  ", body),
            format!("```json\n{}", body),
            format!("{}\n```", body),
        ];

        for variant in &variants {
            let parsed = parse_model_json(variant).unwrap();
            assert_eq!(parsed, sample(), "variant failed: {:?}", variant);
        }
    }

    #[test]
    fn test_interior_backticks_are_preserved() {
        let raw = "```json\n{\"note\": \"use ```code``` here\"}\n```";
        let parsed = parse_model_json(raw).unwrap();
        assert_eq!(parsed["note"], "use ```code``` here");
    }

    #[test]
    fn test_malformed_response_is_an_error() {
        let cases = [
            "I'm sorry, I cannot analyze this text.",
            "```json\n{\"emotions\": \n```",
            "",
            "```\n```",
        ];

        for raw in cases {
            assert!(parse_model_json(raw).is_err(), "expected failure for {:?}", raw);
        }
    }

    #[test]
    fn test_empty_results_are_rejected() {
        assert!(matches!(
            parse_model_json("```json\n{}\n```"),
            Err(AnalysisError::EmptyResultError)
        ));
        assert!(matches!(parse_model_json("null"), Err(AnalysisError::EmptyResultError)));
        assert!(matches!(parse_model_json("[]"), Err(AnalysisError::EmptyResultError)));
        assert!(matches!(parse_model_json("false"), Err(AnalysisError::EmptyResultError)));
        assert!(matches!(parse_model_json("0"), Err(AnalysisError::EmptyResultError)));
        assert!(matches!(parse_model_json("\"\""), Err(AnalysisError::EmptyResultError)));
        assert!(matches!(
            parse_model_json("```json\n0.0\n```"),
            Err(AnalysisError::EmptyResultError)
        ));
    }

    #[test]
    fn test_truthy_scalars_are_kept() {
        assert_eq!(parse_model_json("true").unwrap(), json!(true));
        assert_eq!(parse_model_json("-1").unwrap(), json!(-1));
        assert_eq!(parse_model_json("0.5").unwrap(), json!(0.5));
        assert_eq!(parse_model_json("\"neutral\"").unwrap(), json!("neutral"));
    }

    #[test]
    fn test_parse_error_keeps_short_excerpt() {
        let raw = "x".repeat(500);
        match parse_model_json(&raw) {
            Err(AnalysisError::ResponseParseError { content, .. }) => {
                assert_eq!(content.len(), EXCERPT_LIMIT + 3);
                assert!(content.ends_with("..."));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
