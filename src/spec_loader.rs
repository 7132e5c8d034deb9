//! Spec loader - reads a provider's OpenAPI document for prompting
//!
//! Accepts JSON or YAML, re-encodes as compact JSON and clips the result
//! so giant specs don't blow up the prompt.

use serde_json::Value;
use std::path::Path;

/// Maximum number of characters of serialized spec embedded in a prompt
pub const MAX_SPEC_CHARS: usize = 50_000;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Spec file not found: {0}")]
    NotFound(String),
    #[error("Failed to read spec file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Spec is neither valid JSON ({json}) nor valid YAML ({yaml})")]
    Parse { json: String, yaml: String },
    #[error("Failed to serialize spec: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load a spec file and return it as compact JSON, clipped to [`MAX_SPEC_CHARS`]
pub fn load(path: impl AsRef<Path>) -> Result<String, LoadError> {
    let path = path.as_ref();

    let raw = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound(path.display().to_string())
        } else {
            LoadError::Io {
                path: path.display().to_string(),
                source: e,
            }
        }
    })?;

    let document = parse_document(&raw)?;
    let compact = serde_json::to_string(&document)?;

    tracing::debug!(
        path = %path.display(),
        serialized_chars = compact.chars().count(),
        max_chars = MAX_SPEC_CHARS,
        "Loaded spec"
    );

    Ok(clip(&compact, MAX_SPEC_CHARS))
}

/// Parse a document as JSON, falling back to YAML. First success wins.
pub fn parse_document(raw: &str) -> Result<Value, LoadError> {
    let json_err = match serde_json::from_str::<Value>(raw) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let parse_error = |yaml_err: serde_yaml::Error| LoadError::Parse {
        json: json_err.to_string(),
        yaml: yaml_err.to_string(),
    };

    // Resolve `<<: *anchor` merge keys the way YAML loaders do
    let mut document: serde_yaml::Value = serde_yaml::from_str(raw).map_err(parse_error)?;
    document.apply_merge().map_err(parse_error)?;

    Ok(serde_json::to_value(document)?)
}

/// Cut `text` to at most `max_chars` characters.
///
/// Not JSON-aware: the result may be invalid JSON when the input is longer
/// than the budget. It only ever ends up inside a prompt.
pub fn clip(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_spec(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_json_is_compacted() {
        let temp = TempDir::new().unwrap();
        let path = write_spec(
            &temp,
            "spec.json",
            r#"{
                "openapi": "3.0.0",
                "info": { "title": "Dummy Billing", "version": "1.0" },
                "paths": { "/customers": { "post": { "operationId": "createCustomer" } } }
            }"#,
        );

        let loaded = load(&path).unwrap();
        assert_eq!(
            loaded,
            r#"{"openapi":"3.0.0","info":{"title":"Dummy Billing","version":"1.0"},"paths":{"/customers":{"post":{"operationId":"createCustomer"}}}}"#
        );
    }

    #[test]
    fn test_load_yaml_fallback() {
        let temp = TempDir::new().unwrap();
        let path = write_spec(
            &temp,
            "spec.yaml",
            "openapi: 3.0.0\ninfo:\n  title: Dummy Billing\n  version: '1.0'\ntags:\n  - billing\n  - customers\n",
        );

        let loaded = load(&path).unwrap();
        assert_eq!(
            loaded,
            r#"{"openapi":"3.0.0","info":{"title":"Dummy Billing","version":"1.0"},"tags":["billing","customers"]}"#
        );
    }

    #[test]
    fn test_yaml_merge_keys_are_applied() {
        let document = parse_document(
            "components:\n  base: &base {type: object, nullable: true}\n  customer:\n    <<: *base\n    nullable: false\n    title: Customer\n",
        )
        .unwrap();

        assert_eq!(
            document,
            serde_json::json!({
                "components": {
                    "base": {"type": "object", "nullable": true},
                    "customer": {"type": "object", "nullable": false, "title": "Customer"}
                }
            })
        );
        assert!(document["components"]["customer"].get("<<").is_none());
    }

    #[test]
    fn test_yaml_integer_keys_become_strings() {
        let document = parse_document("responses:\n  200:\n    description: OK\n").unwrap();
        assert_eq!(document, serde_json::json!({"responses": {"200": {"description": "OK"}}}));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load(temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn test_load_unparseable() {
        let temp = TempDir::new().unwrap();
        let path = write_spec(&temp, "broken.yaml", "paths: [1, 2\n");

        let err = load(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_load_clips_large_spec() {
        let temp = TempDir::new().unwrap();
        let big = "x".repeat(MAX_SPEC_CHARS * 2);
        let path = write_spec(&temp, "big.json", &format!(r#"{{"description":"{}"}}"#, big));

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.chars().count(), MAX_SPEC_CHARS);
        assert!(loaded.starts_with(r#"{"description":"xxx"#));
        // Raw cut, so the closing quote and brace are gone
        assert!(serde_json::from_str::<Value>(&loaded).is_err());
    }

    #[test]
    fn test_clip_counts_characters_not_bytes() {
        assert_eq!(clip("héllo wörld", 4), "héll");
        assert_eq!(clip("short", 50), "short");
        assert_eq!(clip("", 3), "");
    }
}
