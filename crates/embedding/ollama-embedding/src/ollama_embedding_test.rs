//! Unit tests for construction and reply parsing. HTTP behaviour is covered in `tests/`.

use super::*;

#[test]
fn test_new_uses_default_model_and_trims_slash() {
    let service = OllamaEmbedding::new("http://localhost:11000/");
    assert_eq!(service.model(), "nomic-embed-text");
    assert_eq!(service.base_url(), "http://localhost:11000");
    assert_eq!(service.url(TAGS_PATH), "http://localhost:11000/api/tags");
}

#[test]
fn test_with_model() {
    let service = OllamaEmbedding::new("http://localhost:11434").with_model("mxbai-embed-large");
    assert_eq!(service.model(), "mxbai-embed-large");
}

#[test]
fn test_request_body_shape() {
    let request = EmbeddingRequest {
        model: "nomic-embed-text",
        prompt: "Hello world",
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"model": "nomic-embed-text", "prompt": "Hello world"})
    );
}

#[test]
fn test_parse_embedding() {
    assert_eq!(parse_embedding(br#"{"embedding":[0.1,0.2,0.3]}"#).len(), 3);
}

/// Missing field and non-JSON bodies both degrade to an empty embedding.
#[test]
fn test_parse_embedding_tolerates_missing_or_malformed() {
    assert!(parse_embedding(br#"{"model":"nomic-embed-text"}"#).is_empty());
    assert!(parse_embedding(b"not json").is_empty());
    assert!(parse_embedding(b"").is_empty());
}
