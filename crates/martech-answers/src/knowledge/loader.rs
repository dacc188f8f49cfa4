//! Knowledge document loading.
//!
//! The document is loaded once by the hosting layer and passed into the
//! engine per request. A load failure is a hard error — the engine must
//! never run against a silently empty document.

use std::path::Path;

use anyhow::Context;

use crate::error::AssistError;
use crate::types::KnowledgeDocument;

/// Read and parse the knowledge document from a JSON file.
pub fn load_document(path: &Path) -> Result<KnowledgeDocument, AssistError> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read knowledge document at {}", path.display()))
        .map_err(|source| AssistError::DocumentUnavailable { source })?;

    let document: KnowledgeDocument = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse knowledge document at {}", path.display()))
        .map_err(|source| AssistError::DocumentUnavailable { source })?;

    tracing::info!(
        path = %path.display(),
        faqs = document.faqs.len(),
        categories = document.categories.len(),
        "Knowledge document loaded"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_document_unavailable() {
        let err = load_document(Path::new("/nonexistent/knowledge.json")).unwrap_err();
        assert!(matches!(err, AssistError::DocumentUnavailable { .. }));
    }

    #[test]
    fn valid_document_loads() {
        let dir = std::env::temp_dir().join("martech-answers-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("knowledge.json");
        std::fs::write(
            &path,
            r#"{"faqs":[{"question":"How does lead scoring work?","answer":"Nightly."}]}"#,
        )
        .unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.faqs.len(), 1);
    }

    #[test]
    fn malformed_json_is_document_unavailable() {
        let dir = std::env::temp_dir().join("martech-answers-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, AssistError::DocumentUnavailable { .. }));
    }
}
