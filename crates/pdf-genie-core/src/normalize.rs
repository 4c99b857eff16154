//! Maps mode-specific backend responses into the uniform [`ResultSet`].
//!
//! Retrieval and extraction responses carry different shapes; both collapse
//! to the same ordered item list here. Shape errors surface as
//! [`QueryError::MalformedResponse`]: normalization never panics, and the
//! caller treats a failure like any other failed request.

use serde::Deserialize;
use serde_json::Value;

use crate::{ItemPayload, Mode, QueryError, ResultItem, ResultSet};

/// Raw retrieval response: `{ answer, items, page_id?, char_offset? }`.
///
/// `page_id`/`char_offset` locate the answer's source span on one of the
/// returned pages; a start offset of -1 means no span is available.
#[derive(Debug, Deserialize)]
struct RetrievalResponse {
    answer: String,
    items: Vec<RetrievalItem>,
    #[serde(default)]
    page_id: Option<i64>,
    #[serde(default)]
    char_offset: Option<(i64, i64)>,
}

#[derive(Debug, Deserialize)]
struct RetrievalItem {
    metadata: RetrievalMetadata,
    #[serde(default)]
    page_content: String,
}

#[derive(Debug, Deserialize)]
struct RetrievalMetadata {
    source: String,
    page: u32,
}

/// Raw extraction response: `{ items: [{ source, page_id, entities }] }`.
#[derive(Debug, Deserialize)]
struct ExtractResponse {
    items: Vec<ExtractedItem>,
}

#[derive(Debug, Deserialize)]
struct ExtractedItem {
    source: String,
    page_id: u32,
    entities: serde_json::Map<String, Value>,
}

/// Normalize a raw backend response for the given mode.
///
/// Item order is preserved exactly as returned; it encodes relevance rank.
pub fn normalize(mode: Mode, raw: Value) -> Result<ResultSet, QueryError> {
    match mode {
        Mode::Retrieval => normalize_retrieval(raw),
        Mode::Extraction => normalize_extraction(raw),
    }
}

fn normalize_retrieval(raw: Value) -> Result<ResultSet, QueryError> {
    let resp: RetrievalResponse = serde_json::from_value(raw)
        .map_err(|e| QueryError::MalformedResponse(e.to_string()))?;

    let highlight = answer_span(resp.char_offset);
    let items = resp
        .items
        .into_iter()
        .map(|item| {
            let on_answer_page = resp.page_id == Some(item.metadata.page as i64);
            ResultItem {
                source: item.metadata.source,
                page: item.metadata.page,
                payload: ItemPayload::Snippet {
                    text: item.page_content,
                    highlight: if on_answer_page { highlight } else { None },
                },
            }
        })
        .collect();

    Ok(ResultSet {
        summary: Some(resp.answer),
        items,
    })
}

fn normalize_extraction(raw: Value) -> Result<ResultSet, QueryError> {
    let resp: ExtractResponse = serde_json::from_value(raw)
        .map_err(|e| QueryError::MalformedResponse(e.to_string()))?;

    let items = resp
        .items
        .into_iter()
        .map(|item| ResultItem {
            source: item.source,
            page: item.page_id,
            payload: ItemPayload::Fields(
                item.entities
                    .into_iter()
                    .map(|(name, value)| (name, field_value(value)))
                    .collect(),
            ),
        })
        .collect();

    Ok(ResultSet {
        summary: None,
        items,
    })
}

fn answer_span(char_offset: Option<(i64, i64)>) -> Option<(usize, usize)> {
    match char_offset {
        Some((start, end)) if start >= 0 && end >= start => {
            Some((start as usize, end as usize))
        }
        _ => None,
    }
}

/// Render an extracted entity value for display: strings verbatim,
/// everything else as compact JSON.
fn field_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn retrieval_maps_metadata_and_answer() {
        let raw = json!({
            "answer": "42M",
            "items": [
                {"metadata": {"source": "/docs/a.pdf", "page": 3}, "page_content": "revenue was 42M"},
                {"metadata": {"source": "/docs/b.pdf", "page": 0}, "page_content": "other"}
            ]
        });
        let set = normalize(Mode::Retrieval, raw).unwrap();
        assert_eq!(set.summary.as_deref(), Some("42M"));
        assert_eq!(set.items.len(), 2);
        assert_eq!(set.items[0].source, "/docs/a.pdf");
        assert_eq!(set.items[0].page, 3);
        assert_eq!(set.items[1].page, 0);
    }

    #[test]
    fn retrieval_preserves_backend_order() {
        let raw = json!({
            "answer": "x",
            "items": [
                {"metadata": {"source": "c.pdf", "page": 9}},
                {"metadata": {"source": "a.pdf", "page": 1}},
                {"metadata": {"source": "b.pdf", "page": 5}}
            ]
        });
        let set = normalize(Mode::Retrieval, raw).unwrap();
        let sources: Vec<&str> = set.items.iter().map(|i| i.source.as_str()).collect();
        assert_eq!(sources, ["c.pdf", "a.pdf", "b.pdf"]);
    }

    #[test]
    fn retrieval_attaches_highlight_only_to_answer_page() {
        let raw = json!({
            "answer": "Paris",
            "page_id": 2,
            "char_offset": [10, 14],
            "items": [
                {"metadata": {"source": "a.pdf", "page": 2}, "page_content": "capital is Paris today"},
                {"metadata": {"source": "a.pdf", "page": 7}, "page_content": "unrelated"}
            ]
        });
        let set = normalize(Mode::Retrieval, raw).unwrap();
        let ItemPayload::Snippet { highlight, .. } = &set.items[0].payload else {
            panic!("expected snippet payload");
        };
        assert_eq!(*highlight, Some((10, 14)));
        let ItemPayload::Snippet { highlight, .. } = &set.items[1].payload else {
            panic!("expected snippet payload");
        };
        assert_eq!(*highlight, None);
    }

    #[test]
    fn retrieval_negative_offset_means_no_highlight() {
        let raw = json!({
            "answer": "x",
            "page_id": 0,
            "char_offset": [-1, -1],
            "items": [{"metadata": {"source": "a.pdf", "page": 0}, "page_content": "text"}]
        });
        let set = normalize(Mode::Retrieval, raw).unwrap();
        let ItemPayload::Snippet { highlight, .. } = &set.items[0].payload else {
            panic!("expected snippet payload");
        };
        assert_eq!(*highlight, None);
    }

    #[test]
    fn retrieval_missing_answer_is_malformed() {
        let raw = json!({"items": []});
        let err = normalize(Mode::Retrieval, raw).unwrap_err();
        assert!(matches!(err, QueryError::MalformedResponse(_)));
    }

    #[test]
    fn retrieval_missing_metadata_source_is_malformed() {
        let raw = json!({
            "answer": "x",
            "items": [{"metadata": {"page": 1}}]
        });
        let err = normalize(Mode::Retrieval, raw).unwrap_err();
        assert!(matches!(err, QueryError::MalformedResponse(_)));
    }

    #[test]
    fn retrieval_non_integer_page_is_malformed() {
        let raw = json!({
            "answer": "x",
            "items": [{"metadata": {"source": "a.pdf", "page": "three"}}]
        });
        let err = normalize(Mode::Retrieval, raw).unwrap_err();
        assert!(matches!(err, QueryError::MalformedResponse(_)));
    }

    #[test]
    fn extraction_maps_entities_to_fields() {
        let raw = json!({
            "items": [
                {"source": "/docs/a.pdf", "page_id": 1,
                 "entities": {"name": "Acme Corp", "employees": 250}}
            ]
        });
        let set = normalize(Mode::Extraction, raw).unwrap();
        assert_eq!(set.summary, None);
        assert_eq!(set.items[0].page, 1);
        let ItemPayload::Fields(fields) = &set.items[0].payload else {
            panic!("expected fields payload");
        };
        assert!(fields.contains(&("name".to_string(), "Acme Corp".to_string())));
        assert!(fields.contains(&("employees".to_string(), "250".to_string())));
    }

    #[test]
    fn extraction_missing_items_is_malformed() {
        let err = normalize(Mode::Extraction, json!({})).unwrap_err();
        assert!(matches!(err, QueryError::MalformedResponse(_)));
    }

    #[test]
    fn extraction_string_page_id_is_malformed() {
        let raw = json!({
            "items": [{"source": "a.pdf", "page_id": "one", "entities": {}}]
        });
        let err = normalize(Mode::Extraction, raw).unwrap_err();
        assert!(matches!(err, QueryError::MalformedResponse(_)));
    }
}
