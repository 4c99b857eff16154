use thiserror::Error;

pub mod api;
pub mod byte_cache;
pub mod normalize;
pub mod session;
pub mod viewer;

// Re-export for convenience
pub use api::{ApiClient, run_query};
pub use byte_cache::{DEFAULT_CACHE_CAPACITY, DocumentByteCache, DocumentFetcher};
pub use normalize::normalize;
pub use session::{QuerySession, SubmitOutcome, SubmitTicket};
pub use viewer::ResultViewer;

/// Which kind of query the backend is asked to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Natural-language question answering over the corpus.
    Retrieval,
    /// Structured field extraction across the corpus.
    Extraction,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Retrieval => "Retrieval",
            Mode::Extraction => "Extraction",
        }
    }

    /// Input placeholder shown when the query box is empty.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Mode::Retrieval => "Ask a question about your documents...",
            Mode::Extraction => {
                r#"Define a JSON dict of entities and descriptions. ex: {"name": "the name of the company"}"#
            }
        }
    }

    pub fn toggled(&self) -> Mode {
        match self {
            Mode::Retrieval => Mode::Extraction,
            Mode::Extraction => Mode::Retrieval,
        }
    }
}

/// Mode-dependent content of one result item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemPayload {
    /// Retrieval: the page text that produced the answer, with an optional
    /// highlight span (char offsets, inclusive) marking the answer source.
    Snippet {
        text: String,
        highlight: Option<(usize, usize)>,
    },
    /// Extraction: ordered field name → extracted value pairs.
    Fields(Vec<(String, String)>),
}

/// One normalized answer/extraction unit tied to a source document page.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    /// Source document identifier: a file path or URL understood by the
    /// backend's `pdf` endpoint.
    pub source: String,
    /// 0-based page number as returned by the backend.
    pub page: u32,
    pub payload: ItemPayload,
}

impl ResultItem {
    /// Last path component of the source, for display.
    pub fn file_name(&self) -> &str {
        self.source.rsplit('/').next().unwrap_or(&self.source)
    }
}

/// A complete normalized response: optional answer summary plus items in
/// the backend's relevance order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// Retrieval answer text; absent for extraction.
    pub summary: Option<String>,
    pub items: Vec<ResultItem>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Configuration for the backend client and byte cache.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, e.g. "http://localhost:8000/".
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Maximum number of documents held in the byte cache.
    pub pdf_cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            request_timeout_secs: 30,
            pdf_cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_takes_last_path_component() {
        let item = ResultItem {
            source: "/docs/reports/q3.pdf".to_string(),
            page: 0,
            payload: ItemPayload::Snippet {
                text: String::new(),
                highlight: None,
            },
        };
        assert_eq!(item.file_name(), "q3.pdf");
    }

    #[test]
    fn file_name_passes_through_bare_names() {
        let item = ResultItem {
            source: "report.pdf".to_string(),
            page: 2,
            payload: ItemPayload::Fields(vec![]),
        };
        assert_eq!(item.file_name(), "report.pdf");
    }

    #[test]
    fn mode_toggle_round_trips() {
        assert_eq!(Mode::Retrieval.toggled(), Mode::Extraction);
        assert_eq!(Mode::Extraction.toggled(), Mode::Retrieval);
    }
}
