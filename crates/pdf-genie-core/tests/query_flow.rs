//! End-to-end flow over the core pieces: session → normalizer → viewer →
//! byte cache, with a mock document fetcher standing in for the backend.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use pdf_genie_core::{
    DocumentByteCache, DocumentFetcher, Mode, QueryError, QuerySession, SubmitOutcome, normalize,
};

struct CountingFetcher {
    fetches: AtomicUsize,
}

impl CountingFetcher {
    fn new() -> Self {
        Self {
            fetches: AtomicUsize::new(0),
        }
    }
}

impl DocumentFetcher for CountingFetcher {
    fn fetch<'a>(
        &'a self,
        source: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, QueryError>> + Send + 'a>> {
        Box::pin(async move {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(format!("%PDF-{source}").into_bytes())
        })
    }
}

#[tokio::test]
async fn retrieval_query_then_page_through_results() {
    let mut session = QuerySession::new();
    session.set_query("what was the 2022 revenue?");
    let ticket = session.begin_submit().unwrap();

    // Two items share one source document; the third is distinct.
    let raw = json!({
        "answer": "42M",
        "items": [
            {"metadata": {"source": "/docs/annual.pdf", "page": 3}, "page_content": "revenue 42M"},
            {"metadata": {"source": "/docs/annual.pdf", "page": 17}, "page_content": "details"},
            {"metadata": {"source": "/docs/q4.pdf", "page": 1}, "page_content": "quarterly"}
        ]
    });
    let set = normalize(ticket.mode, raw).unwrap();
    let outcome = session.finish_submit(ticket.seq, Ok(set));
    assert_eq!(outcome, SubmitOutcome::Installed { items: 3 });

    let fetcher = Arc::new(CountingFetcher::new());
    let cache = DocumentByteCache::new(fetcher.clone(), 8);

    // Walk every item, fetching the displayed document each time. The
    // shared source is fetched once even though two items reference it.
    loop {
        let item = session.viewer().current().unwrap();
        cache.get(&item.source).await.unwrap();
        if session.viewer().cursor() + 1 == session.viewer().len() {
            break;
        }
        session.viewer_mut().next();
    }

    assert_eq!(session.viewer().position_label(), "3 of 3");
    assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 2);

    // Stepping back re-displays from cache with no extra fetch.
    session.viewer_mut().prev();
    let item = session.viewer().current().unwrap();
    cache.get(&item.source).await.unwrap();
    assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn mode_switch_mid_flight_drops_the_stale_response() {
    let mut session = QuerySession::new();
    session.set_query("pending question");
    let ticket = session.begin_submit().unwrap();

    session.set_mode(Mode::Extraction);
    session.set_query(r#"{"name": "company name"}"#);

    // The retrieval response lands after the switch.
    let raw = json!({
        "answer": "late",
        "items": [{"metadata": {"source": "/docs/a.pdf", "page": 0}}]
    });
    let set = normalize(Mode::Retrieval, raw).unwrap();
    assert_eq!(session.finish_submit(ticket.seq, Ok(set)), SubmitOutcome::Stale);
    assert!(session.viewer().is_empty());

    // The extraction submit still goes through cleanly.
    let ticket = session.begin_submit().unwrap();
    let raw = json!({
        "items": [{"source": "/docs/a.pdf", "page_id": 2, "entities": {"name": "Acme"}}]
    });
    let set = normalize(ticket.mode, raw).unwrap();
    assert_eq!(
        session.finish_submit(ticket.seq, Ok(set)),
        SubmitOutcome::Installed { items: 1 }
    );
    assert_eq!(session.viewer().current().unwrap().page, 2);
}
