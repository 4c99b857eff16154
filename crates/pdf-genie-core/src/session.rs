//! Query-mode orchestration: the session state machine.
//!
//! The session owns the current mode, query text, loading flag, and a
//! monotonically increasing request-sequence token. Submits hand out a
//! [`SubmitTicket`] capturing the token; whoever runs the request reports
//! back through [`finish_submit`](QuerySession::finish_submit) with that
//! token, and only the latest token is ever applied. Mode switches and
//! clears bump the token, so an in-flight request from a previous state is
//! dropped on arrival rather than cancelled: last submitted wins.

use crate::{Mode, QueryError, ResultSet, ResultViewer};

/// Everything a dispatcher needs to run one request.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket {
    pub seq: u64,
    pub mode: Mode,
    pub query: String,
}

/// What [`QuerySession::finish_submit`] did with a response.
#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Response was current; the result set is installed and the cursor reset.
    Installed { items: usize },
    /// Response was current but failed; the prior result set is preserved.
    Failed(QueryError),
    /// Response belonged to a superseded token and was dropped.
    Stale,
}

#[derive(Debug)]
pub struct QuerySession {
    mode: Mode,
    query: String,
    loading: bool,
    seq: u64,
    viewer: ResultViewer,
}

impl Default for QuerySession {
    fn default() -> Self {
        Self {
            mode: Mode::Retrieval,
            query: String::new(),
            loading: false,
            seq: 0,
            viewer: ResultViewer::default(),
        }
    }
}

impl QuerySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn viewer(&self) -> &ResultViewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut ResultViewer {
        &mut self.viewer
    }

    /// Switch mode. No-op when already in `mode`; otherwise query text and
    /// results are cleared and any in-flight request is invalidated.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.reset_state();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
    }

    /// Reset query text, results, and cursor without issuing a request.
    pub fn clear(&mut self) {
        self.reset_state();
    }

    /// Gate a submit: `None` (and no state change) for an empty query or
    /// while a request is already loading. Otherwise marks the session
    /// loading and returns the ticket for the dispatcher.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if self.query.trim().is_empty() {
            return None;
        }
        if self.loading {
            tracing::debug!("submit refused: request already in flight");
            return None;
        }
        self.seq += 1;
        self.loading = true;
        Some(SubmitTicket {
            seq: self.seq,
            mode: self.mode,
            query: self.query.clone(),
        })
    }

    /// Apply a finished request. Stale tokens are dropped without touching
    /// any state — including `loading`, which belongs to the newer request.
    pub fn finish_submit(
        &mut self,
        seq: u64,
        result: Result<ResultSet, QueryError>,
    ) -> SubmitOutcome {
        if seq != self.seq {
            tracing::debug!(stale = seq, current = self.seq, "dropping stale response");
            return SubmitOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(set) => {
                let items = set.items.len();
                self.viewer.install(set);
                SubmitOutcome::Installed { items }
            }
            Err(e) => {
                tracing::warn!(error = %e, "query failed");
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn reset_state(&mut self) {
        self.query.clear();
        self.viewer.clear();
        self.loading = false;
        // Invalidate any in-flight request.
        self.seq += 1;
    }
}
