use std::path::PathBuf;

use pdf_genie_core::{QueryError, ResultSet, SubmitTicket};

/// Commands sent from the TUI to the backend listener.
pub enum BackendCommand {
    /// Run the search/extract request described by the ticket.
    RunQuery { ticket: SubmitTicket },
    /// Fetch (or re-fetch after failure) a source document's bytes.
    FetchDocument { source: String },
    /// Render the current query + full item list as CSV and save it.
    ExportCsv {
        entity_json: String,
        results_json: String,
    },
}

/// Events flowing from the backend listener back to the TUI.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    /// A query finished. `seq` is the ticket's token; the app drops the
    /// event if the session has moved on since the submit.
    QueryFinished {
        seq: u64,
        result: Result<ResultSet, QueryError>,
    },
    /// Document bytes are resident in the byte cache.
    DocumentReady { source: String, bytes: usize },
    DocumentFailed { source: String, error: String },
    CsvSaved { path: PathBuf },
    CsvFailed { error: String },
}
