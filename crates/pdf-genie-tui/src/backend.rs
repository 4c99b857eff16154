//! Backend listener: runs network I/O off the UI task.
//!
//! The UI sends [`BackendCommand`]s; each command is served on its own
//! spawned task so a slow document fetch never delays a query, and results
//! flow back as [`BackendEvent`]s. All state transitions happen on the UI
//! side; this task only moves bytes.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use pdf_genie_core::{ApiClient, DocumentByteCache, run_query};

use crate::export;
use crate::tui_event::{BackendCommand, BackendEvent};

pub async fn run_backend(
    client: ApiClient,
    cache: Arc<DocumentByteCache>,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
) {
    loop {
        let cmd = tokio::select! {
            _ = cancel.cancelled() => break,
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => cmd,
                None => break,
            },
        };

        match cmd {
            BackendCommand::RunQuery { ticket } => {
                let client = client.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    let result = run_query(&client, ticket.mode, &ticket.query).await;
                    let _ = tx.send(BackendEvent::QueryFinished {
                        seq: ticket.seq,
                        result,
                    });
                });
            }
            BackendCommand::FetchDocument { source } => {
                let cache = cache.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    let event = match cache.get(&source).await {
                        Ok(bytes) => BackendEvent::DocumentReady {
                            source,
                            bytes: bytes.len(),
                        },
                        Err(e) => BackendEvent::DocumentFailed {
                            source,
                            error: e.to_string(),
                        },
                    };
                    let _ = tx.send(event);
                });
            }
            BackendCommand::ExportCsv {
                entity_json,
                results_json,
            } => {
                let client = client.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    let event = match client.download_csv(&entity_json, &results_json).await {
                        Ok(bytes) => match export::save_csv(&bytes, Path::new(".")) {
                            Ok(path) => BackendEvent::CsvSaved { path },
                            Err(error) => BackendEvent::CsvFailed { error },
                        },
                        Err(e) => BackendEvent::CsvFailed {
                            error: e.to_string(),
                        },
                    };
                    let _ = tx.send(event);
                });
            }
        }
    }
}
