use pdf_genie_core::SubmitOutcome;

use super::{App, DocStatus};
use crate::tui_event::BackendEvent;

impl App {
    /// Process a backend event and update model state.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::QueryFinished { seq, result } => {
                match self.session.finish_submit(seq, result) {
                    SubmitOutcome::Installed { items } => {
                        if items == 0 {
                            self.notifications.info("no results");
                        } else {
                            self.notifications
                                .info(format!("{items} result{}", if items == 1 { "" } else { "s" }));
                        }
                        // Kick off the byte fetch for the first displayed item.
                        self.request_current_document();
                    }
                    SubmitOutcome::Failed(e) => {
                        self.notifications.error(e.to_string());
                    }
                    // A superseded request; the session already dropped it.
                    SubmitOutcome::Stale => {}
                }
            }
            BackendEvent::DocumentReady { source, bytes } => {
                self.doc_status.insert(source, DocStatus::Ready { bytes });
            }
            BackendEvent::DocumentFailed { source, error } => {
                let name = source.rsplit('/').next().unwrap_or(&source).to_string();
                self.doc_status
                    .insert(source, DocStatus::Failed(error.clone()));
                self.notifications
                    .error(format!("failed to load {name}: {error}"));
            }
            BackendEvent::CsvSaved { path } => {
                self.export_in_flight = false;
                self.notifications
                    .info(format!("saved {}", path.display()));
            }
            BackendEvent::CsvFailed { error } => {
                self.export_in_flight = false;
                self.notifications.error(format!("CSV export failed: {error}"));
            }
        }
    }
}
