mod backend;
mod update;

use std::collections::HashMap;

use tokio::sync::mpsc;

use pdf_genie_core::QuerySession;

use crate::notification::Notifications;
use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the query box.
    Query,
}

/// Fetch state of one source document, keyed by source id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocStatus {
    Fetching,
    Ready { bytes: usize },
    Failed(String),
}

/// Main application state.
///
/// All mutable state lives here and is driven by `update()` (user actions)
/// and `handle_backend_event()` (network completions); the view only reads.
pub struct App {
    pub session: QuerySession,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub tick: usize,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,
    pub notifications: Notifications,
    /// Fetch status per source document currently known to the viewer.
    pub doc_status: HashMap<String, DocStatus>,
    pub export_in_flight: bool,
    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(theme: Theme) -> Self {
        Self {
            session: QuerySession::new(),
            input_mode: InputMode::Normal,
            theme,
            tick: 0,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            notifications: Notifications::default(),
            doc_status: HashMap::new(),
            export_in_flight: false,
            backend_cmd_tx: None,
        }
    }

    pub(crate) fn send_command(&self, cmd: BackendCommand) {
        if let Some(tx) = &self.backend_cmd_tx {
            let _ = tx.send(cmd);
        }
    }

    /// Ask the backend for the bytes of the currently displayed document,
    /// unless they are already resident or being fetched. A previously
    /// failed document is requested again (the cache retries).
    pub(crate) fn request_current_document(&mut self) {
        let Some(item) = self.session.viewer().current() else {
            return;
        };
        let source = item.source.clone();
        match self.doc_status.get(&source) {
            Some(DocStatus::Fetching) | Some(DocStatus::Ready { .. }) => {}
            None | Some(DocStatus::Failed(_)) => {
                self.doc_status.insert(source.clone(), DocStatus::Fetching);
                self.send_command(BackendCommand::FetchDocument { source });
            }
        }
    }

    /// Render the current screen.
    pub fn view(&self, f: &mut ratatui::Frame) {
        crate::view::query::render(f, self);

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }

        if self.confirm_quit {
            crate::view::quit_confirm::render(f, &self.theme);
        }
    }
}
