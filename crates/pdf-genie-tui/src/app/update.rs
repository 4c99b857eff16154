use pdf_genie_core::Mode;

use super::{App, InputMode};
use crate::action::Action;
use crate::export;
use crate::tui_event::BackendCommand;

impl App {
    /// Process a user action and update state. Returns true if the app
    /// should quit.
    pub fn update(&mut self, action: Action) -> bool {
        // Quit confirmation modal — q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                Action::NavigateBack => {
                    self.confirm_quit = false;
                }
                Action::Tick => self.on_tick(),
                _ => {}
            }
            return false;
        }

        // Help overlay swallows everything except its dismissal
        if self.show_help {
            match action {
                Action::ToggleHelp | Action::NavigateBack => {
                    self.show_help = false;
                }
                Action::Quit => {
                    self.show_help = false;
                    self.confirm_quit = true;
                }
                Action::Tick => self.on_tick(),
                _ => {}
            }
            return false;
        }

        if self.input_mode == InputMode::Query {
            match action {
                Action::Quit => {
                    self.confirm_quit = true;
                }
                Action::QueryCancel => {
                    self.input_mode = InputMode::Normal;
                }
                Action::QueryConfirm => {
                    self.input_mode = InputMode::Normal;
                    self.submit();
                }
                Action::QueryInput(c) => {
                    if c == '\x08' {
                        self.session.pop_query_char();
                    } else {
                        self.session.push_query_char(c);
                    }
                }
                Action::Tick => self.on_tick(),
                _ => {}
            }
            return false;
        }

        match action {
            Action::Quit => {
                self.confirm_quit = true;
            }
            Action::ToggleMode => {
                self.session.set_mode(self.session.mode().toggled());
            }
            Action::StartQueryEdit => {
                self.input_mode = InputMode::Query;
            }
            Action::Submit => self.submit(),
            Action::ClearQuery => {
                self.session.clear();
            }
            Action::PrevItem => {
                self.session.viewer_mut().prev();
                self.request_current_document();
            }
            Action::NextItem => {
                self.session.viewer_mut().next();
                self.request_current_document();
            }
            Action::ExportCsv => self.export_csv(),
            Action::ToggleHelp => {
                self.show_help = true;
            }
            Action::NavigateBack => {
                self.notifications.dismiss();
            }
            Action::Tick => self.on_tick(),
            Action::QueryInput(_)
            | Action::QueryCancel
            | Action::QueryConfirm
            | Action::Resize(_, _)
            | Action::None => {}
        }
        false
    }

    fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.notifications.prune();
    }

    /// Submit the current query. Empty queries and re-entrant submits are
    /// refused by the session and produce no request.
    fn submit(&mut self) {
        if let Some(ticket) = self.session.begin_submit() {
            self.send_command(BackendCommand::RunQuery { ticket });
        }
    }

    fn export_csv(&mut self) {
        if self.session.mode() != Mode::Extraction {
            self.notifications
                .warn("CSV export is available in extraction mode");
            return;
        }
        if self.session.viewer().is_empty() {
            self.notifications.warn("no results to export");
            return;
        }
        if self.export_in_flight {
            return;
        }
        // The full item list goes along, not just the visible one.
        let entity_json = self.session.query().to_string();
        let results_json = export::results_json(self.session.viewer().items());
        self.export_in_flight = true;
        self.send_command(BackendCommand::ExportCsv {
            entity_json,
            results_json,
        });
    }
}
