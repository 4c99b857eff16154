use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Quit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::Query => map_key_query(key),
            }
        }
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Tab | KeyCode::Char('m') => Action::ToggleMode,
        KeyCode::Char('i') | KeyCode::Char('/') => Action::StartQueryEdit,
        KeyCode::Enter => Action::Submit,
        KeyCode::Char('c') => Action::ClearQuery,
        KeyCode::Char('h') | KeyCode::Left => Action::PrevItem,
        KeyCode::Char('l') | KeyCode::Right => Action::NextItem,
        KeyCode::Char('d') => Action::ExportCsv,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Esc => Action::NavigateBack,
        _ => Action::None,
    }
}

fn map_key_query(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::QueryCancel,
        KeyCode::Enter => Action::QueryConfirm,
        KeyCode::Char(c) => Action::QueryInput(c),
        KeyCode::Backspace => Action::QueryInput('\x08'), // sentinel for backspace
        _ => Action::None,
    }
}
