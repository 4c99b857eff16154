use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;

/// Centered help overlay listing key bindings.
pub fn render(f: &mut Frame, theme: &Theme) {
    let bindings: &[(&str, &str)] = &[
        ("i, /", "edit query"),
        ("Enter", "submit query"),
        ("c", "clear query and results"),
        ("Tab, m", "switch mode"),
        ("h, ←", "previous result"),
        ("l, →", "next result"),
        ("d", "download CSV (extraction)"),
        ("Esc", "dismiss notification / back"),
        ("?", "toggle this help"),
        ("q", "quit"),
    ];

    let height = bindings.len() as u16 + 2;
    let [area] = Layout::horizontal([Constraint::Length(44)])
        .flex(Flex::Center)
        .areas(f.area());
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);

    f.render_widget(Clear, area);

    let lines: Vec<Line> = bindings
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(
                    format!("  {key:<8}"),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled((*what).to_string(), Style::default().fg(theme.text)),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Keys ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}
