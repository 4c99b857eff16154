use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;

/// Centered quit confirmation modal.
pub fn render(f: &mut Frame, theme: &Theme) {
    let [area] = Layout::horizontal([Constraint::Length(36)])
        .flex(Flex::Center)
        .areas(f.area());
    let [area] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(area);

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Quit? ");
    let text = vec![
        Line::from(""),
        Line::styled("  q: quit    Esc: stay", Style::default().fg(theme.text)),
    ];
    f.render_widget(Paragraph::new(text).block(block), area);
}
