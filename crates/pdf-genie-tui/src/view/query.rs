use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use pdf_genie_core::{ItemPayload, Mode, ResultItem};

use crate::app::{App, DocStatus, InputMode};
use crate::theme::Theme;
use crate::view::{spinner_char, truncate};

/// Render the single interactive screen: mode tabs, query box, status line,
/// paginated result panel, footer, notification toast.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // header: title + mode tabs
        Constraint::Length(3), // query box
        Constraint::Length(1), // status line
        Constraint::Min(5),    // result panel
        Constraint::Length(1), // footer
    ])
    .split(f.area());

    render_header(f, chunks[0], app);
    render_query_box(f, chunks[1], app);
    render_status(f, chunks[2], app);
    render_results(f, chunks[3], app);
    render_footer(f, chunks[4], app);
    render_notification(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = vec![
        Span::styled(" PDF Genie ", theme.header_style()),
        Span::raw("  "),
    ];
    for mode in [Mode::Retrieval, Mode::Extraction] {
        let style = if app.session.mode() == mode {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };
        spans.push(Span::styled(format!("[ {} ]", mode.label()), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_query_box(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let editing = app.input_mode == InputMode::Query;

    let border_style = if editing {
        Style::default().fg(theme.accent)
    } else {
        theme.border_style()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} query ", app.session.mode().label()));

    let query = app.session.query();
    let line = if query.is_empty() && !editing {
        Line::styled(
            app.session.mode().placeholder().to_string(),
            Style::default().fg(theme.dim),
        )
    } else {
        let mut spans = vec![Span::styled(
            query.to_string(),
            Style::default().fg(theme.text),
        )];
        if editing {
            spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
        }
        Line::from(spans)
    };

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let line = if app.session.is_loading() {
        let verb = match app.session.mode() {
            Mode::Retrieval => "searching",
            Mode::Extraction => "extracting",
        };
        Line::from(vec![
            Span::styled(
                format!(" {} ", spinner_char(app.tick)),
                Style::default().fg(theme.spinner),
            ),
            Span::styled(format!("{verb}..."), Style::default().fg(theme.dim)),
        ])
    } else if let Some(summary) = app.session.viewer().summary() {
        Line::from(vec![
            Span::styled(" Answer: ", Style::default().fg(theme.dim)),
            Span::styled(
                summary.to_string(),
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::raw("")
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_results(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let viewer = app.session.viewer();

    let title = match app.session.mode() {
        Mode::Retrieval => " References ",
        Mode::Extraction => " Results ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(item) = viewer.current() else {
        let empty = Paragraph::new(Line::styled(
            viewer.position_label(),
            Style::default().fg(theme.dim),
        ))
        .alignment(Alignment::Center);
        f.render_widget(empty, inner);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    // Source line: file name and 1-based page for display.
    lines.push(Line::from(vec![
        Span::styled("File: ", Style::default().fg(theme.dim)),
        Span::styled(item.file_name().to_string(), Style::default().fg(theme.text)),
        Span::styled("  Page: ", Style::default().fg(theme.dim)),
        Span::styled(
            format!("{}", item.page + 1),
            Style::default().fg(theme.text),
        ),
        Span::raw("   "),
        doc_status_span(app, item, theme),
    ]));
    lines.push(Line::raw(""));

    match &item.payload {
        ItemPayload::Snippet { text, highlight } => {
            lines.push(snippet_line(text, *highlight, theme));
        }
        ItemPayload::Fields(fields) => {
            for (name, value) in fields {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{name}: "),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(value.to_string(), Style::default().fg(theme.text)),
                ]));
            }
        }
    }

    let body_area = Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    };
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        body_area,
    );

    // Navigation line pinned to the bottom of the panel.
    let nav_area = Rect {
        y: inner.y + inner.height.saturating_sub(1),
        height: 1.min(inner.height),
        ..inner
    };
    let nav = Line::from(vec![
        Span::styled("◀ h  ", Style::default().fg(theme.dim)),
        Span::styled(
            viewer.position_label(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  l ▶", Style::default().fg(theme.dim)),
    ]);
    f.render_widget(
        Paragraph::new(nav).alignment(Alignment::Center),
        nav_area,
    );
}

fn doc_status_span(app: &App, item: &ResultItem, theme: &Theme) -> Span<'static> {
    match app.doc_status.get(&item.source) {
        Some(DocStatus::Ready { bytes }) => Span::styled(
            format!("PDF cached ({} KB)", bytes / 1024),
            Style::default().fg(theme.info),
        ),
        Some(DocStatus::Fetching) => Span::styled(
            format!("{} fetching PDF...", spinner_char(app.tick)),
            Style::default().fg(theme.spinner),
        ),
        Some(DocStatus::Failed(e)) => Span::styled(
            format!("PDF failed: {}", truncate(e, 40)),
            Style::default().fg(theme.error),
        ),
        None => Span::styled("PDF not loaded", Style::default().fg(theme.dim)),
    }
}

/// Snippet text with the answer span styled, when one is present.
fn snippet_line(text: &str, highlight: Option<(usize, usize)>, theme: &Theme) -> Line<'static> {
    let text_style = Style::default().fg(theme.text);
    let Some((start, end)) = highlight else {
        return Line::styled(text.to_string(), text_style);
    };

    // Offsets are inclusive char positions; clamp to the snippet.
    let byte_at = |n: usize| {
        text.char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(text.len())
    };
    let (start, end) = (byte_at(start), byte_at(end + 1));

    Line::from(vec![
        Span::styled(text[..start].to_string(), text_style),
        Span::styled(text[start..end].to_string(), theme.highlight_style()),
        Span::styled(text[end..].to_string(), text_style),
    ])
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut hints = vec!["i edit", "Enter submit", "Tab mode", "h/l navigate"];
    if app.session.mode() == Mode::Extraction {
        hints.push("d csv");
    }
    hints.push("? help");
    hints.push("q quit");

    let line = Line::styled(
        format!(" {}", hints.join(" · ")),
        Style::default().fg(theme.dim),
    );
    f.render_widget(Paragraph::new(line), area);
}

/// Toast in the bottom-right corner of the result panel.
fn render_notification(f: &mut Frame, area: Rect, app: &App) {
    let Some(notification) = app.notifications.current() else {
        return;
    };
    let theme = &app.theme;

    let message = truncate(&notification.message, (area.width as usize).saturating_sub(6));
    let width = (message.chars().count() as u16 + 4).min(area.width);
    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + area.height.saturating_sub(2),
        width,
        height: 1,
    };

    f.render_widget(Clear, toast_area);
    let line = Line::styled(
        format!(" {message} "),
        Style::default()
            .fg(theme.level_color(notification.level))
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(Paragraph::new(line), toast_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn snippet_line_splits_around_highlight() {
        let theme = Theme::hacker();
        let line = snippet_line("capital is Paris today", Some((11, 15)), &theme);
        let texts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, ["capital is ", "Paris", " today"]);
    }

    #[test]
    fn snippet_line_clamps_out_of_range_offsets() {
        let theme = Theme::hacker();
        let line = snippet_line("short", Some((2, 99)), &theme);
        let texts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, ["sh", "ort", ""]);
    }

    #[test]
    fn snippet_line_without_highlight_is_single_span() {
        let theme = Theme::hacker();
        let line = snippet_line("plain", None, &theme);
        assert_eq!(line.spans.len(), 1);
    }
}
