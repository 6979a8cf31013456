//! Shared drawing helpers for the picker panel.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::text::truncate_start_with_ellipsis;

/// Centers a `width` x `height` panel in `area`, shrinking it to fit.
pub fn centered_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Key hint shown in the panel footer.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

pub struct PanelConfig<'a> {
    pub title: &'a str,
    pub border_color: Color,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [InputHint<'a>],
}

/// Clears the panel area, draws the border, title and footer hints.
///
/// Returns the body area left for content.
pub fn render_panel(frame: &mut Frame, area: Rect, config: &PanelConfig<'_>) -> Rect {
    let popup = centered_area(area, config.width, config.height);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(config.border_color))
            .title(format!(" {} ", config.title))
            .title_style(
                Style::default()
                    .fg(config.border_color)
                    .add_modifier(Modifier::BOLD),
            ),
        popup,
    );

    let inner = Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    );

    let footer_height = u16::from(!config.hints.is_empty()).min(inner.height);
    let body_height = inner.height - footer_height;
    let footer = Rect::new(inner.x, inner.y + body_height, inner.width, footer_height);
    if footer_height > 0 {
        render_hints(frame, footer, config.hints, config.border_color);
    }

    Rect::new(inner.x, inner.y, inner.width, body_height)
}

/// Renders `key action • key action` centered in `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight_color: Color) {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight_color)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Renders the search prompt: `> query█`, or a placeholder when empty.
pub fn render_query_line(
    frame: &mut Frame,
    area: Rect,
    query: &str,
    placeholder: &str,
    accent: Color,
) {
    const PROMPT: &str = "> ";
    let max_width = area.width.saturating_sub(PROMPT.len() as u16 + 1) as usize;

    let mut spans = vec![Span::styled(PROMPT, Style::default().fg(Color::DarkGray))];
    if query.is_empty() {
        spans.push(Span::styled("█", Style::default().fg(accent)));
        spans.push(Span::styled(
            truncate_start_with_ellipsis(placeholder, max_width),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(
            truncate_start_with_ellipsis(query, max_width),
            Style::default().fg(accent),
        ));
        spans.push(Span::styled("█", Style::default().fg(accent)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draws a horizontal rule `y_offset` rows into `area`.
pub fn render_separator(frame: &mut Frame, area: Rect, y_offset: u16) {
    if y_offset >= area.height {
        return;
    }
    let rule = "─".repeat(area.width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(rule, Style::default().fg(Color::DarkGray))),
        Rect::new(area.x, area.y + y_offset, area.width, 1),
    );
}
