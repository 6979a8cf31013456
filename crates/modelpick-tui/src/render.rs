//! Pure view functions for the picker.
//!
//! Rendering only reads `PickerState`; it never mutates it or returns effects.

use modelpick_core::catalog::{ModelDescriptor, format_context, format_pricing, is_free};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::picker::PickerState;
use crate::render_utils::{
    InputHint, PanelConfig, render_panel, render_query_line, render_separator,
};
use crate::text::truncate_with_ellipsis;

const ACCENT: Color = Color::Magenta;

/// Spinner frames for the loading indicator.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Details pane: one separator row plus four text rows.
const DETAILS_HEIGHT: u16 = 5;

/// Width reserved for the list's highlight symbol.
const HIGHLIGHT_WIDTH: u16 = 2;

pub fn render(state: &PickerState, frame: &mut Frame) {
    let area = frame.area();
    let visible = state.visible();
    let search_visible = state.catalog().search_visible();

    let header_height = if search_visible { 2 } else { 0 };
    let details_height = if state.show_details() {
        DETAILS_HEIGHT
    } else {
        0
    };
    let list_rows = u16::try_from(visible.len().max(1)).unwrap_or(u16::MAX);

    let hints = hints(state);
    let title = if state.is_disabled() {
        "Select Model (disabled)"
    } else {
        "Select Model"
    };
    let body = render_panel(
        frame,
        area,
        &PanelConfig {
            title,
            border_color: ACCENT,
            width: area.width.saturating_sub(4).clamp(40, 100),
            // header + list + details + separator + status + hints + border
            height: list_rows
                .saturating_add(header_height + details_height)
                .saturating_add(5),
            hints: &hints,
        },
    );

    if search_visible {
        render_query_line(
            frame,
            Rect::new(body.x, body.y, body.width, 1),
            state.query(),
            "Search models",
            ACCENT,
        );
        render_separator(frame, body, 1);
    }

    let list_height = body
        .height
        .saturating_sub(header_height + details_height + 2);
    let list_area = Rect::new(body.x, body.y + header_height, body.width, list_height);
    render_list(frame, state, &visible, list_area);

    let mut y = header_height + list_height;
    if state.show_details() {
        render_separator(frame, body, y);
        let details_area = Rect::new(
            body.x,
            body.y + y + 1,
            body.width,
            (DETAILS_HEIGHT - 1).min(body.height.saturating_sub(y + 1)),
        );
        render_details(frame, state.highlighted_model(), details_area);
        y += DETAILS_HEIGHT;
    }

    render_separator(frame, body, y);
    if y + 1 < body.height {
        frame.render_widget(
            Paragraph::new(status_line(state, visible.len())).alignment(Alignment::Center),
            Rect::new(body.x, body.y + y + 1, body.width, 1),
        );
    }
}

fn render_list(frame: &mut Frame, state: &PickerState, visible: &[&ModelDescriptor], area: Rect) {
    let items: Vec<ListItem> = if visible.is_empty() {
        let label = if state.catalog().is_loading() {
            "  Loading models...".to_string()
        } else if state.query().trim().is_empty() {
            "  No models available".to_string()
        } else {
            format!("  No models match \"{}\"", state.query())
        };
        vec![ListItem::new(Line::from(Span::styled(
            label,
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        let width = area.width.saturating_sub(HIGHLIGHT_WIDTH);
        visible
            .iter()
            .map(|model| {
                let is_selected = state.selected() == Some(model.id.as_str());
                ListItem::new(model_line(model, is_selected, width))
            })
            .collect()
    };

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(ACCENT)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    if !visible.is_empty() {
        list_state.select(Some(state.highlighted()));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// `name ✓ ........ 128k · Free`
fn model_line(model: &ModelDescriptor, is_selected: bool, width: u16) -> Line<'static> {
    let summary = summary_text(model);
    let marker = if is_selected { " ✓" } else { "" };

    let width = width as usize;
    let right_width = summary.width();
    let name_budget = width
        .saturating_sub(right_width + marker.width() + 1)
        .max(1);
    let name = truncate_with_ellipsis(&model.name, name_budget);
    let used = name.width() + marker.width() + right_width;
    let spacing = width.saturating_sub(used).max(1);

    let name_color = if is_free(model.pricing.as_ref()) {
        Color::Green
    } else {
        Color::Cyan
    };

    Line::from(vec![
        Span::styled(name, Style::default().fg(name_color)),
        Span::styled(marker, Style::default().fg(Color::Green)),
        Span::raw(" ".repeat(spacing)),
        Span::styled(summary, Style::default().fg(Color::DarkGray)),
    ])
}

fn summary_text(model: &ModelDescriptor) -> String {
    let context = format_context(model.context_length);
    let pricing = format_pricing(model.pricing.as_ref());
    if context.is_empty() {
        pricing
    } else {
        format!("{context} · {pricing}")
    }
}

fn render_details(frame: &mut Frame, model: Option<&ModelDescriptor>, area: Rect) {
    let Some(model) = model else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No model highlighted",
                Style::default().fg(Color::DarkGray),
            )),
            area,
        );
        return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![Line::from(vec![
        Span::styled("id ", label),
        Span::raw(model.id.clone()),
    ])];

    let context = format_context(model.context_length);
    let mut facts = vec![
        Span::styled("pricing ", label),
        Span::raw(format_pricing(model.pricing.as_ref())),
    ];
    if !context.is_empty() {
        facts.push(Span::styled("  context ", label));
        facts.push(Span::raw(format!("{context} tokens")));
    }
    if let Some(arch) = &model.architecture
        && !arch.input_modalities.is_empty()
    {
        facts.push(Span::styled("  input ", label));
        facts.push(Span::raw(arch.input_modalities.join(", ")));
    }
    lines.push(Line::from(facts));

    if let Some(description) = model.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(Line::from(Span::styled(
            description.to_string(),
            Style::default().fg(Color::Gray),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn status_line(state: &PickerState, visible_count: usize) -> Line<'static> {
    if let Some(notice) = state.notice() {
        return Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }

    if state.catalog().is_loading() {
        let spinner = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
        return Line::from(Span::styled(
            format!("{spinner} Loading models..."),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(error) = state.catalog().error_message() {
        return Line::from(vec![
            Span::styled(format!("⚠ {error}"), Style::default().fg(Color::Red)),
            Span::styled(" · Ctrl+R to retry", Style::default().fg(Color::DarkGray)),
        ]);
    }

    let total = state.catalog().models().len();
    let count = if state.query().trim().is_empty() {
        format!("{total} model{}", if total == 1 { "" } else { "s" })
    } else {
        format!("{visible_count} of {total} models")
    };
    Line::from(Span::styled(count, Style::default().fg(Color::DarkGray)))
}

fn hints(state: &PickerState) -> Vec<InputHint<'static>> {
    let esc = if state.query().is_empty() {
        "cancel"
    } else {
        "clear"
    };
    vec![
        InputHint::new("↑↓", "navigate"),
        InputHint::new("Enter", "select"),
        InputHint::new("Tab", "details"),
        InputHint::new("Ctrl+R", "reload"),
        InputHint::new("Esc", esc),
    ]
}
