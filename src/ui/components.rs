//! Shared UI components (header, add form, search box, status bar, toast, help).
//!
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::{KeyAction, format_action};
use crate::app::{AppState, FormField, InputMode, ToastVariant};

const CURSOR: &str = "▏";

/// Title line with the live badge.
pub fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let badge = if app.is_live() {
        Span::styled(
            " ● Live ",
            Style::default()
                .fg(app.theme.header_bg)
                .bg(app.theme.success)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            " ○ Offline ",
            Style::default().fg(app.theme.header_bg).bg(app.theme.muted),
        )
    };
    let line = Line::from(vec![
        Span::styled(
            "User Manager",
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        badge,
    ]);
    let p = Paragraph::new(line)
        .block(
            Block::default()
                .title("user-directory")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}

/// A single-line text field with placeholder and optional cursor.
fn field_spans<'a>(
    app: &AppState,
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
) -> Vec<Span<'a>> {
    let label_style = if focused {
        Style::default()
            .fg(app.theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text)
    };
    let mut spans = vec![Span::styled(format!("{label}: "), label_style)];
    if value.is_empty() && !focused {
        spans.push(Span::styled(placeholder, Style::default().fg(app.theme.muted)));
    } else {
        spans.push(Span::styled(value, Style::default().fg(app.theme.text)));
    }
    if focused {
        spans.push(Span::styled(CURSOR, Style::default().fg(app.theme.accent)));
    }
    spans
}

/// The "+ New User" form. The Add control is dimmed while the trimmed name is empty.
pub fn render_add_form(f: &mut Frame, area: Rect, app: &AppState) {
    let active = app.input_mode == InputMode::Add;
    let form = &app.add_form;
    let mut spans = field_spans(
        app,
        "Name",
        &form.name,
        "Full name",
        active && form.field == FormField::Name,
    );
    spans.push(Span::raw("   "));
    spans.extend(field_spans(
        app,
        "Email",
        &form.email,
        "Email (optional)",
        active && form.field == FormField::Email,
    ));
    spans.push(Span::raw("   "));
    let button_style = if form.can_submit() {
        Style::default()
            .fg(app.theme.header_bg)
            .bg(app.theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(app.theme.muted)
            .add_modifier(Modifier::DIM)
    };
    spans.push(Span::styled(" Add ", button_style));

    let border = if active { app.theme.accent } else { app.theme.border };
    let p = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title("+ New User")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(p, area);
}

/// Search box with a clear hint while a filter is active.
pub fn render_search(f: &mut Frame, area: Rect, app: &AppState) {
    let active = app.input_mode == InputMode::Search;
    let mut spans = vec![Span::raw("🔍 ")];
    if app.search_query.is_empty() && !active {
        spans.push(Span::styled(
            "Search by name or email…",
            Style::default().fg(app.theme.muted),
        ));
    } else {
        spans.push(Span::styled(
            app.search_query.as_str(),
            Style::default().fg(app.theme.text),
        ));
    }
    if active {
        spans.push(Span::styled(CURSOR, Style::default().fg(app.theme.accent)));
    }
    if !app.search_query.is_empty() {
        spans.push(Span::styled(
            "  ✕ clear",
            Style::default().fg(app.theme.muted),
        ));
    }
    let border = if active { app.theme.accent } else { app.theme.border };
    let p = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(p, area);
}

/// "N of M users", shown only when the collection is not empty.
pub fn render_counts(f: &mut Frame, area: Rect, app: &AppState) {
    let total = app.state().list.len();
    if total == 0 {
        return;
    }
    let shown = app.filtered().len();
    let plural = if total != 1 { "s" } else { "" };
    let p = Paragraph::new(format!("{shown} of {total} user{plural}"))
        .alignment(Alignment::Right)
        .style(Style::default().fg(app.theme.muted));
    f.render_widget(p, area);
}

/// Render the bottom status bar with mode and request status.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Add => "ADD",
        InputMode::Edit => "EDIT",
    };
    let mut msg = format!(
        "mode: {mode}  status: {}  ?: help",
        app.state().status.label(),
    );
    if let Some(err) = &app.state().error {
        msg.push_str("  error: ");
        msg.push_str(err);
    }
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Toast in the top-right corner.
pub fn render_toast(f: &mut Frame, area: Rect, app: &AppState) {
    if !app.toast.show {
        return;
    }
    let (color, title) = match app.toast.variant {
        ToastVariant::Success => (app.theme.success, "✓"),
        ToastVariant::Info => (app.theme.accent, "i"),
    };
    let width = 40u16.min(area.width);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height: 3u16.min(area.height),
    };
    let p = Paragraph::new(app.toast.message.clone())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title)
                .title_bottom(Line::from("x: dismiss").right_aligned())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .style(Style::default().fg(app.theme.text));
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Help overlay listing the active keybindings.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let rows: [(KeyAction, &str); 15] = [
        (KeyAction::NewUser, "focus the add form (Tab switches field, Enter adds)"),
        (KeyAction::StartSearch, "search by name or email"),
        (KeyAction::ClearSearch, "clear the search"),
        (KeyAction::EditSelection, "edit the selected user"),
        (KeyAction::DeleteSelection, "delete the selected user (asks first)"),
        (KeyAction::ConfirmDelete, "confirm the pending delete"),
        (KeyAction::Cancel, "cancel delete / close / dismiss"),
        (KeyAction::Refresh, "reload the list"),
        (KeyAction::DismissToast, "dismiss the notification"),
        (KeyAction::MoveUp, "previous row"),
        (KeyAction::MoveDown, "next row"),
        (KeyAction::PageUp, "previous page"),
        (KeyAction::PageDown, "next page"),
        (KeyAction::OpenHelp, "toggle this help"),
        (KeyAction::Quit, "quit"),
    ];
    let width = 72u16.min(area.width.saturating_sub(4)).max(40);
    let height = (rows.len() as u16 + 4).min(area.height.saturating_sub(2)).max(6);
    let rect = centered_rect(width, height, area);

    let mut lines: Vec<Line> = Vec::with_capacity(rows.len() + 2);
    for (action, what) in rows {
        let keys = app.keymap.keys_for(action).join(", ");
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<16}", keys),
                Style::default()
                    .fg(app.theme.highlight_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{:<16}", format_action(action)), Style::default().fg(app.theme.muted)),
            Span::styled(what, Style::default().fg(app.theme.text)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Rebind keys in keybinds.conf (Action = Key).",
        Style::default().fg(app.theme.muted),
    )));

    let p = Paragraph::new(lines).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
