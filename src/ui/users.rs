use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::app::{AppState, FormField, InputMode};
use crate::model::UserRecord;
use crate::store::Status;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// How a row is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    Display,
    Editing,
    ConfirmDelete,
}

pub fn row_kind(app: &AppState, user: &UserRecord) -> RowKind {
    if app
        .state()
        .editing_user
        .as_ref()
        .is_some_and(|e| e.id == user.id)
    {
        RowKind::Editing
    } else if app.pending_delete.as_ref() == Some(&user.id) {
        RowKind::ConfirmDelete
    } else {
        RowKind::Display
    }
}

pub fn render_users_list(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(2) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }
    let block = Block::default()
        .title("Users")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    if app.state().status == Status::Loading {
        let frame = (app.started_at.elapsed().as_millis() / 100) as usize % SPINNER.len();
        let p = Paragraph::new(format!("{} Loading users…", SPINNER[frame]))
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.accent))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let filtered = app.filtered();
    if filtered.is_empty() {
        let msg = if app.search_query.is_empty() {
            "No users yet. Add one above!"
        } else {
            "No users match your search."
        };
        let p = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let start = (app.selected_index / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(filtered.len());
    let items: Vec<ListItem> = filtered[start..end]
        .iter()
        .enumerate()
        .map(|(i, u)| {
            let selected = start + i == app.selected_index;
            let line = match row_kind(app, u) {
                RowKind::Display => display_row(app, u),
                RowKind::Editing => edit_row(app, u),
                RowKind::ConfirmDelete => confirm_row(app, u),
            };
            let marker = if selected { "▶ " } else { "  " };
            let mut spans = vec![Span::raw(marker)];
            spans.extend(line.spans);
            let item = ListItem::new(Line::from(spans));
            if selected {
                item.style(
                    Style::default()
                        .fg(app.theme.highlight_fg)
                        .bg(app.theme.highlight_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn display_row<'a>(app: &AppState, u: &'a UserRecord) -> Line<'a> {
    let email = match &u.email {
        Some(e) => Span::styled(e.as_str(), Style::default().fg(app.theme.muted)),
        None => Span::styled(
            "no email",
            Style::default()
                .fg(app.theme.muted)
                .add_modifier(Modifier::ITALIC),
        ),
    };
    Line::from(vec![
        Span::styled(format!("{:<24}", u.name), Style::default().fg(app.theme.text)),
        Span::raw(" "),
        email,
    ])
}

fn edit_row<'a>(app: &AppState, u: &'a UserRecord) -> Line<'a> {
    let (name, email, field) = match &app.edit_draft {
        Some(d) if d.id == u.id => (d.name.clone(), d.email.clone(), Some(d.field)),
        _ => (u.name.clone(), u.email_or_empty().to_string(), None),
    };
    let focused = |f: FormField| app.input_mode == InputMode::Edit && field == Some(f);
    let cursor = |on: bool| if on { "▏" } else { "" };
    let accent = Style::default().fg(app.theme.accent);
    Line::from(vec![
        Span::styled("✎ Name: ", accent),
        Span::styled(
            format!("{name}{}", cursor(focused(FormField::Name))),
            Style::default().fg(app.theme.text),
        ),
        Span::styled("  Email: ", accent),
        Span::styled(
            format!("{email}{}", cursor(focused(FormField::Email))),
            Style::default().fg(app.theme.text),
        ),
        Span::styled("   Enter: save  Esc: cancel", Style::default().fg(app.theme.muted)),
    ])
}

fn confirm_row<'a>(app: &AppState, u: &'a UserRecord) -> Line<'a> {
    let danger = Style::default()
        .fg(app.theme.danger)
        .add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled(format!("{:<24}", u.name), Style::default().fg(app.theme.text)),
        Span::styled(" Sure? ", danger),
        Span::styled("y: yes, delete  Esc: no", Style::default().fg(app.theme.danger)),
    ])
}
