use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::{Duration, Instant};

use crate::app::{AppState, InputMode, KeyAction};
use crate::ui;

/// Whether the event loop should keep going after a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Mount, run the draw/input loop until quit, then unmount.
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    app.mount();
    let res = event_loop(terminal, app);
    app.unmount();
    res
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        app.pump(Instant::now());
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key) == Flow::Quit {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Route a key press according to the current input mode.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Flow::Quit;
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => {
            handle_search_key(app, key.code);
            Flow::Continue
        }
        InputMode::Add => {
            handle_add_key(app, key.code);
            Flow::Continue
        }
        InputMode::Edit => {
            handle_edit_key(app, key.code);
            Flow::Continue
        }
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> Flow {
    let Some(action) = app.keymap.resolve(&key) else {
        return Flow::Continue;
    };
    if app.show_help {
        match action {
            KeyAction::Quit => return Flow::Quit,
            KeyAction::OpenHelp | KeyAction::Cancel => app.show_help = false,
            _ => {}
        }
        return Flow::Continue;
    }
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::StartSearch => app.input_mode = InputMode::Search,
        KeyAction::ClearSearch => {
            app.search_query.clear();
            app.selected_index = 0;
        }
        KeyAction::NewUser => {
            app.add_form.field = crate::app::FormField::Name;
            app.input_mode = InputMode::Add;
        }
        KeyAction::EditSelection => app.begin_edit(),
        KeyAction::DeleteSelection => {
            if let Some(id) = app.selected_user().map(|u| u.id.clone()) {
                app.request_delete(id);
            }
        }
        KeyAction::ConfirmDelete => {
            app.confirm_delete();
        }
        KeyAction::Cancel => {
            if app.pending_delete.is_some() {
                app.cancel_delete();
            } else {
                app.toast.hide();
            }
        }
        KeyAction::Refresh => app.refresh(),
        KeyAction::DismissToast => app.toast.hide(),
        KeyAction::OpenHelp => app.show_help = true,
        KeyAction::MoveUp => app.move_selection(-1),
        KeyAction::MoveDown => app.move_selection(1),
        KeyAction::PageUp => app.page(-1),
        KeyAction::PageDown => app.page(1),
    }
    Flow::Continue
}

/// Typing into a single-line field. Returns whether the key was consumed.
fn edit_text(buf: &mut String, code: KeyCode) -> bool {
    match code {
        KeyCode::Char(c) => {
            buf.push(c);
            true
        }
        KeyCode::Backspace => {
            buf.pop();
            true
        }
        _ => false,
    }
}

fn handle_search_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.search_query.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        other => {
            if edit_text(&mut app.search_query, other) {
                app.selected_index = 0;
            }
        }
    }
}

fn handle_add_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Enter => {
            app.submit_add();
        }
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.add_form.field = app.add_form.field.toggle();
        }
        other => {
            edit_text(app.add_form.active_mut(), other);
        }
    }
}

fn handle_edit_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Enter => {
            app.save_edit();
        }
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            if let Some(draft) = app.edit_draft.as_mut() {
                draft.field = draft.field.toggle();
            }
        }
        other => {
            if let Some(draft) = app.edit_draft.as_mut() {
                edit_text(draft.active_mut(), other);
            }
        }
    }
}
