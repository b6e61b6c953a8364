pub mod components;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::AppState;

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    components::render_header(f, root[0], app);
    components::render_add_form(f, root[1], app);
    components::render_search(f, root[2], app);
    users::render_users_list(f, root[3], app);
    components::render_counts(f, root[4], app);
    components::render_status_bar(f, root[5], app);

    components::render_toast(f, f.area(), app);
    if app.show_help {
        components::render_help_modal(f, f.area(), app);
    }
}
