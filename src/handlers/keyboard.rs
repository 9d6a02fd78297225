//! Keyboard Input Handler
//!
//! Handles all keyboard input and user interactions.
//! While the query input has focus, printable keys edit the handle; otherwise
//! they drive the result views.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use toptui::ViewMode;

use crate::App;

/// Handle keyboard input
///
/// Processes all keyboard events and dispatches to appropriate actions.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl-C always quits, even while typing
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.model.ui.should_quit = true;
        return;
    }

    if app.model.ui.input.focused {
        handle_input_key(app, key);
        return;
    }

    let vim_mode = app.model.ui.vim_mode;
    if vim_mode && key.code != KeyCode::Char('g') {
        app.last_key_was_g = false;
    }

    match key.code {
        KeyCode::Char('q') => app.model.ui.should_quit = true,
        KeyCode::Char('/') => app.model.ui.input.focused = true,

        // View switching
        KeyCode::Tab | KeyCode::BackTab => app.model.ui.toggle_view_mode(),
        KeyCode::Char('t') => app.model.ui.select_tags(),
        KeyCode::Char('p') => app.model.ui.select_posts(),

        // Sorting
        KeyCode::Char('s') => app.model.toggle_sort_dimension(),
        KeyCode::Char('d') => app.model.toggle_sort_direction(),

        // Tag stats
        KeyCode::Enter | KeyCode::Char(' ') => app.reveal_selected_tag(),
        KeyCode::Char('a') if app.model.ui.view_mode == ViewMode::Posts => {
            app.reveal_selected_post_tags()
        }

        // Links
        KeyCode::Char('o') => app.open_selected_link(),
        KeyCode::Char('y') => app.copy_selected_link(),

        // Vim keybindings
        KeyCode::Char('j') if vim_mode => app.model.select_next(),
        KeyCode::Char('k') if vim_mode => app.model.select_prev(),
        KeyCode::Char('h') if vim_mode => app.model.move_tag_cursor(-1),
        KeyCode::Char('l') if vim_mode => app.model.move_tag_cursor(1),
        KeyCode::Char('g') if vim_mode => {
            if app.last_key_was_g {
                // gg - jump to first
                app.model.select_first();
                app.last_key_was_g = false;
            } else {
                app.last_key_was_g = true;
            }
        }
        KeyCode::Char('G') if vim_mode => app.model.select_last(),

        // Standard navigation keys
        KeyCode::Down => app.model.select_next(),
        KeyCode::Up => app.model.select_prev(),
        KeyCode::Left => app.model.move_tag_cursor(-1),
        KeyCode::Right => app.model.move_tag_cursor(1),
        KeyCode::Home => app.model.select_first(),
        KeyCode::End => app.model.select_last(),

        _ => {}
    }
}

fn handle_input_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_search(),
        KeyCode::Esc => app.model.ui.input.focused = false,
        KeyCode::Backspace => app.model.ui.input.backspace(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.model.ui.input.clear()
        }
        KeyCode::Char(c) => app.model.ui.input.insert(c),
        _ => {}
    }
}
