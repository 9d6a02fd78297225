use ratatui::Frame;

use toptui::ViewMode;

use super::{layout, legend, post_list, search, status_bar, tabs, tag_list, toast};
use crate::App;

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();
    let model = &app.model;
    let ui = &model.ui;
    let search_state = &model.search;

    let has_open_command = app.open_command.is_some();
    let has_clipboard_command = app.clipboard_command.is_some();

    let legend_height = legend::calculate_legend_height(
        size.width,
        ui.vim_mode,
        ui.view_mode,
        ui.input.focused,
        has_open_command,
        has_clipboard_command,
    );
    let layout_info = layout::calculate_layout(size, legend_height);

    search::render_query_input(
        f,
        layout_info.input_area,
        &ui.input.text,
        ui.input.focused,
        search_state.is_loading(),
    );

    tabs::render_view_tabs(
        f,
        layout_info.tabs_area,
        ui.view_mode,
        (search_state.tags.len(), search_state.tags_loading),
        (search_state.posts.len(), search_state.posts_loading),
    );

    // Only the active view is rendered; the other keeps its sort settings
    let sort_label = match ui.view_mode {
        ViewMode::Tags => {
            let label = ui.tag_view.label();
            tag_list::render_tag_list(
                f,
                layout_info.content_area,
                &model.ordered_tags(),
                &search_state.stats,
                ui.tags_selection,
                &label,
                search_state.tags_loading,
            );
            label
        }
        ViewMode::Posts => {
            let label = ui.post_view.label();
            post_list::render_post_list(
                f,
                layout_info.content_area,
                &model.ordered_posts(),
                &search_state.stats,
                ui.posts_selection,
                ui.tag_cursor,
                &label,
                search_state.posts_loading,
            );
            label
        }
    };

    legend::render_legend(
        f,
        layout_info.legend_area,
        ui.vim_mode,
        ui.view_mode,
        ui.input.focused,
        has_open_command,
        has_clipboard_command,
    );

    status_bar::render_status_bar(
        f,
        layout_info.status_area,
        &status_bar::StatusInfo {
            handle: search_state.handle.as_deref(),
            tag_count: search_state.tags.len(),
            post_count: search_state.posts.len(),
            loading: search_state.is_loading(),
            sort_label,
            pending_stats: search_state.stats.pending_count(),
            searched_at: search_state.searched_at,
        },
    );

    if let Some((message, _timestamp)) = &ui.toast_message {
        toast::render_toast(f, size, message);
    }
}
