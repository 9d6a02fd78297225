//! View Tabs UI
//!
//! One tab per collection, with the slice size next to each label.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Tabs,
    Frame,
};

use toptui::ViewMode;

fn tab_title(name: &str, count: usize, loading: bool) -> String {
    if loading {
        format!(" {} (…) ", name)
    } else {
        format!(" {} ({}) ", name, count)
    }
}

pub fn render_view_tabs(
    f: &mut Frame,
    area: Rect,
    view_mode: ViewMode,
    (tag_count, tags_loading): (usize, bool),
    (post_count, posts_loading): (usize, bool),
) {
    let titles = vec![
        Line::from(tab_title(ViewMode::Tags.as_str(), tag_count, tags_loading)),
        Line::from(tab_title(ViewMode::Posts.as_str(), post_count, posts_loading)),
    ];
    let selected = match view_mode {
        ViewMode::Tags => 0,
        ViewMode::Posts => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .divider("│");

    f.render_widget(tabs, area);
}
