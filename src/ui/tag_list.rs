//! Tag List UI
//!
//! One row per tag: profile usage count, then the lazily revealed global count.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use toptui::api::TagStat;
use toptui::logic::formatting::{stat_label, truncate_to_width};
use toptui::model::{StatState, TagStatCache};

const TAG_COLUMN_WIDTH: usize = 32;

/// Color for a lazy stat label
pub(crate) fn stat_color(state: &StatState) -> Color {
    match state {
        StatState::Unfetched => Color::DarkGray,
        StatState::Pending { .. } => Color::Yellow,
        StatState::Resolved(_) => Color::Green,
        StatState::Failed => Color::Red,
    }
}

fn build_tag_row(tag: &TagStat, stats: &TagStatCache) -> Line<'static> {
    let name = truncate_to_width(&format!("#{}", tag.tag), TAG_COLUMN_WIDTH);
    let profile_count = tag
        .count
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());
    let state = stats.state(&tag.tag);

    Line::from(vec![
        Span::raw(format!("{:<width$}", name, width = TAG_COLUMN_WIDTH)),
        Span::styled(
            format!("{:>8}", profile_count),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("   global: "),
        Span::styled(stat_label(&state), Style::default().fg(stat_color(&state))),
    ])
}

pub fn render_tag_list(
    f: &mut Frame,
    area: Rect,
    tags: &[TagStat],
    stats: &TagStatCache,
    selection: Option<usize>,
    sort_label: &str,
    loading: bool,
) {
    let title = if loading {
        format!(" Tags [{}] loading… ", sort_label)
    } else {
        format!(" Tags [{}] ", sort_label)
    };

    let items: Vec<ListItem> = tags
        .iter()
        .map(|tag| ListItem::new(build_tag_row(tag, stats)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(selection);
    f.render_stateful_widget(list, area, &mut state);
}
