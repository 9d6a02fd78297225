//! Post List UI
//!
//! Each post takes two lines: a header (id, likes, short code, caption) and its
//! tags with their lazy counts. The selected post highlights the tag under the
//! tag cursor, and its tag line scrolls so that tag stays on screen.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use toptui::api::PostSummary;
use toptui::logic::formatting::{stat_label, truncate_to_width};
use toptui::model::{StatState, TagStatCache};
use unicode_width::UnicodeWidthStr;

use super::tag_list::stat_color;

const TAG_INDENT: &str = "    ";
/// Shown in place of the indent when earlier tags are scrolled off
const TAG_SCROLLED: &str = "  … ";

fn build_header(post: &PostSummary, width: usize) -> Line<'static> {
    let head = format!("{:>12}  ♥ {:<7} {}", post.id.0, post.likes, post.short_code);
    let caption_width = width.saturating_sub(head.chars().count() + 2);
    let caption = post
        .text
        .as_deref()
        .map(|t| truncate_to_width(&t.replace('\n', " "), caption_width))
        .unwrap_or_default();

    Line::from(vec![
        Span::styled(head, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(caption, Style::default().fg(Color::Gray)),
    ])
}

/// First tag to draw so the cursor's tag fits in `avail` columns
///
/// Starts at the beginning whenever the cursor is reachable from there,
/// otherwise scrolls until the cursor's tag is the last one shown.
fn scroll_start(widths: &[usize], cursor: Option<usize>, avail: usize) -> usize {
    let Some(cursor) = cursor.filter(|_| !widths.is_empty()) else {
        return 0;
    };
    let cursor = cursor.min(widths.len() - 1);
    if widths[..=cursor].iter().sum::<usize>() <= avail {
        return 0;
    }

    let mut start = cursor;
    let mut used = widths[cursor];
    while start > 0 && used + widths[start - 1] <= avail {
        used += widths[start - 1];
        start -= 1;
    }
    start
}

fn build_tag_line(
    post: &PostSummary,
    stats: &TagStatCache,
    cursor: Option<usize>,
    width: usize,
) -> Line<'static> {
    if post.tags.is_empty() {
        return Line::from(Span::styled(
            "    (no tags)",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let chunks: Vec<(String, String, StatState)> = post
        .tags
        .iter()
        .map(|tag| {
            let state = stats.state(&tag.tag);
            (format!("#{}", tag.tag), format!(" {}  ", stat_label(&state)), state)
        })
        .collect();
    let widths: Vec<usize> = chunks
        .iter()
        .map(|(name, label, _)| name.width() + label.width())
        .collect();

    let avail = width.saturating_sub(TAG_INDENT.width());
    let start = scroll_start(&widths, cursor, avail);

    let indent = if start > 0 { TAG_SCROLLED } else { TAG_INDENT };
    let mut spans = vec![Span::styled(indent, Style::default().fg(Color::DarkGray))];
    for (idx, (name, label, state)) in chunks.into_iter().enumerate().skip(start) {
        let name_style = if cursor == Some(idx) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(name, name_style));
        spans.push(Span::styled(label, Style::default().fg(stat_color(&state))));
    }
    Line::from(spans)
}

#[allow(clippy::too_many_arguments)]
pub fn render_post_list(
    f: &mut Frame,
    area: Rect,
    posts: &[PostSummary],
    stats: &TagStatCache,
    selection: Option<usize>,
    tag_cursor: usize,
    sort_label: &str,
    loading: bool,
) {
    let title = if loading {
        format!(" Posts [{}] loading… ", sort_label)
    } else {
        format!(" Posts [{}] ", sort_label)
    };
    let inner_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = posts
        .iter()
        .enumerate()
        .map(|(idx, post)| {
            let cursor = (selection == Some(idx)).then_some(tag_cursor);
            ListItem::new(vec![
                build_header(post, inner_width),
                build_tag_line(post, stats, cursor, inner_width),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(selection);
    f.render_stateful_widget(list, area, &mut state);
}
