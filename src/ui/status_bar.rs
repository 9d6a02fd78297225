use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Everything the status bar shows, gathered by the caller
pub struct StatusInfo<'a> {
    pub handle: Option<&'a str>,
    pub tag_count: usize,
    pub post_count: usize,
    pub loading: bool,
    pub sort_label: String,
    pub pending_stats: usize,
    pub searched_at: Option<DateTime<Local>>,
}

fn build_status_line(info: &StatusInfo) -> String {
    let Some(handle) = info.handle else {
        return "No search yet - type a handle and press Enter".to_string();
    };

    let mut parts = vec![
        format!("@{}", handle),
        format!("{} tags", info.tag_count),
        format!("{} posts", info.post_count),
        format!("sort: {}", info.sort_label),
    ];
    if info.loading {
        parts.push("loading…".to_string());
    }
    if info.pending_stats > 0 {
        parts.push(format!("{} counts pending", info.pending_stats));
    }
    if let Some(at) = info.searched_at {
        parts.push(format!("searched {}", at.format("%H:%M:%S")));
    }
    parts.join(" │ ")
}

/// Render the bottom status bar
pub fn render_status_bar(f: &mut Frame, area: Rect, info: &StatusInfo) {
    let paragraph = Paragraph::new(build_status_line(info))
        .style(Style::default().fg(Color::Black).bg(Color::Gray));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn info() -> StatusInfo<'static> {
        StatusInfo {
            handle: Some("nasa"),
            tag_count: 12,
            post_count: 30,
            loading: false,
            sort_label: "recent desc".to_string(),
            pending_stats: 0,
            searched_at: None,
        }
    }

    #[test]
    fn test_status_before_search() {
        let status = StatusInfo {
            handle: None,
            ..info()
        };
        assert!(build_status_line(&status).starts_with("No search yet"));
    }

    #[test]
    fn test_status_line() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 5).unwrap();
        let status = StatusInfo {
            loading: true,
            pending_stats: 2,
            searched_at: Some(at),
            ..info()
        };
        assert_eq!(
            build_status_line(&status),
            "@nasa │ 12 tags │ 30 posts │ sort: recent desc │ loading… │ 2 counts pending │ searched 09:30:05"
        );
    }
}
