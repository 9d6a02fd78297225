use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use toptui::ViewMode;

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::default().fg(Color::Yellow))
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(
    vim_mode: bool,
    view_mode: ViewMode,
    input_focused: bool,
    has_open_command: bool,
    has_clipboard_command: bool,
) -> Vec<Span<'static>> {
    if input_focused {
        return vec![
            key("Enter"),
            Span::raw(":Search  "),
            key("Esc"),
            Span::raw(":Browse results  "),
            key("^u"),
            Span::raw(":Clear  "),
            key("^c"),
            Span::raw(":Quit"),
        ];
    }

    let mut hotkey_spans = vec![];

    // Navigation keys (different for vim mode)
    if vim_mode {
        hotkey_spans.extend(vec![
            key("jk"),
            Span::raw(":Nav  "),
            key("gg/G"),
            Span::raw(":First/Last  "),
        ]);
        if view_mode == ViewMode::Posts {
            hotkey_spans.extend(vec![key("hl"), Span::raw(":Tag  ")]);
        }
    } else {
        hotkey_spans.extend(vec![key("↑/↓"), Span::raw(":Nav  ")]);
        if view_mode == ViewMode::Posts {
            hotkey_spans.extend(vec![key("←/→"), Span::raw(":Tag  ")]);
        }
    }

    hotkey_spans.extend(vec![
        key("Tab"),
        Span::raw(":Tags/Posts  "),
        key("s"),
        Span::raw(":Sort key  "),
        key("d"),
        Span::raw(":Direction  "),
        key("Enter"),
        Span::raw(":Reveal count  "),
    ]);

    if view_mode == ViewMode::Posts {
        hotkey_spans.extend(vec![key("a"), Span::raw(":Reveal all  ")]);
    }

    if has_open_command {
        hotkey_spans.extend(vec![key("o"), Span::raw(":Open link  ")]);
    }
    if has_clipboard_command {
        hotkey_spans.extend(vec![key("y"), Span::raw(":Copy link  ")]);
    }

    hotkey_spans.extend(vec![
        key("/"),
        Span::raw(":Search  "),
        key("q"),
        Span::raw(":Quit"),
    ]);

    hotkey_spans
}

fn build_legend_paragraph(
    vim_mode: bool,
    view_mode: ViewMode,
    input_focused: bool,
    has_open_command: bool,
    has_clipboard_command: bool,
) -> Paragraph<'static> {
    let hotkey_spans = build_hotkey_spans(
        vim_mode,
        view_mode,
        input_focused,
        has_open_command,
        has_clipboard_command,
    );

    Paragraph::new(vec![Line::from(hotkey_spans)])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false })
}

/// Render the hotkey legend (changes with vim mode, view and input focus)
pub fn render_legend(
    f: &mut Frame,
    area: Rect,
    vim_mode: bool,
    view_mode: ViewMode,
    input_focused: bool,
    has_open_command: bool,
    has_clipboard_command: bool,
) {
    let legend = build_legend_paragraph(
        vim_mode,
        view_mode,
        input_focused,
        has_open_command,
        has_clipboard_command,
    );
    f.render_widget(legend, area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(
    terminal_width: u16,
    vim_mode: bool,
    view_mode: ViewMode,
    input_focused: bool,
    has_open_command: bool,
    has_clipboard_command: bool,
) -> u16 {
    // Count lines without the block; line_count() misreads borders
    let hotkey_spans = build_hotkey_spans(
        vim_mode,
        view_mode,
        input_focused,
        has_open_command,
        has_clipboard_command,
    );
    let paragraph_for_counting = Paragraph::new(vec![Line::from(hotkey_spans)])
        .wrap(ratatui::widgets::Wrap { trim: false });

    let available_width = terminal_width.saturating_sub(2);
    let line_count = paragraph_for_counting.line_count(available_width);

    // Add top + bottom borders, ensure minimum of 3
    (line_count as u16).saturating_add(2).max(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper function to convert spans to plain text for assertions
    fn spans_to_text(spans: &[Span]) -> String {
        spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect::<Vec<_>>()
            .join("")
    }

    #[test]
    fn test_legend_while_typing() {
        let text = spans_to_text(&build_hotkey_spans(false, ViewMode::Posts, true, true, true));
        assert!(text.contains("Enter:Search"));
        assert!(!text.contains("Sort key"), "Result keys are inactive while typing: {}", text);
    }

    #[test]
    fn test_legend_hides_unconfigured_commands() {
        let text = spans_to_text(&build_hotkey_spans(false, ViewMode::Tags, false, false, false));
        let has_key = |k: &str| text.split_whitespace().any(|word| word.starts_with(k));
        assert!(!has_key("o:"), "got: {}", text);
        assert!(!has_key("y:"), "got: {}", text);

        let text = spans_to_text(&build_hotkey_spans(false, ViewMode::Tags, false, true, true));
        assert!(text.contains("o:Open link"));
        assert!(text.contains("y:Copy link"));
    }

    #[test]
    fn test_legend_post_only_keys() {
        let tags = spans_to_text(&build_hotkey_spans(false, ViewMode::Tags, false, false, false));
        let posts = spans_to_text(&build_hotkey_spans(false, ViewMode::Posts, false, false, false));
        assert!(!tags.contains("Reveal all"));
        assert!(posts.contains("a:Reveal all"));
        assert!(posts.contains("←/→:Tag"));
    }

    #[test]
    fn test_legend_vim_navigation() {
        let text = spans_to_text(&build_hotkey_spans(true, ViewMode::Posts, false, false, false));
        assert!(text.contains("jk:Nav"));
        assert!(text.contains("hl:Tag"));
        assert!(!text.contains("↑/↓"));
    }

    #[test]
    fn test_legend_height_grows_on_narrow_terminals() {
        let wide = calculate_legend_height(400, false, ViewMode::Posts, false, true, true);
        let narrow = calculate_legend_height(40, false, ViewMode::Posts, false, true, true);
        assert_eq!(wide, 3);
        assert!(narrow > wide);
    }
}
