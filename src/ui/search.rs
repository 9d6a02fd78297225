//! Query Input UI
//!
//! Renders the handle input box with a cursor while it has focus.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the query input box
///
/// # Arguments
/// - `f`: Ratatui frame
/// - `area`: Rectangular area to render in
/// - `query`: Current handle text
/// - `focused`: Whether input is actively receiving keystrokes
/// - `loading`: Whether the current search still waits for a response
pub fn render_query_input(f: &mut Frame, area: Rect, query: &str, focused: bool, loading: bool) {
    let title = if focused {
        " Profile handle - Enter to search, Esc to browse results ".to_string()
    } else if loading {
        " Profile handle - searching… ".to_string()
    } else {
        " Profile handle (/) ".to_string()
    };

    let border_color = if focused { Color::Cyan } else { Color::Gray };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(border_color));

    let cursor_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::SLOW_BLINK);

    let input_line = if focused {
        Line::from(vec![
            Span::raw("@ "),
            Span::raw(query),
            Span::styled("█", cursor_style),
        ])
    } else {
        Line::from(vec![Span::styled(
            format!("@ {}", query),
            Style::default().fg(Color::Gray),
        )])
    };

    let paragraph = Paragraph::new(vec![input_line]).block(block);

    f.render_widget(paragraph, area);
}
