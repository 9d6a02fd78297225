use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout information for rendering
pub struct LayoutInfo {
    /// Query input box at the top
    pub input_area: Rect,
    /// View tabs (tags / posts)
    pub tabs_area: Rect,
    /// Result list area
    pub content_area: Rect,
    /// Hotkey legend area (full width)
    pub legend_area: Rect,
    /// Bottom status bar area
    pub status_area: Rect,
}

/// Calculate the screen layout for all UI components
pub fn calculate_layout(terminal_size: Rect, legend_height: u16) -> LayoutInfo {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Query input (borders + one line)
            Constraint::Length(1),             // View tabs
            Constraint::Min(3),                // Result list
            Constraint::Length(legend_height), // Legend area (exact fit for wrapped content)
            Constraint::Length(1),             // Status bar
        ])
        .split(terminal_size);

    LayoutInfo {
        input_area: chunks[0],
        tabs_area: chunks[1],
        content_area: chunks[2],
        legend_area: chunks[3],
        status_area: chunks[4],
    }
}
