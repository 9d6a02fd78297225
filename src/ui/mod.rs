// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: Calculates screen layout (input, tabs, list, legend, status)
// - render: Main orchestration function that coordinates all rendering
// - search: Renders the profile handle input box
// - tabs: Renders the Tags / Posts view switch
// - tag_list: Renders the tag view with lazy global counts
// - post_list: Renders the post view with per-tag counts and the tag cursor
// - legend: Renders hotkey legend
// - status_bar: Renders bottom status bar
// - toast: Renders toast notifications (brief pop-up messages)

pub mod layout;
pub mod legend;
pub mod post_list;
pub mod render;
pub mod search;
pub mod status_bar;
pub mod tabs;
pub mod tag_list;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
