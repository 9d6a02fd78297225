//! Profile Tag Explorer Library
//!
//! Exposes the pure state and wire types for testing

pub mod api;
pub mod logic;
pub mod model;

/// Which result collection is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    Tags,
    #[default]
    Posts,
}

impl ViewMode {
    pub fn as_str(&self) -> &str {
        match self {
            ViewMode::Tags => "Tags",
            ViewMode::Posts => "Posts",
        }
    }
}

/// Sort direction shared by both collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}
