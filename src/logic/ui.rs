//! UI state transition logic
//!
//! Pure functions for the binary toggles of the result views.

use crate::{SortDirection, ViewMode};

/// Flip ascending ↔ descending
///
/// # Examples
/// ```
/// use toptui::SortDirection;
/// use toptui::logic::ui::toggle_direction;
///
/// assert_eq!(toggle_direction(SortDirection::Descending), SortDirection::Ascending);
/// assert_eq!(toggle_direction(SortDirection::Ascending), SortDirection::Descending);
/// ```
pub fn toggle_direction(current: SortDirection) -> SortDirection {
    match current {
        SortDirection::Ascending => SortDirection::Descending,
        SortDirection::Descending => SortDirection::Ascending,
    }
}

/// Flip between the tag view and the post view
pub fn toggle_view_mode(current: ViewMode) -> ViewMode {
    match current {
        ViewMode::Tags => ViewMode::Posts,
        ViewMode::Posts => ViewMode::Tags,
    }
}

/// Check if toast should be dismissed based on elapsed time
pub fn should_dismiss_toast(elapsed_millis: u128) -> bool {
    const TOAST_MILLIS: u128 = 1500;
    elapsed_millis >= TOAST_MILLIS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_direction_is_involution() {
        for dir in [SortDirection::Ascending, SortDirection::Descending] {
            assert_eq!(toggle_direction(toggle_direction(dir)), dir);
        }
    }

    #[test]
    fn test_toggle_view_mode() {
        assert_eq!(toggle_view_mode(ViewMode::Posts), ViewMode::Tags);
        assert_eq!(toggle_view_mode(ViewMode::Tags), ViewMode::Posts);
    }

    #[test]
    fn test_toast_dismissal() {
        assert!(!should_dismiss_toast(0));
        assert!(!should_dismiss_toast(1499));
        assert!(should_dismiss_toast(1500));
    }
}
