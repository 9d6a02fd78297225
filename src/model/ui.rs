//! UI Model
//!
//! This sub-model contains all state related to the user interface:
//! view mode, per-collection sort settings, selection, and popups.

use std::time::Instant;

use super::collection::{PostView, TagView};
use super::input::QueryInput;
use crate::logic;
use crate::ViewMode;

/// UI preferences and popups
#[derive(Clone, Debug)]
pub struct UiModel {
    // ============================================
    // VIEWS
    // ============================================
    /// Which collection is on screen
    pub view_mode: ViewMode,

    /// Sort settings for the tag list (kept while the post list is shown)
    pub tag_view: TagView,

    /// Sort settings for the post list (kept while the tag list is shown)
    pub post_view: PostView,

    // ============================================
    // SELECTION
    // ============================================
    /// Selected row in the ordered tag list
    pub tags_selection: Option<usize>,

    /// Selected row in the ordered post list
    pub posts_selection: Option<usize>,

    /// Selected tag inside the selected post row
    pub tag_cursor: usize,

    // ============================================
    // INPUT & POPUPS
    // ============================================
    pub input: QueryInput,

    /// Whether vim keybindings are enabled
    pub vim_mode: bool,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            view_mode: ViewMode::default(),
            tag_view: TagView::default(),
            post_view: PostView::default(),
            tags_selection: None,
            posts_selection: None,
            tag_cursor: 0,
            input: QueryInput::new(""),
            vim_mode,
            toast_message: None,
            should_quit: false,
        }
    }

    pub fn select_tags(&mut self) {
        self.view_mode = ViewMode::Tags;
    }

    pub fn select_posts(&mut self) {
        self.view_mode = ViewMode::Posts;
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = logic::ui::toggle_view_mode(self.view_mode);
    }

    /// Forget selections after the result slices were replaced
    pub fn reset_selection(&mut self) {
        self.tags_selection = None;
        self.posts_selection = None;
        self.tag_cursor = 0;
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    pub fn should_dismiss_toast(&self) -> bool {
        self.toast_message
            .as_ref()
            .is_some_and(|(_, shown)| logic::ui::should_dismiss_toast(shown.elapsed().as_millis()))
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::sorting::TagDimension;

    #[test]
    fn test_defaults() {
        let ui = UiModel::new(false);
        assert_eq!(ui.view_mode, ViewMode::Posts);
        assert!(ui.input.focused);
        assert!(ui.toast_message.is_none());
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut ui = UiModel::new(false);
        ui.select_tags();
        ui.select_tags();
        assert_eq!(ui.view_mode, ViewMode::Tags);
        ui.select_posts();
        ui.select_posts();
        assert_eq!(ui.view_mode, ViewMode::Posts);
    }

    #[test]
    fn test_switching_keeps_sort_settings() {
        let mut ui = UiModel::new(false);
        ui.select_tags();
        ui.tag_view.toggle_dimension();

        ui.select_posts();
        ui.select_tags();
        assert_eq!(ui.tag_view.dimension(), TagDimension::Alphabetic);
    }

    #[test]
    fn test_toast_lifecycle() {
        let mut ui = UiModel::new(false);
        ui.show_toast("Copied".to_string());
        assert!(ui.toast_message.is_some());
        assert!(!ui.should_dismiss_toast());
        ui.dismiss_toast();
        assert!(ui.toast_message.is_none());
    }
}
