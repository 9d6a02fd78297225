//! Pure Application Model
//!
//! This module defines the pure, cloneable state for the application.
//! The Model is organized into focused sub-models:
//!
//! - **SearchModel**: the current handle, both result slices, the lazy stat cache
//! - **UiModel**: view mode, sort settings, selection, input, toast
//!
//! Key principles:
//! - Clone + Debug: Can snapshot state
//! - No services: All I/O lives in the binary's runtime
//! - Operations that need a network call return a ticket for the runtime to send

pub mod collection;
pub mod input;
pub mod search;
pub mod stats;
pub mod ui;

pub use collection::{PostView, SortableCollectionView, TagView};
pub use input::QueryInput;
pub use search::{ApplyOutcome, SearchModel, SearchTicket, StatOutcome, StatTicket};
pub use stats::{StatState, TagStatCache};
pub use ui::UiModel;

use crate::api::{PostId, PostSummary, TagStat};
use crate::logic::formatting::{post_permalink, tag_explore_link};
use crate::logic::navigation;
use crate::ViewMode;

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub search: SearchModel,
    pub ui: UiModel,
}

/// Identity of the selected row, stable across re-sorting
enum SelectionKey {
    Tag(String),
    Post(PostId),
}

impl Model {
    pub fn new(vim_mode: bool, max_stat_attempts: u32) -> Self {
        Self {
            search: SearchModel::new(max_stat_attempts),
            ui: UiModel::new(vim_mode),
        }
    }

    /// Tag slice in the tag view's order
    pub fn ordered_tags(&self) -> Vec<TagStat> {
        self.ui.tag_view.compute_order(&self.search.tags)
    }

    /// Post slice in the post view's order
    pub fn ordered_posts(&self) -> Vec<PostSummary> {
        self.ui.post_view.compute_order(&self.search.posts)
    }

    /// Row count of the collection on screen
    pub fn visible_len(&self) -> usize {
        match self.ui.view_mode {
            ViewMode::Tags => self.search.tags.len(),
            ViewMode::Posts => self.search.posts.len(),
        }
    }

    fn selection(&self) -> Option<usize> {
        match self.ui.view_mode {
            ViewMode::Tags => self.ui.tags_selection,
            ViewMode::Posts => self.ui.posts_selection,
        }
    }

    fn set_selection(&mut self, selection: Option<usize>) {
        match self.ui.view_mode {
            ViewMode::Tags => self.ui.tags_selection = selection,
            ViewMode::Posts => {
                if selection != self.ui.posts_selection {
                    self.ui.tag_cursor = 0;
                }
                self.ui.posts_selection = selection;
            }
        }
    }

    pub fn selected_tag(&self) -> Option<TagStat> {
        let idx = self.ui.tags_selection?;
        self.ordered_tags().into_iter().nth(idx)
    }

    pub fn selected_post(&self) -> Option<PostSummary> {
        let idx = self.ui.posts_selection?;
        self.ordered_posts().into_iter().nth(idx)
    }

    /// Tag under the cursor of the selected post
    pub fn selected_post_tag(&self) -> Option<String> {
        let post = self.selected_post()?;
        post.tags.get(self.ui.tag_cursor).map(|t| t.tag.clone())
    }

    /// Submit whatever is in the query input
    ///
    /// On success the input gives up focus so the result keys work right away.
    /// The view mode is left as it was.
    pub fn submit_search(&mut self) -> Option<SearchTicket> {
        let handle = self.ui.input.submit()?;
        let ticket = self.search.submit_search(&handle)?;
        self.ui.reset_selection();
        self.ui.input.focused = false;
        Some(ticket)
    }

    /// Keep both selections inside their slices after a response landed
    pub fn clamp_selections(&mut self) {
        self.ui.tags_selection =
            navigation::clamp_selection(self.ui.tags_selection, self.search.tags.len());
        self.ui.posts_selection =
            navigation::clamp_selection(self.ui.posts_selection, self.search.posts.len());

        let tag_count = self.selected_post().map(|p| p.tags.len()).unwrap_or(0);
        self.ui.tag_cursor = navigation::move_cursor(self.ui.tag_cursor, 0, tag_count);
    }

    pub fn select_next(&mut self) {
        let next = navigation::next_selection(self.selection(), self.visible_len());
        self.set_selection(next);
    }

    pub fn select_prev(&mut self) {
        let prev = navigation::prev_selection(self.selection(), self.visible_len());
        self.set_selection(prev);
    }

    pub fn select_first(&mut self) {
        let first = if self.visible_len() > 0 { Some(0) } else { None };
        self.set_selection(first);
    }

    pub fn select_last(&mut self) {
        let last = self.visible_len().checked_sub(1);
        self.set_selection(last);
    }

    /// Move the tag cursor within the selected post
    pub fn move_tag_cursor(&mut self, delta: isize) {
        let tag_count = self.selected_post().map(|p| p.tags.len()).unwrap_or(0);
        self.ui.tag_cursor = navigation::move_cursor(self.ui.tag_cursor, delta, tag_count);
    }

    fn selection_key(&self) -> Option<SelectionKey> {
        match self.ui.view_mode {
            ViewMode::Tags => self.selected_tag().map(|t| SelectionKey::Tag(t.tag)),
            ViewMode::Posts => self.selected_post().map(|p| SelectionKey::Post(p.id)),
        }
    }

    fn restore_selection(&mut self, key: Option<SelectionKey>) {
        match key {
            Some(SelectionKey::Tag(tag)) => {
                let tags = self.ordered_tags();
                self.ui.tags_selection =
                    navigation::find_index_by(&tags, &tag, |t| t.tag.clone()).or(Some(0));
            }
            Some(SelectionKey::Post(id)) => {
                let posts = self.ordered_posts();
                self.ui.posts_selection =
                    navigation::find_index_by(&posts, &id, |p| p.id).or(Some(0));
            }
            None => {}
        }
    }

    /// Flip the active view's sort key, keeping the same row selected
    pub fn toggle_sort_dimension(&mut self) {
        let key = self.selection_key();
        match self.ui.view_mode {
            ViewMode::Tags => self.ui.tag_view.toggle_dimension(),
            ViewMode::Posts => self.ui.post_view.toggle_dimension(),
        }
        self.restore_selection(key);
    }

    /// Flip the active view's sort direction, keeping the same row selected
    pub fn toggle_sort_direction(&mut self) {
        let key = self.selection_key();
        match self.ui.view_mode {
            ViewMode::Tags => self.ui.tag_view.toggle_direction(),
            ViewMode::Posts => self.ui.post_view.toggle_direction(),
        }
        self.restore_selection(key);
    }

    /// Reveal the count of the tag the user is pointing at
    pub fn reveal_selected(&mut self) -> Option<StatTicket> {
        let tag = match self.ui.view_mode {
            ViewMode::Tags => self.selected_tag().map(|t| t.tag),
            ViewMode::Posts => self.selected_post_tag(),
        }?;
        self.search.request_stat(&tag)
    }

    /// Reveal every tag of the selected post
    pub fn reveal_selected_post_tags(&mut self) -> Vec<StatTicket> {
        let Some(post) = self.selected_post() else {
            return Vec::new();
        };
        post.tags
            .iter()
            .filter_map(|t| self.search.request_stat(&t.tag))
            .collect()
    }

    /// External link for the selected row: explore page for tags, permalink for posts
    pub fn selected_link(&self) -> Option<String> {
        match self.ui.view_mode {
            ViewMode::Tags => self.selected_tag().map(|t| tag_explore_link(&t.tag)),
            ViewMode::Posts => {
                let post = self.selected_post()?;
                if post.short_code.is_empty() {
                    None
                } else {
                    Some(post_permalink(&post.short_code))
                }
            }
        }
    }

    pub fn show_toast(&mut self, message: String) {
        self.ui.show_toast(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PostId;

    fn make_post(id: u64, likes: u64, tags: &[&str]) -> PostSummary {
        PostSummary {
            id: PostId(id),
            short_code: format!("code{}", id),
            preview_link: String::new(),
            text: None,
            tags: tags.iter().map(|t| TagStat::unresolved(*t)).collect(),
            likes,
        }
    }

    fn loaded_model() -> Model {
        let mut model = Model::new(false, 3);
        model.ui.input = QueryInput::new("nasa");
        let ticket = model.submit_search().unwrap();
        model.search.apply_tags(
            ticket.generation,
            Ok(vec![TagStat::new("cat", 5), TagStat::new("art", 9)]),
        );
        model.search.apply_posts(
            ticket.generation,
            Ok(vec![
                make_post(1, 10, &["sunset", "sea"]),
                make_post(2, 3, &["sunset"]),
            ]),
        );
        model.clamp_selections();
        model
    }

    #[test]
    fn test_model_creation() {
        let model = Model::new(false, 3);
        assert!(model.search.tags.is_empty());
        assert_eq!(model.ui.view_mode, ViewMode::Posts);
        assert_eq!(model.visible_len(), 0);
    }

    #[test]
    fn test_submit_search_keeps_view_mode() {
        let mut model = Model::new(false, 3);
        model.ui.select_tags();
        model.ui.input = QueryInput::new("nasa");
        assert!(model.submit_search().is_some());
        assert_eq!(model.ui.view_mode, ViewMode::Tags);
        assert!(!model.ui.input.focused);
    }

    #[test]
    fn test_clamp_selects_first_row() {
        let model = loaded_model();
        assert_eq!(model.ui.posts_selection, Some(0));
        // Default post order is most recent first
        assert_eq!(model.selected_post().unwrap().id, PostId(2));
    }

    #[test]
    fn test_sort_toggle_keeps_selected_row() {
        let mut model = loaded_model();
        model.select_next();
        assert_eq!(model.selected_post().unwrap().id, PostId(1));

        model.toggle_sort_direction();
        assert_eq!(model.ui.posts_selection, Some(0));
        assert_eq!(model.selected_post().unwrap().id, PostId(1));
    }

    #[test]
    fn test_reveal_post_tag_dedups_across_posts() {
        let mut model = loaded_model();
        // Selected post (id 2) has "sunset"; post 1 has it too
        assert!(model.reveal_selected().is_some());
        assert!(model.reveal_selected().is_none());

        model.select_next();
        let tickets = model.reveal_selected_post_tags();
        let tags: Vec<&str> = tickets.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["sea"]);
    }

    #[test]
    fn test_tag_cursor_resets_on_row_change() {
        let mut model = loaded_model();
        model.select_next();
        model.move_tag_cursor(1);
        assert_eq!(model.selected_post_tag().as_deref(), Some("sea"));
        model.move_tag_cursor(5);
        assert_eq!(model.ui.tag_cursor, 1);

        model.select_prev();
        assert_eq!(model.ui.tag_cursor, 0);
    }

    #[test]
    fn test_selected_link() {
        let mut model = loaded_model();
        assert_eq!(
            model.selected_link().as_deref(),
            Some("https://www.instagram.com/p/code2")
        );

        model.ui.select_tags();
        model.select_first();
        assert_eq!(
            model.selected_link().as_deref(),
            Some("https://www.instagram.com/explore/tags/art")
        );
    }
}
