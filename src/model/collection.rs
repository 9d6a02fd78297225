//! Sortable collection views
//!
//! Sort settings for one collection kind. The dimension type fixes which keys are
//! valid, so a tag view can never end up sorted by likes.

use crate::logic::sorting::{compute_order, PostDimension, SortDimension, TagDimension};
use crate::logic::ui::toggle_direction;
use crate::SortDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortableCollectionView<D: SortDimension> {
    dimension: D,
    direction: SortDirection,
}

pub type TagView = SortableCollectionView<TagDimension>;
pub type PostView = SortableCollectionView<PostDimension>;

impl<D: SortDimension> Default for SortableCollectionView<D> {
    fn default() -> Self {
        Self {
            dimension: D::DEFAULT,
            direction: SortDirection::Descending,
        }
    }
}

impl<D: SortDimension> SortableCollectionView<D> {
    pub fn new(dimension: D, direction: SortDirection) -> Self {
        Self {
            dimension,
            direction,
        }
    }

    pub fn dimension(&self) -> D {
        self.dimension
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn toggle_dimension(&mut self) {
        self.dimension = self.dimension.toggled();
    }

    pub fn toggle_direction(&mut self) {
        self.direction = toggle_direction(self.direction);
    }

    /// Ordered copy of `items` under the current settings
    pub fn compute_order(&self, items: &[D::Item]) -> Vec<D::Item> {
        compute_order(items, self.dimension, self.direction)
    }

    /// Short label for the status bar, e.g. "count desc"
    pub fn label(&self) -> String {
        format!("{} {}", self.dimension.as_str(), self.direction.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tags = TagView::default();
        assert_eq!(tags.dimension(), TagDimension::Count);
        assert_eq!(tags.direction(), SortDirection::Descending);

        let posts = PostView::default();
        assert_eq!(posts.dimension(), PostDimension::Recency);
        assert_eq!(posts.direction(), SortDirection::Descending);
    }

    #[test]
    fn test_toggles_are_involutions() {
        let original = TagView::default();

        let mut view = original;
        view.toggle_dimension();
        assert_ne!(view, original);
        view.toggle_dimension();
        assert_eq!(view, original);

        view.toggle_direction();
        assert_ne!(view, original);
        view.toggle_direction();
        assert_eq!(view, original);
    }

    #[test]
    fn test_label() {
        let mut view = PostView::default();
        assert_eq!(view.label(), "recent desc");
        view.toggle_dimension();
        view.toggle_direction();
        assert_eq!(view.label(), "likes asc");
    }
}
