//! Sorting comparison logic
//!
//! Pure functions for ordering tag and post collections.

use crate::api::{PostSummary, TagStat};
use crate::SortDirection;
use std::cmp::Ordering;
use std::fmt::Debug;

/// A sort key selector bound to one collection kind
///
/// Each kind has exactly two dimensions, so `toggled` is a binary flip.
pub trait SortDimension: Copy + Eq + Debug {
    type Item: Clone;

    /// Dimension a fresh view starts with
    const DEFAULT: Self;

    fn toggled(self) -> Self;

    /// Ascending comparison for this dimension
    fn compare(self, a: &Self::Item, b: &Self::Item) -> Ordering;

    fn as_str(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagDimension {
    Alphabetic,
    Count,
}

impl SortDimension for TagDimension {
    type Item = TagStat;

    const DEFAULT: Self = TagDimension::Count;

    fn toggled(self) -> Self {
        match self {
            TagDimension::Alphabetic => TagDimension::Count,
            TagDimension::Count => TagDimension::Alphabetic,
        }
    }

    fn compare(self, a: &TagStat, b: &TagStat) -> Ordering {
        match self {
            TagDimension::Alphabetic => a.tag.cmp(&b.tag),
            // Unresolved counts sort below every resolved count
            TagDimension::Count => a.count.cmp(&b.count),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            TagDimension::Alphabetic => "tag",
            TagDimension::Count => "count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostDimension {
    Recency,
    Likes,
}

impl SortDimension for PostDimension {
    type Item = PostSummary;

    const DEFAULT: Self = PostDimension::Recency;

    fn toggled(self) -> Self {
        match self {
            PostDimension::Recency => PostDimension::Likes,
            PostDimension::Likes => PostDimension::Recency,
        }
    }

    fn compare(self, a: &PostSummary, b: &PostSummary) -> Ordering {
        match self {
            // Post ids grow with creation time
            PostDimension::Recency => a.id.cmp(&b.id),
            PostDimension::Likes => a.likes.cmp(&b.likes),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            PostDimension::Recency => "recent",
            PostDimension::Likes => "likes",
        }
    }
}

/// Return a freshly ordered copy of `items`
///
/// Uses a stable sort, and descending order flips the key comparison rather than
/// reversing the output, so equal keys keep their input order in both directions.
pub fn compute_order<D: SortDimension>(
    items: &[D::Item],
    dimension: D,
    direction: SortDirection,
) -> Vec<D::Item> {
    let mut ordered = items.to_vec();
    ordered.sort_by(|a, b| {
        let result = dimension.compare(a, b);
        match direction {
            SortDirection::Ascending => result,
            SortDirection::Descending => result.reverse(),
        }
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PostId;

    fn make_post(id: u64, likes: u64) -> PostSummary {
        PostSummary {
            id: PostId(id),
            short_code: format!("code{}", id),
            preview_link: String::new(),
            text: None,
            tags: vec![],
            likes,
        }
    }

    fn tag_names(tags: &[TagStat]) -> Vec<&str> {
        tags.iter().map(|t| t.tag.as_str()).collect()
    }

    #[test]
    fn test_tags_by_count() {
        let tags = vec![TagStat::new("cat", 5), TagStat::new("art", 9)];

        let desc = compute_order(&tags, TagDimension::Count, SortDirection::Descending);
        assert_eq!(tag_names(&desc), vec!["art", "cat"]);

        let asc = compute_order(&tags, TagDimension::Count, SortDirection::Ascending);
        assert_eq!(tag_names(&asc), vec!["cat", "art"]);
    }

    #[test]
    fn test_tags_alphabetic() {
        let tags = vec![TagStat::new("cat", 5), TagStat::new("art", 9)];
        let asc = compute_order(&tags, TagDimension::Alphabetic, SortDirection::Ascending);
        assert_eq!(tag_names(&asc), vec!["art", "cat"]);
    }

    #[test]
    fn test_posts_by_recency() {
        let posts = vec![make_post(1, 10), make_post(2, 3)];
        let desc = compute_order(&posts, PostDimension::Recency, SortDirection::Descending);
        let ids: Vec<u64> = desc.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_posts_by_likes() {
        let posts = vec![make_post(1, 10), make_post(2, 3), make_post(3, 7)];
        let desc = compute_order(&posts, PostDimension::Likes, SortDirection::Descending);
        let likes: Vec<u64> = desc.iter().map(|p| p.likes).collect();
        assert_eq!(likes, vec![10, 7, 3]);
    }

    #[test]
    fn test_ties_keep_input_order_both_directions() {
        let tags = vec![
            TagStat::new("b", 1),
            TagStat::new("a", 1),
            TagStat::new("c", 1),
        ];
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let ordered = compute_order(&tags, TagDimension::Count, direction);
            assert_eq!(tag_names(&ordered), vec!["b", "a", "c"]);
        }
    }

    #[test]
    fn test_unresolved_count_sorts_lowest() {
        let tags = vec![TagStat::unresolved("x"), TagStat::new("y", 0)];
        let asc = compute_order(&tags, TagDimension::Count, SortDirection::Ascending);
        assert_eq!(tag_names(&asc), vec!["x", "y"]);
    }

    #[test]
    fn test_input_not_mutated() {
        let tags = vec![TagStat::new("cat", 5), TagStat::new("art", 9)];
        let _ = compute_order(&tags, TagDimension::Alphabetic, SortDirection::Ascending);
        assert_eq!(tag_names(&tags), vec!["cat", "art"]);
    }

    #[test]
    fn test_toggled_is_binary() {
        assert_eq!(TagDimension::Count.toggled(), TagDimension::Alphabetic);
        assert_eq!(TagDimension::Count.toggled().toggled(), TagDimension::Count);
        assert_eq!(PostDimension::Recency.toggled(), PostDimension::Likes);
        assert_eq!(PostDimension::Recency.toggled().toggled(), PostDimension::Recency);
    }
}
