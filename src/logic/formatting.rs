//! Formatting and display logic
//!
//! Pure functions for links and labels shown next to tags and posts.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::model::stats::StatState;

const INSTAGRAM_POST_URL: &str = "https://www.instagram.com/p/";
const INSTAGRAM_EXPLORE_URL: &str = "https://www.instagram.com/explore/tags/";

/// Public permalink for a post
///
/// # Examples
/// ```
/// use toptui::logic::formatting::post_permalink;
///
/// assert_eq!(post_permalink("BdXy"), "https://www.instagram.com/p/BdXy");
/// ```
pub fn post_permalink(short_code: &str) -> String {
    format!("{}{}", INSTAGRAM_POST_URL, short_code)
}

/// Explore page for a tag
///
/// # Examples
/// ```
/// use toptui::logic::formatting::tag_explore_link;
///
/// assert_eq!(tag_explore_link("sunset"), "https://www.instagram.com/explore/tags/sunset");
/// ```
pub fn tag_explore_link(tag: &str) -> String {
    format!("{}{}", INSTAGRAM_EXPLORE_URL, tag)
}

/// Label for a lazily fetched tag count
///
/// Unresolved states render a placeholder; a resolved count renders as the plain integer.
pub fn stat_label(state: &StatState) -> String {
    match state {
        StatState::Unfetched => "?".to_string(),
        StatState::Pending { .. } => "…".to_string(),
        StatState::Resolved(count) => count.to_string(),
        StatState::Failed => "n/a".to_string(),
    }
}

/// Cut a string down to a display width, marking the cut with `…`
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
