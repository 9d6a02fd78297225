//! Navigation selection logic
//!
//! Pure functions for list selection (wrapping) and the in-row tag cursor (clamped).

/// Move the list selection down one row, wrapping to the top
///
/// # Examples
/// ```
/// use toptui::logic::navigation::next_selection;
///
/// assert_eq!(next_selection(None, 0), None);
/// assert_eq!(next_selection(None, 3), Some(0));
/// assert_eq!(next_selection(Some(1), 3), Some(2));
/// assert_eq!(next_selection(Some(2), 3), Some(0));
/// ```
pub fn next_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(i) if i + 1 >= list_len => 0,
        Some(i) => i + 1,
        None => 0,
    })
}

/// Move the list selection up one row, wrapping to the bottom
///
/// # Examples
/// ```
/// use toptui::logic::navigation::prev_selection;
///
/// assert_eq!(prev_selection(None, 0), None);
/// assert_eq!(prev_selection(Some(2), 3), Some(1));
/// assert_eq!(prev_selection(Some(0), 3), Some(2));
/// assert_eq!(prev_selection(None, 3), Some(2));
/// ```
pub fn prev_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(0) | None => list_len - 1,
        Some(i) if i >= list_len => list_len - 1,
        Some(i) => i - 1,
    })
}

/// Keep a selection valid after the list changed length
pub fn clamp_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }
    Some(current.unwrap_or(0).min(list_len - 1))
}

/// Move the tag cursor inside a post row without wrapping
pub fn move_cursor(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = cursor as isize + delta;
    target.clamp(0, len as isize - 1) as usize
}

/// Find the index of the first item whose key matches
pub fn find_index_by<T, K: PartialEq>(
    items: &[T],
    key: &K,
    key_of: impl Fn(&T) -> K,
) -> Option<usize> {
    items.iter().position(|item| key_of(item) == *key)
}
