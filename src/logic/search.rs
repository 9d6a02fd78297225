//! Query handling logic
//!
//! Pure helpers for turning raw input into a profile handle.

/// Normalize user input into a profile handle
///
/// Surrounding whitespace is dropped; anything else is passed through untouched.
/// Returns `None` when nothing is left to search.
///
/// # Examples
/// ```
/// use toptui::logic::search::normalize_handle;
///
/// assert_eq!(normalize_handle("  nasa "), Some("nasa".to_string()));
/// assert_eq!(normalize_handle("   "), None);
/// ```
pub fn normalize_handle(input: &str) -> Option<String> {
    let handle = input.trim();

    if handle.is_empty() {
        None
    } else {
        Some(handle.to_string())
    }
}
