//! Query input state
//!
//! The handle being typed and whether the input box has keyboard focus.

use crate::logic::search::normalize_handle;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryInput {
    pub text: String,
    pub focused: bool,
}

impl QueryInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            focused: true,
        }
    }

    pub fn insert(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Handle to search for, if the input holds one
    ///
    /// The text is kept so the user can tweak and resubmit it.
    pub fn submit(&self) -> Option<String> {
        normalize_handle(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing() {
        let mut input = QueryInput::default();
        for c in "nasx".chars() {
            input.insert(c);
        }
        input.backspace();
        input.insert('a');
        assert_eq!(input.text, "nasa");
        assert_eq!(input.submit(), Some("nasa".to_string()));
        assert_eq!(input.text, "nasa");
    }

    #[test]
    fn test_submit_empty() {
        let mut input = QueryInput::new("  ");
        assert_eq!(input.submit(), None);
        input.clear();
        input.backspace();
        assert_eq!(input.submit(), None);
    }
}
