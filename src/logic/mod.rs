//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - errors: Fetch error classification for the debug log
//! - formatting: Derived links and stat labels
//! - navigation: List selection and tag cursor movement
//! - retry: Backoff for per-tag stat retries
//! - search: Query input normalization
//! - sorting: Tag/post comparators and ordering
//! - ui: Binary view toggles

pub mod errors;
pub mod formatting;
pub mod navigation;
pub mod retry;
pub mod search;
pub mod sorting;
pub mod ui;
