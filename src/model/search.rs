//! Search Model
//!
//! Owns the two result slices of the current search and decides which
//! responses may touch them.
//!
//! Every submitted search gets a new generation number. Requests are issued
//! under that generation and a response is applied only while it is still
//! current, so a slow answer to an older query can never overwrite the slices
//! of a newer one. The tag and post responses of one search are independent:
//! either may arrive first and each only fills its own slice.

use anyhow::Error;
use chrono::{DateTime, Local};
use std::time::Duration;

use super::stats::{FailureOutcome, StatFetch, TagStatCache};
use crate::api::{dedup_tags, PostSummary, ResponseError, TagStat};
use crate::logic::retry::DEFAULT_MAX_ATTEMPTS;
use crate::logic::search::normalize_handle;

/// Issued for each accepted search; both profile fetches carry it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub handle: String,
}

/// A tag stat fetch bound to the result set that asked for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatTicket {
    pub generation: u64,
    pub tag: String,
    pub attempt: u32,
    pub delay: Duration,
}

impl StatTicket {
    fn from_fetch(generation: u64, fetch: StatFetch) -> Self {
        Self {
            generation,
            tag: fetch.tag,
            attempt: fetch.attempt,
            delay: fetch.delay,
        }
    }
}

/// What happened to a profile slice response
#[derive(Debug)]
pub enum ApplyOutcome {
    /// Slice replaced with this many entries
    Applied(usize),
    /// Response was for the current search but unusable; slice left empty
    Rejected(Error),
    /// Response belongs to an older search and was dropped
    Stale,
}

/// What happened to a tag stat response
#[derive(Debug)]
pub enum StatOutcome {
    Resolved(u64),
    /// Fetch failed but another attempt is allowed
    Retry(StatTicket, Error),
    /// Fetch failed and the tag is now marked failed
    Exhausted(Error),
    /// Response belongs to an older result set
    Stale,
    /// Tag was not waiting for a value
    Ignored,
}

#[derive(Clone, Debug)]
pub struct SearchModel {
    /// Handle of the latest accepted search
    pub handle: Option<String>,

    /// Bumped on every accepted search
    pub generation: u64,

    pub tags: Vec<TagStat>,
    pub posts: Vec<PostSummary>,

    /// True until the current search's tag response arrives
    pub tags_loading: bool,

    /// True until the current search's post response arrives
    pub posts_loading: bool,

    /// Lazy per-tag counts for the current result set
    pub stats: TagStatCache,

    /// Wall-clock time of the latest accepted search
    pub searched_at: Option<DateTime<Local>>,

    max_stat_attempts: u32,
}

impl Default for SearchModel {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl SearchModel {
    pub fn new(max_stat_attempts: u32) -> Self {
        Self {
            handle: None,
            generation: 0,
            tags: Vec::new(),
            posts: Vec::new(),
            tags_loading: false,
            posts_loading: false,
            stats: TagStatCache::new(max_stat_attempts),
            searched_at: None,
            max_stat_attempts,
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.tags_loading || self.posts_loading
    }

    /// Start a new search
    ///
    /// Empty input is a no-op. Otherwise both slices are cleared right away,
    /// the stat cache is replaced, and the returned ticket must be used for
    /// both profile fetches.
    pub fn submit_search(&mut self, input: &str) -> Option<SearchTicket> {
        let handle = normalize_handle(input)?;

        self.generation += 1;
        self.handle = Some(handle.clone());
        self.tags.clear();
        self.posts.clear();
        self.tags_loading = true;
        self.posts_loading = true;
        self.stats = TagStatCache::new(self.max_stat_attempts);
        self.searched_at = Some(Local::now());

        Some(SearchTicket {
            generation: self.generation,
            handle,
        })
    }

    /// Apply the tag aggregation response for `generation`
    pub fn apply_tags(
        &mut self,
        generation: u64,
        result: Result<Vec<TagStat>, Error>,
    ) -> ApplyOutcome {
        if !self.is_current(generation) {
            return ApplyOutcome::Stale;
        }
        self.tags_loading = false;

        match result {
            Ok(tags) => {
                let tags = dedup_tags(tags);
                if tags.is_empty() {
                    return ApplyOutcome::Rejected(ResponseError::Empty.into());
                }
                self.tags = tags;
                ApplyOutcome::Applied(self.tags.len())
            }
            Err(e) => ApplyOutcome::Rejected(e),
        }
    }

    /// Apply the post listing response for `generation`
    ///
    /// Counts embedded in post tags pre-resolve the stat cache.
    pub fn apply_posts(
        &mut self,
        generation: u64,
        result: Result<Vec<PostSummary>, Error>,
    ) -> ApplyOutcome {
        if !self.is_current(generation) {
            return ApplyOutcome::Stale;
        }
        self.posts_loading = false;

        match result {
            Ok(posts) => {
                if posts.is_empty() {
                    return ApplyOutcome::Rejected(ResponseError::Empty.into());
                }
                for post in &posts {
                    for tag in &post.tags {
                        if let Some(count) = tag.count {
                            self.stats.seed(&tag.tag, count);
                        }
                    }
                }
                self.posts = posts;
                ApplyOutcome::Applied(self.posts.len())
            }
            Err(e) => ApplyOutcome::Rejected(e),
        }
    }

    /// Ask for a tag's count on behalf of an explicit user reveal
    ///
    /// Returns a ticket only when a fetch must actually be sent.
    pub fn request_stat(&mut self, tag: &str) -> Option<StatTicket> {
        if self.handle.is_none() {
            return None;
        }
        let generation = self.generation;
        self.stats
            .request(tag)
            .map(|fetch| StatTicket::from_fetch(generation, fetch))
    }

    /// Apply a tag stat response for `generation`
    pub fn apply_tag_stat(
        &mut self,
        generation: u64,
        tag: &str,
        result: Result<u64, Error>,
    ) -> StatOutcome {
        if !self.is_current(generation) {
            return StatOutcome::Stale;
        }

        match result {
            Ok(count) => {
                if self.stats.resolve(tag, count) {
                    StatOutcome::Resolved(count)
                } else {
                    StatOutcome::Ignored
                }
            }
            Err(e) => match self.stats.fail(tag) {
                FailureOutcome::Retry(fetch) => {
                    StatOutcome::Retry(StatTicket::from_fetch(generation, fetch), e)
                }
                FailureOutcome::Exhausted => StatOutcome::Exhausted(e),
                FailureOutcome::Ignored => StatOutcome::Ignored,
            },
        }
    }
}
