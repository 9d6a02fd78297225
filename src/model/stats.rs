//! Per-tag lazy statistics cache
//!
//! One cache lives for exactly one result set. A tag's entry only moves forward:
//! `Unfetched → Pending → Resolved | Failed`. A failed fetch may be retried while
//! the entry stays `Pending` (with a higher attempt number) until the attempt
//! budget is spent, after which it lands in the terminal `Failed` state.

use std::collections::HashMap;
use std::time::Duration;

use crate::logic::retry::{backoff_delay, should_retry, DEFAULT_MAX_ATTEMPTS};

/// Fetch state of a single tag's usage count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatState {
    Unfetched,
    /// A fetch is in flight or scheduled; `attempt` is 1-based
    Pending { attempt: u32 },
    Resolved(u64),
    Failed,
}

/// A fetch the caller must issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatFetch {
    pub tag: String,
    pub attempt: u32,
    /// How long to wait before sending (zero for first attempts)
    pub delay: Duration,
}

/// Result of reporting a failed fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureOutcome {
    /// Still pending; issue this fetch after its delay
    Retry(StatFetch),
    /// Attempt budget spent, entry is now `Failed`
    Exhausted,
    /// Entry was not pending, nothing changed
    Ignored,
}

#[derive(Clone, Debug)]
pub struct TagStatCache {
    entries: HashMap<String, StatState>,
    max_attempts: u32,
}

impl Default for TagStatCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl TagStatCache {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            entries: HashMap::new(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Pure lookup used for rendering
    pub fn state(&self, tag: &str) -> StatState {
        self.entries
            .get(tag)
            .copied()
            .unwrap_or(StatState::Unfetched)
    }

    /// Record a count that arrived embedded in another payload
    ///
    /// Seeded entries are never fetched. Settled entries are left alone.
    pub fn seed(&mut self, tag: &str, count: u64) -> bool {
        match self.state(tag) {
            StatState::Unfetched | StatState::Pending { .. } => {
                self.entries
                    .insert(tag.to_string(), StatState::Resolved(count));
                true
            }
            StatState::Resolved(_) | StatState::Failed => false,
        }
    }

    /// Begin fetching a tag's count
    ///
    /// Returns a fetch only for an unfetched tag. Pending and settled tags yield
    /// `None`, so any number of triggers produce at most one outstanding fetch.
    pub fn request(&mut self, tag: &str) -> Option<StatFetch> {
        if tag.is_empty() || self.state(tag) != StatState::Unfetched {
            return None;
        }

        self.entries
            .insert(tag.to_string(), StatState::Pending { attempt: 1 });

        Some(StatFetch {
            tag: tag.to_string(),
            attempt: 1,
            delay: Duration::ZERO,
        })
    }

    /// Store a fetched count; only a pending entry accepts it
    pub fn resolve(&mut self, tag: &str, count: u64) -> bool {
        match self.entries.get_mut(tag) {
            Some(state) if matches!(state, StatState::Pending { .. }) => {
                *state = StatState::Resolved(count);
                true
            }
            _ => false,
        }
    }

    /// Report a failed fetch for a pending entry
    pub fn fail(&mut self, tag: &str) -> FailureOutcome {
        let Some(state) = self.entries.get_mut(tag) else {
            return FailureOutcome::Ignored;
        };
        let StatState::Pending { attempt } = *state else {
            return FailureOutcome::Ignored;
        };

        if should_retry(attempt, self.max_attempts) {
            let next = attempt + 1;
            *state = StatState::Pending { attempt: next };
            FailureOutcome::Retry(StatFetch {
                tag: tag.to_string(),
                attempt: next,
                delay: backoff_delay(next),
            })
        } else {
            *state = StatState::Failed;
            FailureOutcome::Exhausted
        }
    }

    /// Number of tags with a fetch outstanding
    pub fn pending_count(&self) -> usize {
        self.entries
            .values()
            .filter(|s| matches!(s, StatState::Pending { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tag_is_unfetched() {
        let cache = TagStatCache::default();
        assert_eq!(cache.state("sunset"), StatState::Unfetched);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_request_only_once() {
        let mut cache = TagStatCache::default();
        let first = cache.request("sunset");
        assert_eq!(
            first,
            Some(StatFetch {
                tag: "sunset".to_string(),
                attempt: 1,
                delay: Duration::ZERO,
            })
        );
        assert_eq!(cache.state("sunset"), StatState::Pending { attempt: 1 });

        // Repeated triggers while pending do nothing
        assert_eq!(cache.request("sunset"), None);
        assert_eq!(cache.request("sunset"), None);
        assert_eq!(cache.pending_count(), 1);
    }

    #[test]
    fn test_resolved_never_refetched() {
        let mut cache = TagStatCache::default();
        cache.request("sunset");
        assert!(cache.resolve("sunset", 42));
        assert_eq!(cache.state("sunset"), StatState::Resolved(42));
        assert_eq!(cache.request("sunset"), None);
    }

    #[test]
    fn test_resolve_requires_pending() {
        let mut cache = TagStatCache::default();
        assert!(!cache.resolve("sunset", 42));
        assert_eq!(cache.state("sunset"), StatState::Unfetched);

        cache.request("sunset");
        cache.resolve("sunset", 42);
        assert!(!cache.resolve("sunset", 7));
        assert_eq!(cache.state("sunset"), StatState::Resolved(42));
    }

    #[test]
    fn test_seeded_tag_is_not_fetched() {
        let mut cache = TagStatCache::default();
        assert!(cache.seed("travel", 9));
        assert_eq!(cache.request("travel"), None);
        assert_eq!(cache.state("travel"), StatState::Resolved(9));
    }

    #[test]
    fn test_seed_does_not_overwrite_settled() {
        let mut cache = TagStatCache::default();
        cache.seed("travel", 9);
        assert!(!cache.seed("travel", 11));
        assert_eq!(cache.state("travel"), StatState::Resolved(9));
    }

    #[test]
    fn test_failure_retries_then_exhausts() {
        let mut cache = TagStatCache::new(3);
        cache.request("sunset");

        let FailureOutcome::Retry(second) = cache.fail("sunset") else {
            panic!("expected a retry after the first failure");
        };
        assert_eq!(second.attempt, 2);
        assert_eq!(second.delay, backoff_delay(2));
        assert_eq!(cache.state("sunset"), StatState::Pending { attempt: 2 });

        // Still pending, so triggers stay deduplicated during the backoff
        assert_eq!(cache.request("sunset"), None);

        assert!(matches!(cache.fail("sunset"), FailureOutcome::Retry(_)));
        assert_eq!(cache.fail("sunset"), FailureOutcome::Exhausted);
        assert_eq!(cache.state("sunset"), StatState::Failed);
    }

    #[test]
    fn test_failed_is_terminal() {
        let mut cache = TagStatCache::new(1);
        cache.request("sunset");
        assert_eq!(cache.fail("sunset"), FailureOutcome::Exhausted);

        assert_eq!(cache.request("sunset"), None);
        assert!(!cache.resolve("sunset", 5));
        assert!(!cache.seed("sunset", 5));
        assert_eq!(cache.fail("sunset"), FailureOutcome::Ignored);
        assert_eq!(cache.state("sunset"), StatState::Failed);
    }

    #[test]
    fn test_fail_unknown_tag_ignored() {
        let mut cache = TagStatCache::default();
        assert_eq!(cache.fail("nothing"), FailureOutcome::Ignored);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_attempt_budget_still_allows_one_fetch() {
        let mut cache = TagStatCache::new(0);
        assert!(cache.request("sunset").is_some());
        assert_eq!(cache.fail("sunset"), FailureOutcome::Exhausted);
    }

    #[test]
    fn test_empty_tag_never_requested() {
        let mut cache = TagStatCache::default();
        assert_eq!(cache.request(""), None);
    }
}
