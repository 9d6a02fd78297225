//! Retry backoff logic
//!
//! Per-tag stat fetches that fail are retried a bounded number of times,
//! doubling the delay each time up to a cap.

use std::time::Duration;

const BASE_DELAY_MS: u64 = 500;
const MAX_DELAY_MS: u64 = 8_000;

/// Default number of fetch attempts per tag (first try included)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Delay before running `attempt` (1-based); the first attempt runs immediately
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use toptui::logic::retry::backoff_delay;
///
/// assert_eq!(backoff_delay(1), Duration::ZERO);
/// assert_eq!(backoff_delay(2), Duration::from_millis(500));
/// assert_eq!(backoff_delay(3), Duration::from_millis(1000));
/// assert_eq!(backoff_delay(20), Duration::from_millis(8000));
/// ```
pub fn backoff_delay(attempt: u32) -> Duration {
    if attempt <= 1 {
        return Duration::ZERO;
    }
    let exponent = (attempt - 2).min(16);
    let delay = BASE_DELAY_MS.saturating_mul(1u64 << exponent);
    Duration::from_millis(delay.min(MAX_DELAY_MS))
}

/// Whether another attempt is allowed after `attempt` failed
pub fn should_retry(attempt: u32, max_attempts: u32) -> bool {
    attempt < max_attempts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_then_caps() {
        assert_eq!(backoff_delay(4), Duration::from_millis(2000));
        assert_eq!(backoff_delay(5), Duration::from_millis(4000));
        assert_eq!(backoff_delay(6), Duration::from_millis(8000));
        assert_eq!(backoff_delay(7), Duration::from_millis(8000));
        assert_eq!(backoff_delay(u32::MAX), Duration::from_millis(8000));
    }

    #[test]
    fn test_should_retry_bounded() {
        assert!(should_retry(1, 3));
        assert!(should_retry(2, 3));
        assert!(!should_retry(3, 3));
        assert!(!should_retry(1, 1));
    }
}
