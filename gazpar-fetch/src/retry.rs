//! Retry policy for rate-limited requests.

use std::time::Duration;

/// Policy for retrying rate-limited requests.
///
/// The portal answers bursts with 429; the delay grows linearly with the
/// attempt index rather than exponentially, which matches how quickly its
/// limiter actually recovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Base delay between retries.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a new retry policy with the default base delay.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::from_secs(30),
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Calculates the backoff before retrying after attempt `attempt`
    /// (zero-indexed): `base_delay * (attempt + 1)`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay * (attempt + 1)
    }

    /// Returns true if another attempt may follow attempt `attempt`
    /// (zero-indexed).
    pub fn has_attempts_after(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_backoff() {
        let policy = RetryPolicy::new(5).with_base_delay(Duration::from_secs(2));

        assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(6));
    }

    #[test]
    fn test_attempt_budget() {
        let policy = RetryPolicy::new(3);

        assert!(policy.has_attempts_after(0));
        assert!(policy.has_attempts_after(1));
        assert!(!policy.has_attempts_after(2));
    }

    #[test]
    fn test_no_retry() {
        let policy = RetryPolicy::no_retry();
        assert!(!policy.has_attempts_after(0));
    }
}
