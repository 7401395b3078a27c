// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Delay policies for SecretBindings whose reconciliation failed, and the
//! per-key failure counts they are applied to.

use crate::constants::controller::RETRY_DELAY_SECS;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// How long a failed key waits before it is reconciled again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Same delay after every failure
    Fixed(Duration),
    /// `base * 2^n` for the n-th consecutive failure, capped at `max`
    Exponential { base: Duration, max: Duration },
}

impl RetryPolicy {
    /// Delay for a key that has already failed `failures` times before this one
    pub fn delay(&self, failures: u32) -> Duration {
        match *self {
            RetryPolicy::Fixed(delay) => delay,
            RetryPolicy::Exponential { base, max } => {
                let factor = 1u32.checked_shl(failures).unwrap_or(u32::MAX);
                base.saturating_mul(factor).min(max)
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::Fixed(Duration::from_secs(RETRY_DELAY_SECS))
    }
}

/// Consecutive failure counts per `namespace/name` key.
///
/// A key's count grows with every failed reconcile and is dropped once the key
/// reconciles cleanly, so an exponential policy starts over from `base`.
#[derive(Debug, Default)]
pub struct RetryTracker {
    policy: RetryPolicy,
    failures: Mutex<HashMap<String, u32>>,
}

impl RetryTracker {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            failures: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Count another failure for `key` and return how long it has to wait
    pub fn record_failure(&self, key: &str) -> Duration {
        let mut failures = self.failures.lock().unwrap_or_else(PoisonError::into_inner);
        let count = failures.entry(key.to_string()).or_insert(0);
        let delay = self.policy.delay(*count);
        *count = count.saturating_add(1);
        delay
    }

    /// Forget the failure history of `key`
    pub fn forget(&self, key: &str) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    /// Number of consecutive failures recorded for `key`
    pub fn failures(&self, key: &str) -> u32 {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one_minute_fixed() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0), Duration::from_secs(60));
        assert_eq!(policy.delay(7), Duration::from_secs(60));
    }

    #[test]
    fn test_exponential_doubles_until_cap() {
        let policy = RetryPolicy::Exponential {
            base: Duration::from_secs(1),
            max: Duration::from_secs(10),
        };

        assert_eq!(policy.delay(0), Duration::from_secs(1));
        assert_eq!(policy.delay(1), Duration::from_secs(2));
        assert_eq!(policy.delay(3), Duration::from_secs(8));
        assert_eq!(policy.delay(4), Duration::from_secs(10));
    }

    #[test]
    fn test_exponential_does_not_overflow() {
        let policy = RetryPolicy::Exponential {
            base: Duration::from_secs(30),
            max: Duration::from_secs(600),
        };

        assert_eq!(policy.delay(40), Duration::from_secs(600));
        assert_eq!(policy.delay(u32::MAX), Duration::from_secs(600));
    }

    #[test]
    fn test_tracker_backs_off_per_key() {
        let tracker = RetryTracker::new(RetryPolicy::Exponential {
            base: Duration::from_secs(1),
            max: Duration::from_secs(4),
        });

        assert_eq!(tracker.record_failure("garden-dev/aws"), Duration::from_secs(1));
        assert_eq!(tracker.record_failure("garden-dev/aws"), Duration::from_secs(2));
        assert_eq!(tracker.record_failure("garden-dev/gcp"), Duration::from_secs(1));
        assert_eq!(tracker.record_failure("garden-dev/aws"), Duration::from_secs(4));
        assert_eq!(tracker.record_failure("garden-dev/aws"), Duration::from_secs(4));

        assert_eq!(tracker.failures("garden-dev/aws"), 4);
        assert_eq!(tracker.failures("garden-dev/gcp"), 1);
    }

    #[test]
    fn test_tracker_forget_restarts_backoff() {
        let tracker = RetryTracker::new(RetryPolicy::Exponential {
            base: Duration::from_secs(1),
            max: Duration::from_secs(60),
        });
        tracker.record_failure("garden-dev/aws");
        tracker.record_failure("garden-dev/aws");

        tracker.forget("garden-dev/aws");

        assert_eq!(tracker.failures("garden-dev/aws"), 0);
        assert_eq!(tracker.record_failure("garden-dev/aws"), Duration::from_secs(1));
    }
}
