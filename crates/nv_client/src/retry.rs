use std::time::Duration;

use crate::failure::FailureKind;
use crate::MAX_ATTEMPTS;

const BASE_DELAY_MS: u64 = 1_000;
const MAX_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry { delay: Duration },
    GiveUp,
}

/// Delay before the attempt that follows `attempt` (1-indexed).
pub fn backoff_delay(attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    Duration::from_millis((BASE_DELAY_MS << exponent).min(MAX_DELAY_MS))
}

pub fn retry_decision(attempt: u32, kind: &FailureKind) -> RetryDecision {
    if !kind.is_retryable() || attempt >= MAX_ATTEMPTS {
        return RetryDecision::GiveUp;
    }
    RetryDecision::Retry {
        delay: backoff_delay(attempt),
    }
}
