//! Global rate limiting for outbound requests
//!
//! A single [`RateLimiter`] is shared by every worker. Permits are handed
//! out one at a time, at least `period / max_calls` apart (rounded up to
//! the nanosecond), so no window of length `period` ever holds more than
//! `max_calls` requests. Callers over the ceiling wait; they never fail.

use crate::config::RateLimitConfig;
use crate::ConfigError;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::Quota;
use std::num::NonZeroU32;
use std::time::Duration;

type DirectLimiter = governor::RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Shared request ceiling
pub struct RateLimiter {
    limiter: DirectLimiter,
    interval: Duration,
    max_calls: NonZeroU32,
    period: Duration,
}

impl RateLimiter {
    /// Builds a limiter allowing `config.max_calls` requests per `config.period_ms`
    pub fn new(config: &RateLimitConfig) -> Result<Self, ConfigError> {
        let max_calls = NonZeroU32::new(config.max_calls).ok_or_else(|| {
            ConfigError::Validation("max-calls must be greater than 0".to_string())
        })?;
        let period = Duration::from_millis(config.period_ms);
        let too_short = || {
            ConfigError::Validation(format!(
                "period-ms {} is too short for {} calls",
                config.period_ms, max_calls
            ))
        };

        // Rounding down would let `max_calls + 1` permits fit in one period.
        let interval_nanos = period.as_nanos().div_ceil(u128::from(max_calls.get()));
        let interval = u64::try_from(interval_nanos)
            .map(Duration::from_nanos)
            .map_err(|_| too_short())?;

        // Burst of one: a full burst followed by refills would exceed the
        // ceiling inside the first period.
        let quota = Quota::with_period(interval).ok_or_else(too_short)?;

        Ok(Self {
            limiter: governor::RateLimiter::direct(quota),
            interval,
            max_calls,
            period,
        })
    }

    /// Minimum spacing between two permits
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until one more request is permitted
    pub async fn acquire(&self) {
        if self.limiter.check().is_err() {
            tracing::trace!(
                "Rate ceiling of {} calls per {:?} reached, waiting",
                self.max_calls,
                self.period
            );
            self.limiter.until_ready().await;
        }
    }

    #[cfg(test)]
    fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}
