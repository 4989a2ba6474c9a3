use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::thread;

/// Requests per minute allowed by the Mapbox free tier for geocoding.
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 300;

/// Blocking wrapper around a direct governor limiter, shared between clones.
#[derive(Clone)]
pub struct Limiter {
    inner: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    clock: DefaultClock,
}

impl Limiter {
    pub fn per_minute(requests: u32) -> Self {
        let per_minute = NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN);
        let clock = DefaultClock::default();
        Self {
            inner: Arc::new(RateLimiter::direct_with_clock(
                Quota::per_minute(per_minute),
                &clock,
            )),
            clock,
        }
    }

    /// Blocks the calling thread until a request slot is free.
    pub fn wait(&self) {
        while let Err(not_until) = self.inner.check() {
            let delay = not_until.wait_time_from(self.clock.now());
            log::debug!("Rate limit reached, sleeping {:?}", delay);
            thread::sleep(delay);
        }
    }
}

impl Default for Limiter {
    fn default() -> Self {
        Self::per_minute(DEFAULT_REQUESTS_PER_MINUTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn first_requests_within_quota_do_not_block() {
        let limiter = Limiter::per_minute(60);
        let started = Instant::now();
        limiter.wait();
        limiter.wait();
        assert!(started.elapsed().as_millis() < 500);
    }

    #[test]
    fn zero_quota_is_clamped_to_one() {
        let limiter = Limiter::per_minute(0);
        limiter.wait();
    }
}
