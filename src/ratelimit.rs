use governor::{DefaultDirectRateLimiter, Quota, RateLimiter as GovernorRateLimiter};
use nonzero_ext::nonzero;
use std::num::NonZeroU32;

/// Keeps us polite towards the timetable host.
///
/// Requests are issued one at a time, so this only ever spaces them out; it
/// never has more than one caller waiting.
pub struct RateLimiter {
    req_per_sec: DefaultDirectRateLimiter,
}

impl RateLimiter {
    pub fn new(req_per_sec: NonZeroU32) -> Self {
        // No bursts: each request waits for its own slot.
        let quota = Quota::per_second(req_per_sec).allow_burst(nonzero!(1u32));
        RateLimiter {
            req_per_sec: GovernorRateLimiter::direct(quota),
        }
    }

    pub async fn wait_until_ready(&self) {
        self.req_per_sec.until_ready().await;
    }
}
