//! Per-user request quotas.

use std::num::NonZeroU32;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::config::RateLimitConfig;

/// Keyed limiter over user ids.
pub struct UploadLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
}

impl UploadLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        let per_minute = NonZeroU32::new(config.uploads_per_minute).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::keyed(Quota::per_minute(per_minute)),
        }
    }

    /// Consume one request from `user_id`'s quota. False when exhausted.
    pub fn check(&self, user_id: &str) -> bool {
        self.limiter.check_key(&user_id.to_string()).is_ok()
    }

    /// Drop state for keys whose quota has fully replenished.
    pub fn prune(&self) {
        self.limiter.retain_recent();
    }
}
