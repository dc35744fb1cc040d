use crate::errors::{AppError, Result};
use crate::kv::KeyValueStore;
use crate::rate_limit::policy::{policy_for, RateLimitPolicy};
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Sliding window rate limiter over a TTL-capable key-value store.
///
/// Each identifier's record is the raw timestamps of its admitted events,
/// pruned lazily on check. The read-filter-write cycle is not atomic: two
/// concurrent checks for one identifier can both admit and undercount, so the
/// limit is a best-effort bound, never over-restrictive.
pub struct SlidingWindowRateLimiter {
    store: Arc<dyn KeyValueStore>,
    policy: RateLimitPolicy,
}

impl std::fmt::Debug for SlidingWindowRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlidingWindowRateLimiter")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Outcome of a rate limit check
#[derive(Debug, Clone, Serialize)]
pub struct Decision {
    /// Whether the event is admitted
    pub allowed: bool,
    /// Number of events remaining in the current window
    pub remaining: u64,
    /// Unix timestamp in milliseconds when the window will next admit
    pub reset_at: u64,
    /// Seconds until the window will next admit (only when denied)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl SlidingWindowRateLimiter {
    /// Create a rate limiter with an explicit policy
    pub fn new(store: Arc<dyn KeyValueStore>, policy: RateLimitPolicy) -> Self {
        Self { store, policy }
    }

    /// Create a rate limiter for a named action from the policy registry
    pub fn for_action(store: Arc<dyn KeyValueStore>, action: &str) -> Result<Self> {
        Ok(Self::new(store, policy_for(action)?))
    }

    /// Check whether a new event for this identifier is admitted, and record
    /// it if so. Rejected events are not recorded.
    pub async fn check(&self, identifier: &str) -> Result<Decision> {
        let now = Self::now_millis()?;
        self.check_at(identifier, now).await
    }

    async fn check_at(&self, identifier: &str, now: u64) -> Result<Decision> {
        let key = self.record_key(identifier);
        let window_millis = self.policy.window_seconds * 1000;
        let window_start = now.saturating_sub(window_millis);

        tracing::debug!(
            key = %key,
            limit = %self.policy.limit,
            window_seconds = %self.policy.window_seconds,
            "Checking rate limit"
        );

        let recorded: Vec<u64> = match self.store.get(&key).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };

        // Keep only events inside the trailing window
        let mut valid: Vec<u64> = recorded
            .into_iter()
            .filter(|&timestamp| timestamp > window_start)
            .collect();

        if valid.len() as u64 >= self.policy.limit {
            // The window next admits when its oldest event expires. An empty
            // record can only be over limit when the limit is zero; the full
            // window width stands in for the missing oldest event.
            let reset_at = valid
                .iter()
                .min()
                .map(|oldest| oldest + window_millis)
                .unwrap_or(now + window_millis);
            let retry_after = (reset_at.saturating_sub(now) + 999) / 1000;

            tracing::debug!(
                key = %key,
                current = %valid.len(),
                "Rate limit exceeded"
            );

            return Ok(Decision {
                allowed: false,
                remaining: 0,
                reset_at,
                retry_after: Some(retry_after),
            });
        }

        valid.push(now);
        let raw = serde_json::to_string(&valid)?;
        self.store
            .put(&key, &raw, self.policy.window_seconds)
            .await?;

        Ok(Decision {
            allowed: true,
            remaining: self.policy.limit - valid.len() as u64,
            reset_at: now + window_millis,
            retry_after: None,
        })
    }

    /// Delete this identifier's record, re-opening the full window immediately
    pub async fn reset(&self, identifier: &str) -> Result<()> {
        let key = self.record_key(identifier);
        self.store.delete(&key).await?;

        tracing::info!(key = %key, "Rate limit reset");

        Ok(())
    }

    fn record_key(&self, identifier: &str) -> String {
        format!("{}:{}", self.policy.key_prefix, identifier)
    }

    fn now_millis() -> Result<u64> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::Internal(format!("Time error: {}", e)))?;
        Ok(now.as_millis() as u64)
    }
}
