use crate::errors::{AppError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Immutable configuration for one rate-limited action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitPolicy {
    /// Maximum permitted events per window
    pub limit: u64,
    /// Width of the sliding window in seconds
    pub window_seconds: u64,
    /// Prefix namespacing this policy's storage keys from others
    pub key_prefix: String,
}

impl RateLimitPolicy {
    pub fn new(limit: u64, window_seconds: u64, key_prefix: &str) -> Self {
        Self {
            limit,
            window_seconds,
            key_prefix: key_prefix.to_string(),
        }
    }
}

/// Registry of per-action policies, built once at process start.
static POLICIES: Lazy<HashMap<&'static str, RateLimitPolicy>> = Lazy::new(|| {
    let mut policies = HashMap::new();

    // General API: 100 requests per minute
    policies.insert("api", RateLimitPolicy::new(100, 60, "rl:api"));

    // Contact form: 3 messages per hour
    policies.insert("contact", RateLimitPolicy::new(3, 3600, "rl:contact"));

    // Login: 5 attempts per 15 minutes
    policies.insert("login", RateLimitPolicy::new(5, 900, "rl:login"));

    // Newsletter: 1 signup per day per IP
    policies.insert("newsletter", RateLimitPolicy::new(1, 86400, "rl:newsletter"));

    // Order creation: 10 per hour
    policies.insert("order", RateLimitPolicy::new(10, 3600, "rl:order"));

    policies
});

/// Look up the policy for a named action
pub fn policy_for(action: &str) -> Result<RateLimitPolicy> {
    POLICIES.get(action).cloned().ok_or_else(|| {
        AppError::Configuration(format!("Unknown rate limit action: {}", action))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_actions_resolve() {
        for action in ["api", "contact", "login", "newsletter", "order"] {
            let policy = policy_for(action).unwrap();
            assert!(policy.limit > 0);
            assert!(policy.window_seconds > 0);
            assert!(policy.key_prefix.starts_with("rl:"));
        }
    }

    #[test]
    fn test_unknown_action_is_configuration_error() {
        let err = policy_for("password_reset").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_contact_policy_values() {
        let policy = policy_for("contact").unwrap();
        assert_eq!(policy.limit, 3);
        assert_eq!(policy.window_seconds, 3600);
        assert_eq!(policy.key_prefix, "rl:contact");
    }
}
