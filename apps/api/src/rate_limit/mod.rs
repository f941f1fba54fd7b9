//! Per-client fixed-window rate limiting guarding provider spend.
//!
//! Algorithm (per client key):
//! - no entry, or `now >= window_reset_at` → start a fresh window with count 0
//! - `count >= limit` → deny, count unchanged
//! - otherwise → increment, allow
//!
//! This is a plain fixed window: a burst straddling the boundary can get up to
//! `2 × limit` requests through in a short span. Accepted limitation.
//!
//! State lives behind `RateLimitStore`, whose single operation is an atomic
//! read-modify-write per key, so concurrent requests for one key never
//! under-count.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::warn;

mod client_key;
mod memory;
mod redis_store;

pub use client_key::ClientKey;
pub use memory::InMemoryRateLimitStore;
pub use redis_store::RedisRateLimitStore;

pub const DEFAULT_MAX_REQUESTS: u32 = 10;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60 * 60);
/// Longest window accepted from configuration.
pub const MAX_WINDOW: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
        }
    }
}

/// Counter state for one client key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub window_reset_at: DateTime<Utc>,
}

/// Outcome of one check-and-consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Requests counted in the current window, including this one if allowed.
    pub count: u32,
    pub limit: u32,
    pub reset_at: DateTime<Utc>,
}

impl RateLimitDecision {
    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.count)
    }

    /// Whole seconds until the window resets, never less than 1.
    pub fn retry_after_secs(&self, now: DateTime<Utc>) -> u64 {
        let secs = (self.reset_at - now).num_seconds();
        secs.max(1) as u64
    }
}

#[derive(Debug, Error)]
pub enum RateLimitStoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Unexpected rate limit store reply: {0}")]
    Protocol(String),

    #[error("Rate limit window out of range: {0:?}")]
    WindowOutOfRange(Duration),
}

/// Backing store for rate-limit counters.
///
/// `consume` must apply the fixed-window algorithm atomically for `key`:
/// two concurrent calls for the same key observe each other's increments.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    async fn consume(
        &self,
        key: &str,
        policy: &RateLimitPolicy,
        now: DateTime<Utc>,
    ) -> Result<RateLimitDecision, RateLimitStoreError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

/// Applies the fixed-window step to an existing entry (or none) and returns
/// the entry to store plus the decision. Shared by stores that hold entries
/// in process.
///
/// The ceiling is checked before any slot is taken, including the first slot
/// of a fresh window, so `count` never exceeds `max_requests`.
pub(crate) fn step(
    entry: Option<RateLimitEntry>,
    policy: &RateLimitPolicy,
    now: DateTime<Utc>,
) -> Result<(RateLimitEntry, RateLimitDecision), RateLimitStoreError> {
    let limit = policy.max_requests;

    let current = match entry {
        Some(e) if now < e.window_reset_at => e,
        // Absent, or the window boundary has been reached: start over.
        _ => RateLimitEntry {
            count: 0,
            window_reset_at: window_end(now, policy.window)?,
        },
    };

    if current.count >= limit {
        let decision = RateLimitDecision {
            allowed: false,
            count: current.count,
            limit,
            reset_at: current.window_reset_at,
        };
        return Ok((current, decision));
    }

    let next = RateLimitEntry {
        count: current.count + 1,
        window_reset_at: current.window_reset_at,
    };
    let decision = RateLimitDecision {
        allowed: true,
        count: next.count,
        limit,
        reset_at: next.window_reset_at,
    };
    Ok((next, decision))
}

/// `now + window`, or an error when the sum leaves chrono's range.
pub(crate) fn window_end(
    now: DateTime<Utc>,
    window: Duration,
) -> Result<DateTime<Utc>, RateLimitStoreError> {
    chrono::Duration::from_std(window)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or(RateLimitStoreError::WindowOutOfRange(window))
}

/// Front door used by the pipeline: a policy plus an injectable store.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    policy: RateLimitPolicy,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, policy: RateLimitPolicy) -> Self {
        Self { store, policy }
    }

    /// In-process limiter with the given policy.
    pub fn in_memory(policy: RateLimitPolicy) -> Self {
        Self::new(Arc::new(InMemoryRateLimitStore::new()), policy)
    }

    pub fn backend(&self) -> &'static str {
        self.store.name()
    }

    pub async fn check_and_consume(
        &self,
        client_key: &str,
    ) -> Result<RateLimitDecision, RateLimitStoreError> {
        self.check_and_consume_at(client_key, Utc::now()).await
    }

    pub async fn check_and_consume_at(
        &self,
        client_key: &str,
        now: DateTime<Utc>,
    ) -> Result<RateLimitDecision, RateLimitStoreError> {
        let decision = self.store.consume(client_key, &self.policy, now).await?;
        if !decision.allowed {
            warn!(
                "Rate limit exceeded for client {client_key} ({}/{} in window, resets at {})",
                decision.count, decision.limit, decision.reset_at
            );
        }
        Ok(decision)
    }
}
