use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::aio::MultiplexedConnection;
use redis::Script;

use super::{window_end, RateLimitDecision, RateLimitPolicy, RateLimitStore, RateLimitStoreError};

const KEY_PREFIX: &str = "ratelimit:";

/// Fixed-window check-and-consume, run atomically by Redis.
/// KEYS[1] = counter key, ARGV[1] = limit, ARGV[2] = window in ms.
/// Returns {allowed, count, pttl_ms}.
const CONSUME_SCRIPT: &str = r#"
local current = tonumber(redis.call('GET', KEYS[1]) or '0')
local limit = tonumber(ARGV[1])
if current >= limit then
  return {0, current, redis.call('PTTL', KEYS[1])}
end
current = redis.call('INCR', KEYS[1])
if current == 1 then
  redis.call('PEXPIRE', KEYS[1], ARGV[2])
end
return {1, current, redis.call('PTTL', KEYS[1])}
"#;

/// Counter store shared by every instance behind the same Redis.
///
/// Window expiry is Redis' own key TTL, so a lapsed window disappears rather
/// than lingering like the in-memory entries do.
#[derive(Clone)]
pub struct RedisRateLimitStore {
    conn: MultiplexedConnection,
    script: Script,
}

impl RedisRateLimitStore {
    pub async fn connect(client: &redis::Client) -> Result<Self, RateLimitStoreError> {
        let conn = client.get_multiplexed_tokio_connection().await?;
        Ok(Self {
            conn,
            script: Script::new(CONSUME_SCRIPT),
        })
    }
}

fn redis_key(key: &str) -> String {
    format!("{KEY_PREFIX}{key}")
}

/// Converts the script reply into a decision. A missing TTL (-1/-2) is
/// treated as a full window from `now`.
fn decode_reply(
    reply: &[i64],
    policy: &RateLimitPolicy,
    now: DateTime<Utc>,
) -> Result<RateLimitDecision, RateLimitStoreError> {
    let [allowed, count, pttl] = reply else {
        return Err(RateLimitStoreError::Protocol(format!(
            "expected 3 integers, got {reply:?}"
        )));
    };

    let ttl = if *pttl > 0 {
        Duration::from_millis(*pttl as u64)
    } else {
        policy.window
    };

    Ok(RateLimitDecision {
        allowed: *allowed == 1,
        count: (*count).max(0) as u32,
        limit: policy.max_requests,
        reset_at: window_end(now, ttl)?,
    })
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn consume(
        &self,
        key: &str,
        policy: &RateLimitPolicy,
        now: DateTime<Utc>,
    ) -> Result<RateLimitDecision, RateLimitStoreError> {
        let mut conn = self.conn.clone();
        let reply: Vec<i64> = self
            .script
            .key(redis_key(key))
            .arg(policy.max_requests)
            .arg(policy.window.as_millis() as u64)
            .invoke_async(&mut conn)
            .await?;

        decode_reply(&reply, policy, now)
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
