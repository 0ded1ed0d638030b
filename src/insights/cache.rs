//! Insight result cache
//!
//! Trend insights are stable for a given user, local day, and window length
//! (the rule walk is deterministic and only the day rollover changes its
//! input), so results are cached under `insight:{user_id}:{date}:{days}`
//! until the end of that local day. Writing a fresh entry prunes the user's
//! keys from other days, so at most the current day's windows stay live per
//! user.

use crate::insights::generator::InsightResult;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// Cache key for one user's insights on one local day over one window
pub fn cache_key(user_id: &str, date: NaiveDate, days: u32) -> String {
    format!("insight:{user_id}:{date}:{days}")
}

/// Key prefix shared by all of one user's entries for one local day
fn day_prefix(user_id: &str, date: NaiveDate) -> String {
    format!("insight:{user_id}:{date}:")
}

struct CacheEntry {
    value: InsightResult,
    expires_at: DateTime<Utc>,
}

/// In-process cache of generated insights, keyed by user, local day, and
/// window length
#[derive(Default)]
pub struct InsightCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl InsightCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached result, ignoring entries past their expiry
    pub async fn get(&self, user_id: &str, date: NaiveDate, days: u32) -> Option<InsightResult> {
        let key = cache_key(user_id, date, days);
        let entries = self.entries.lock().await;
        let entry = entries.get(&key)?;
        if entry.expires_at <= Utc::now() {
            return None;
        }
        debug!(%key, "insight cache hit");
        Some(entry.value.clone())
    }

    /// Store a result until `expires_at`, evicting the user's entries from
    /// other days (windows for the same day stay cached side by side)
    pub async fn put(
        &self,
        user_id: &str,
        date: NaiveDate,
        days: u32,
        value: InsightResult,
        expires_at: DateTime<Utc>,
    ) {
        let key = cache_key(user_id, date, days);
        let user_prefix = format!("insight:{user_id}:");
        let keep_prefix = day_prefix(user_id, date);
        let mut entries = self.entries.lock().await;
        entries.retain(|k, _| !k.starts_with(&user_prefix) || k.starts_with(&keep_prefix));
        debug!(%key, %expires_at, "insight cached");
        entries.insert(key, CacheEntry { value, expires_at });
    }

    /// Number of live (unexpired) entries
    pub async fn len(&self) -> usize {
        let now = Utc::now();
        self.entries
            .lock()
            .await
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
