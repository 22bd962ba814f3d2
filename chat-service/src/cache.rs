use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use common::language::Language;
use tracing::debug;

const CACHE_TTL: Duration = Duration::from_secs(5 * 60);
const CACHE_CAPACITY: usize = 100;
const EVICTION_BATCH: usize = 20;

#[derive(Debug, Clone)]
struct CachedResponse {
    response: String,
    stored_at: Instant,
}

/// Bounded, time-expiring memo of (question, language) -> answer.
///
/// Constructed once at service start and shared across requests; a single
/// mutex guards the map since entries are small and the worst-case operation
/// (batch eviction) is O(size). A poisoned lock degrades to a miss or a
/// skipped write, never to a failed answer.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CachedResponse>>,
    ttl: Duration,
    capacity: usize,
    eviction_batch: usize,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::with_limits(CACHE_TTL, CACHE_CAPACITY, EVICTION_BATCH)
    }

    pub fn with_limits(ttl: Duration, capacity: usize, eviction_batch: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            capacity,
            eviction_batch,
        }
    }

    fn key(question: &str, language: Language) -> String {
        format!("{}:{}", language.code(), question.trim().to_lowercase())
    }

    /// Returns the cached answer when one exists and is younger than the
    /// TTL. Expired entries are removed on read and reported as a miss.
    pub fn get(&self, question: &str, language: Language) -> Option<String> {
        let key = Self::key(question, language);
        let Ok(mut entries) = self.entries.lock() else {
            return None;
        };

        match entries.get(&key) {
            Some(cached) if cached.stored_at.elapsed() < self.ttl => {
                Some(cached.response.clone())
            }
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Inserts or overwrites the answer for the question. When the cache
    /// grows past capacity the oldest entries are purged in one batch,
    /// trading eviction precision for fewer sorts.
    pub fn put(&self, question: &str, language: Language, response: &str) {
        let key = Self::key(question, language);
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };

        entries.insert(
            key,
            CachedResponse {
                response: response.to_owned(),
                stored_at: Instant::now(),
            },
        );

        if entries.len() > self.capacity {
            let mut by_age: Vec<(String, Instant)> = entries
                .iter()
                .map(|(key, cached)| (key.clone(), cached.stored_at))
                .collect();
            by_age.sort_by_key(|(_, stored_at)| *stored_at);
            let evicted = by_age.len().min(self.eviction_batch);
            for (key, _) in by_age.into_iter().take(self.eviction_batch) {
                entries.remove(&key);
            }
            debug!(evicted, remaining = entries.len(), "Evicted oldest cache entries");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
