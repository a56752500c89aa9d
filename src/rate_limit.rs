use dashmap::DashMap;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use crate::metrics::TRACKED_CLIENTS;

// Sliding window settings for the submit endpoint
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub window: Duration,      // how far back admitted hits are counted
    pub max_per_window: usize, // max admitted hits inside the window
    pub max_clients: usize,    // max distinct clients kept in memory
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(15 * 60),
            max_per_window: 5,
            max_clients: 10_000,
        }
    }
}

// Admitted hits of one client, oldest first
struct ClientWindow {
    hits: VecDeque<Instant>,
    last_seen: Instant,
}

impl ClientWindow {
    fn new(now: Instant) -> Self {
        Self {
            hits: VecDeque::new(),
            last_seen: now,
        }
    }

    // drop every hit that is `window` old or older
    fn evict_expired(&mut self, now: Instant, window: Duration) {
        while let Some(&oldest) = self.hits.front() {
            if now.saturating_duration_since(oldest) >= window {
                self.hits.pop_front();
            } else {
                break;
            }
        }
    }

    fn len(&self) -> usize {
        self.hits.len()
    }
}

// Per-client rolling window, evict/count/record runs under the entry lock
pub struct RateLimiter {
    clients: DashMap<String, ClientWindow>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            clients: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    // Admit a submission from `client_id` right now
    pub fn admit(&self, client_id: &str) -> bool {
        self.admit_at(client_id, Instant::now())
    }

    // Admit a submission from `client_id` at the given instant
    pub fn admit_at(&self, client_id: &str, now: Instant) -> bool {
        if !self.clients.contains_key(client_id) && self.clients.len() >= self.config.max_clients {
            self.evict_least_recent();
        }

        let admitted = {
            let mut entry = self
                .clients
                .entry(client_id.to_string())
                .or_insert_with(|| ClientWindow::new(now));

            entry.evict_expired(now, self.config.window);
            entry.last_seen = now;

            if entry.len() >= self.config.max_per_window {
                false
            } else {
                entry.hits.push_back(now);
                true
            }
        };

        TRACKED_CLIENTS.set(self.clients.len() as f64);
        admitted
    }

    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }

    // admitted hits still counted for a client (without evicting)
    pub fn hits_for(&self, client_id: &str) -> usize {
        self.clients.get(client_id).map(|w| w.len()).unwrap_or(0)
    }

    fn evict_least_recent(&self) {
        // collect first, the iterator holds shard read locks
        let oldest = self
            .clients
            .iter()
            .min_by_key(|entry| entry.value().last_seen)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            self.clients.remove(&key);
            tracing::debug!(client = %key, "Evicted least recently seen client from rate limiter");
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
