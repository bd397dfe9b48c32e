//! Decision cache storage using an in-memory `HashMap`.
//!
//! Expiry is lazy: `get` ignores and drops expired entries, and `put` sweeps
//! expired entries once the map grows past `max_entries`. There is no
//! background sweeper.
//!
//! Each tier carries an invalidation generation. A caller that computes a
//! decision between a lookup and a store passes the generations it saw to
//! [`DecisionCache::put_if_current`], which drops the decision if its tier was
//! invalidated in the meantime.

use crate::config::CacheConfig;
use ascent_core::{RoutingDecision, Tier, TierTable};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

/// A cached decision with its expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Task signature the decision was cached under
    pub key: String,
    /// The decision as originally produced
    pub decision: RoutingDecision,
    /// When this entry was created
    pub created_at: Instant,
    /// When this entry expires, `None` if the TTL runs past any representable instant
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// Cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    /// Entries currently stored, expired ones included until swept
    pub entries: usize,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing live
    pub misses: u64,
    /// Entries removed by tier invalidation
    pub invalidations: u64,
}

/// TTL-bounded memo of routing decisions keyed by task signature.
#[derive(Debug, Clone)]
pub struct DecisionCache {
    storage: HashMap<String, CacheEntry>,
    config: CacheConfig,
    hits: u64,
    misses: u64,
    invalidations: u64,
    generations: TierTable<u64>,
}

impl DecisionCache {
    /// Creates a new decision cache with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        Self {
            storage: HashMap::new(),
            config,
            hits: 0,
            misses: 0,
            invalidations: 0,
            generations: TierTable::default(),
        }
    }

    /// Returns the live decision for `key`, annotated as a cache hit.
    pub fn get(&mut self, key: &str) -> Option<RoutingDecision> {
        self.get_at(key, Instant::now())
    }

    pub(crate) fn get_at(&mut self, key: &str, now: Instant) -> Option<RoutingDecision> {
        if !self.config.enabled {
            return None;
        }

        match self.storage.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                self.hits += 1;
                Some(entry.decision.as_cache_hit())
            }
            Some(_) => {
                self.storage.remove(key);
                self.misses += 1;
                None
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stores a decision under `key`, replacing any previous entry.
    pub fn put(&mut self, key: String, decision: RoutingDecision) {
        self.put_at(key, decision, Instant::now());
    }

    pub(crate) fn put_at(&mut self, key: String, decision: RoutingDecision, now: Instant) {
        if !self.config.enabled {
            return;
        }

        let entry = CacheEntry {
            key: key.clone(),
            decision,
            created_at: now,
            expires_at: now.checked_add(self.config.ttl()),
        };
        self.storage.insert(key, entry);

        if self.storage.len() > self.config.max_entries {
            let before = self.storage.len();
            self.clear_expired_at(now);
            let expired = before - self.storage.len();
            let mut evicted = 0_usize;
            while self.storage.len() > self.config.max_entries {
                self.evict_oldest();
                evicted += 1;
            }
            debug!(expired, evicted, "Pruned decision cache");
        }
    }

    /// Stores `decision` unless its tier was invalidated after `seen` was
    /// taken from [`Self::generations`]. Returns whether it was stored.
    pub fn put_if_current(
        &mut self,
        key: String,
        decision: RoutingDecision,
        seen: &TierTable<u64>,
    ) -> bool {
        let tier = decision.selected_tier();
        if self.generations.get(tier) != seen.get(tier) {
            debug!(tier = %tier, "Skipped caching a decision made before invalidation");
            return false;
        }
        self.put(key, decision);
        true
    }

    /// Invalidation generation of every tier.
    pub fn generations(&self) -> TierTable<u64> {
        self.generations
    }

    /// Drops every entry whose decision selected `tier`. Returns how many.
    ///
    /// Bumps the tier's generation even when nothing was removed, so decisions
    /// still being computed for the tier are not stored afterwards.
    pub fn invalidate_tier(&mut self, tier: Tier) -> usize {
        *self.generations.get_mut(tier) += 1;
        let before = self.storage.len();
        self.storage
            .retain(|_, entry| entry.decision.selected_tier() != tier);
        let removed = before - self.storage.len();
        self.invalidations += removed as u64;
        removed
    }

    /// Evicts the oldest entry from the cache
    fn evict_oldest(&mut self) {
        if let Some(oldest_key) = self
            .storage
            .values()
            .min_by_key(|entry| entry.created_at)
            .map(|entry| entry.key.clone())
        {
            self.storage.remove(&oldest_key);
        }
    }

    /// Clears all expired entries from the cache
    pub fn clear_expired(&mut self) {
        self.clear_expired_at(Instant::now());
    }

    fn clear_expired_at(&mut self, now: Instant) {
        self.storage.retain(|_, entry| !entry.is_expired_at(now));
    }

    /// Clears all entries and counters. Invalidation generations only grow.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.hits = 0;
        self.misses = 0;
        self.invalidations = 0;
    }

    /// Returns the number of entries in the cache
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Returns cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits,
            misses: self.misses,
            invalidations: self.invalidations,
        }
    }
}

impl Default for DecisionCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
