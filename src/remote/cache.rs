use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Converted PDB text keyed by request, expiring after a fixed time-to-live.
///
/// A zero TTL disables the cache: inserts are dropped and every lookup misses.
#[derive(Debug)]
pub struct StructureCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

#[derive(Debug)]
struct CacheEntry {
    pdb: String,
    stored_at: Instant,
}

impl StructureCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&self, key: &str, pdb: String) {
        self.insert_at(key, pdb, Instant::now());
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some(entry) if now.saturating_duration_since(entry.stored_at) < self.ttl => {
                Some(entry.pdb.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn insert_at(&self, key: &str, pdb: String, now: Instant) {
        if !self.is_enabled() {
            return;
        }

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, entry| now.saturating_duration_since(entry.stored_at) < self.ttl);
        entries.insert(
            key.to_string(),
            CacheEntry {
                pdb,
                stored_at: now,
            },
        );
    }
}

impl Default for StructureCache {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entries_are_returned() {
        let cache = StructureCache::new(Duration::from_secs(30));
        cache.insert("ATP", "END\n".to_string());

        assert_eq!(cache.get("ATP").as_deref(), Some("END\n"));
        assert_eq!(cache.get("HEM"), None);
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = StructureCache::new(Duration::from_secs(30));
        let start = Instant::now();
        cache.insert_at("ATP", "END\n".to_string(), start);

        assert!(cache.get_at("ATP", start + Duration::from_secs(29)).is_some());
        assert!(cache.get_at("ATP", start + Duration::from_secs(30)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_ttl_disables_storage() {
        let cache = StructureCache::disabled();
        cache.insert("ATP", "END\n".to_string());

        assert!(!cache.is_enabled());
        assert_eq!(cache.get("ATP"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn insert_evicts_expired_neighbours() {
        let cache = StructureCache::new(Duration::from_secs(10));
        let start = Instant::now();
        cache.insert_at("ATP", "a".to_string(), start);
        cache.insert_at("HEM", "b".to_string(), start + Duration::from_secs(11));

        assert_eq!(cache.len(), 1);
    }
}
