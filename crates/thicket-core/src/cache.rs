//! Parse cache.
//!
//! Memoizes [`parse`](crate::parse) results by an xxh3 hash of the source
//! text. The cache is an ordinary value: construct one, share it (it is
//! `Send + Sync`), clear it, drop it. Trees handed out are `Arc`s, so
//! clearing or dropping the cache never invalidates a tree a caller holds.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use thicket_dom::DomTree;
use thicket_html::MalformedInput;
use xxhash_rust::xxh3::xxh3_128;

use crate::parse;

/// Outcome of parsing one input, shared by every caller asking for it.
type ParseResult = Result<Arc<DomTree>, MalformedInput>;

/// A cache entry. Filled exactly once, by whichever caller gets there first.
type Slot = Arc<OnceLock<ParseResult>>;

/// Sizing for a [`ParseCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Entries held before the cache is emptied to make room. A value of 0
    /// behaves like 1.
    pub max_entries: usize,
}

impl CacheConfig {
    /// Default capacity.
    pub const DEFAULT_MAX_ENTRIES: usize = 256;
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Memo of parse results keyed by source-text hash.
///
/// Concurrent first requests for the same text run the parser once; the
/// others block until that result is published and then share it. Failures
/// are memoized like successes since parsing is deterministic.
///
/// When an insert would exceed [`CacheConfig::max_entries`], every entry is
/// dropped first and the cache refills on demand.
#[derive(Debug, Default)]
pub struct ParseCache {
    config: CacheConfig,
    entries: Mutex<HashMap<u128, Slot>>,
    builds: AtomicUsize,
}

impl ParseCache {
    /// Create an empty cache with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache with the given sizing.
    #[must_use]
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The sizing this cache was created with.
    #[must_use]
    pub const fn config(&self) -> CacheConfig {
        self.config
    }

    /// Return the parse of `input`, parsing it only if no result is cached.
    ///
    /// # Errors
    ///
    /// Returns the (cached) [`MalformedInput`] if `input` does not parse.
    pub fn get_or_parse(&self, input: &str) -> Result<Arc<DomTree>, MalformedInput> {
        let slot = self.slot(content_hash(input));
        slot.get_or_init(|| {
            let _ = self.builds.fetch_add(1, Ordering::Relaxed);
            parse(input).map(Arc::new)
        })
        .clone()
    }

    /// Drop every entry. Trees already handed out stay valid.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of cached inputs, including ones still being parsed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// True if `input` has an entry.
    #[must_use]
    pub fn contains(&self, input: &str) -> bool {
        self.lock().contains_key(&content_hash(input))
    }

    /// How many times this cache has run the parser.
    #[must_use]
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    /// Find or create the slot for `key`. The map lock is released before
    /// the slot is filled, so parsing never blocks lookups of other keys.
    fn slot(&self, key: u128) -> Slot {
        let mut entries = self.lock();
        if let Some(slot) = entries.get(&key) {
            return Arc::clone(slot);
        }
        if entries.len() >= self.config.max_entries.max(1) {
            entries.clear();
        }
        let slot = Slot::default();
        let _ = entries.insert(key, Arc::clone(&slot));
        slot
    }

    /// Entries are only ever inserted or removed whole, so a panic while the
    /// lock was held cannot leave the map half-updated.
    fn lock(&self) -> MutexGuard<'_, HashMap<u128, Slot>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 128-bit xxh3 of the source text.
fn content_hash(input: &str) -> u128 {
    xxh3_128(input.as_bytes())
}
