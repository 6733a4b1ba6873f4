//! Sharded string interner for token text.
//!
//! The scanner interns every word, number and string literal it produces so
//! that tokens stay `Copy`. Lookups hand back `&'static str` because interned
//! strings are leaked and never freed.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

struct InternShard {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl InternShard {
    fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        }
    }

    fn with_empty() -> Self {
        let mut shard = Self::new();
        shard.map.insert("", 0);
        shard.strings.push("");
        shard
    }
}

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    #[error("interner shard {shard_idx} exceeded capacity: {count} strings, max is {max}", max = Name::MAX_LOCAL)]
    ShardOverflow { shard_idx: usize, count: usize },
}

/// Sharded string interner.
///
/// Each shard sits behind its own `RwLock`, so a scanner running on one
/// thread and a tree printer running on another can share one interner.
pub struct StringInterner {
    shards: [RwLock<InternShard>; Name::NUM_SHARDS],
    total_count: AtomicUsize,
}

impl StringInterner {
    pub fn new() -> Self {
        let shards = std::array::from_fn(|i| {
            if i == 0 {
                RwLock::new(InternShard::with_empty())
            } else {
                RwLock::new(InternShard::new())
            }
        });
        Self {
            shards,
            total_count: AtomicUsize::new(1),
        }
    }

    #[inline]
    fn shard_for(s: &str) -> usize {
        if s.is_empty() {
            return 0;
        }
        let mut hash = 0u32;
        for byte in s.bytes().take(8) {
            hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
        }
        (hash as usize) % Name::NUM_SHARDS
    }

    /// Intern a string, returning its `Name` or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        let shard_idx = Self::shard_for(s);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard_idx is bounded by NUM_SHARDS (16)"
        )]
        let shard_idx_u32 = shard_idx as u32;
        let shard = &self.shards[shard_idx];

        if let Some(&local) = shard.read().map.get(s) {
            return Ok(Name::new(shard_idx_u32, local));
        }

        let mut guard = shard.write();
        // Another writer may have won the race between the two locks.
        if let Some(&local) = guard.map.get(s) {
            return Ok(Name::new(shard_idx_u32, local));
        }

        let count = guard.strings.len();
        let local = u32::try_from(count)
            .ok()
            .filter(|&local| local <= Name::MAX_LOCAL)
            .ok_or(InternError::ShardOverflow { shard_idx, count })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, local);
        self.total_count.fetch_add(1, Ordering::Relaxed);

        Ok(Name::new(shard_idx_u32, local))
    }

    /// Intern a string.
    ///
    /// # Panics
    /// Panics if a shard exceeds capacity. Use `try_intern` to handle that case.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the text for a `Name`.
    pub fn lookup(&self, name: Name) -> &'static str {
        let guard = self.shards[name.shard()].read();
        guard.strings.get(name.local()).copied().unwrap_or("")
    }

    /// Number of interned strings, including the pre-interned empty string.
    pub fn len(&self) -> usize {
        self.total_count.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Read access to interned text.
///
/// Lets the parser runtime and tree printers accept any text source without
/// naming `StringInterner` directly.
pub trait StringLookup {
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}
