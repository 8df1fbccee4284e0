// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent memoization of rendered schemas.
//!
//! A [`SchemaCache`] maps `(root type identity, Options, namespace override)`
//! to the rendered document. It is shared mutable state: lookups and inserts
//! go through a `DashMap`, so any number of threads may compile at once.
//! Entries are never evicted and live as long as the cache. Each key holds a
//! strong reference to its root descriptor, so an address can never be
//! reused by a different type while its entry exists. Failed compilations
//! are not cached.

use crate::descriptor::TypeDescriptor;
use crate::options::Options;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Instant;

/// Root descriptor compared and hashed by address.
#[derive(Clone)]
pub struct TypeIdentity(Arc<TypeDescriptor>);

impl TypeIdentity {
    pub fn new(ty: &Arc<TypeDescriptor>) -> Self {
        Self(Arc::clone(ty))
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.0.name, self.addr())
    }
}

/// Identifies one compilation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    ty: TypeIdentity,
    options: Options,
    namespace: Option<Arc<str>>,
}

impl CacheKey {
    pub fn new(ty: &Arc<TypeDescriptor>, namespace: Option<&str>, options: Options) -> Self {
        Self {
            ty: TypeIdentity::new(ty),
            options,
            namespace: namespace.filter(|ns| !ns.is_empty()).map(Arc::from),
        }
    }
}

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub last_miss_ns: u64,
}

/// Process-lifetime cache of rendered schemas.
#[derive(Default)]
pub struct SchemaCache {
    entries: DashMap<CacheKey, Arc<[u8]>>,
    stats: RwLock<CacheStats>,
}

impl SchemaCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached document for the key, if any.
    pub fn get(
        &self,
        ty: &Arc<TypeDescriptor>,
        namespace: Option<&str>,
        options: Options,
    ) -> Option<Arc<[u8]>> {
        let key = CacheKey::new(ty, namespace, options);
        self.entries.get(&key).map(|hit| Arc::clone(hit.value()))
    }

    /// Return the cached document, or run `build` and cache its output.
    ///
    /// `build` runs without any lock held. If two threads race on the same
    /// key, both build and the first insert wins; compilation is
    /// deterministic, so both results are identical.
    pub fn get_or_try_compile<F, E>(
        &self,
        ty: &Arc<TypeDescriptor>,
        namespace: Option<&str>,
        options: Options,
        build: F,
    ) -> Result<Arc<[u8]>, E>
    where
        F: FnOnce() -> Result<Vec<u8>, E>,
    {
        let key = CacheKey::new(ty, namespace, options);

        if let Some(hit) = self.entries.get(&key) {
            self.record_hit();
            return Ok(Arc::clone(hit.value()));
        }

        let start = Instant::now();
        let built: Arc<[u8]> = Arc::from(build()?);
        log::debug!("[cache] miss for {:?}, {} bytes", key.ty, built.len());
        let stored = Arc::clone(self.entries.entry(key).or_insert(built).value());
        self.record_miss(start);
        Ok(stored)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        *self.stats.read()
    }

    fn record_hit(&self) {
        let mut stats = self.stats.write();
        stats.hits = stats.hits.saturating_add(1);
    }

    fn record_miss(&self, start: Instant) {
        let mut stats = self.stats.write();
        stats.misses = stats.misses.saturating_add(1);
        stats.last_miss_ns = start.elapsed().as_nanos() as u64;
    }
}

impl fmt::Debug for SchemaCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaCache")
            .field("entries", &self.entries.len())
            .field("stats", &self.stats())
            .finish()
    }
}
