//! Bounded interning of small, frequently repeated component text.
//!
//! Parsing a batch of related references sees the same scheme names, hosts
//! and path segments over and over; the caches here let those share one
//! allocation. The caches are per thread, so no synchronization is needed,
//! and purely an optimization: a miss always falls back to a fresh
//! allocation.

use std::cell::RefCell;
use std::collections::HashSet;
use std::mem;
use std::sync::Arc;

/// A two-generation cache of shared strings.
///
/// Lookups check the newer generation first and promote older hits. When
/// the newer generation fills up it replaces the older one wholesale, so an
/// entry that stops being looked up ages out after two rotations.
struct GenCache {
    newer: HashSet<Arc<str>>,
    older: HashSet<Arc<str>>,
    cap: usize,
}

impl GenCache {
    fn new(cap: usize) -> GenCache {
        GenCache {
            newer: HashSet::new(),
            older: HashSet::new(),
            cap,
        }
    }

    fn get(&mut self, text: &str) -> Arc<str> {
        if let Some(hit) = self.newer.get(text) {
            return hit.clone();
        }
        if let Some(hit) = self.older.take(text) {
            let shared = hit.clone();
            self.insert(hit);
            return shared;
        }
        let shared: Arc<str> = Arc::from(text);
        self.insert(shared.clone());
        shared
    }

    fn insert(&mut self, entry: Arc<str>) {
        if self.newer.len() >= self.cap {
            self.older = mem::take(&mut self.newer);
        }
        self.newer.insert(entry);
    }
}

const SMALL_CAP: usize = 16;
const LARGE_CAP: usize = 64;

/// Segments and query keys longer than this bypass the caches.
const TEXT_MAX: usize = 32;

thread_local! {
    static SCHEMES: RefCell<GenCache> = RefCell::new(GenCache::new(SMALL_CAP));
    static HOSTS: RefCell<GenCache> = RefCell::new(GenCache::new(SMALL_CAP));
    static FRAGMENTS: RefCell<GenCache> = RefCell::new(GenCache::new(SMALL_CAP));
    static SEGMENTS: RefCell<GenCache> = RefCell::new(GenCache::new(LARGE_CAP));
    static QUERY_KEYS: RefCell<GenCache> = RefCell::new(GenCache::new(LARGE_CAP));
}

pub(crate) fn scheme(text: &str) -> Arc<str> {
    SCHEMES.with(|c| c.borrow_mut().get(text))
}

pub(crate) fn host(text: &str) -> Arc<str> {
    HOSTS.with(|c| c.borrow_mut().get(text))
}

pub(crate) fn fragment(text: &str) -> Arc<str> {
    FRAGMENTS.with(|c| c.borrow_mut().get(text))
}

pub(crate) fn segment(text: &str) -> Arc<str> {
    if text.len() > TEXT_MAX {
        return Arc::from(text);
    }
    SEGMENTS.with(|c| c.borrow_mut().get(text))
}

pub(crate) fn query_key(text: &str) -> Arc<str> {
    if text.len() > TEXT_MAX {
        return Arc::from(text);
    }
    QUERY_KEYS.with(|c| c.borrow_mut().get(text))
}
