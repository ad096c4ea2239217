//! Cache of measured layouts.
//!
//! Keys compare only what changes layout: a request that differs from a
//! cached one in color, brush, shadow or decoration reuses the cached
//! geometry. Entries whose fonts went stale are dropped on lookup.

use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;

use crate::layout_result::{TextLayoutInput, TextLayoutResult};
use crate::sync::lock_recover_debug;

/// A [`TextLayoutInput`] compared by its layout-affecting parts.
#[derive(Debug, Clone)]
pub struct CacheKey(TextLayoutInput);

impl CacheKey {
    #[must_use]
    pub fn new(input: TextLayoutInput) -> Self {
        Self(input)
    }

    #[must_use]
    pub fn input(&self) -> &TextLayoutInput {
        &self.0
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (&self.0, &other.0);
        a.text == b.text
            && a.style.has_same_layout_affecting_attributes(&b.style)
            && a.placeholders == b.placeholders
            && a.max_lines == b.max_lines
            && a.soft_wrap == b.soft_wrap
            && a.overflow == b.overflow
            && a.density == b.density
            && a.layout_direction == b.layout_direction
            && Arc::ptr_eq(&a.font_resolver, &b.font_resolver)
            && a.constraints == b.constraints
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let input = &self.0;
        input.text.text().hash(state);
        input.style.hash_layout_affecting(state);
        input.placeholders.hash(state);
        input.max_lines.hash(state);
        input.soft_wrap.hash(state);
        input.overflow.hash(state);
        input.density.hash(state);
        input.layout_direction.hash(state);
        Arc::as_ptr(&input.font_resolver).cast::<()>().hash(state);
        input.constraints.hash(state);
    }
}

/// Bounded least-recently-used store of layout results.
///
/// Safe to share between threads; one lock guards the whole store.
#[derive(Debug)]
pub struct TextLayoutCache {
    entries: Mutex<LruCache<CacheKey, TextLayoutResult>>,
}

impl TextLayoutCache {
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// A cache holding up to `capacity` results, or `None` for 0.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Option<Self> {
        NonZeroUsize::new(capacity).map(Self::new)
    }

    /// Cached result for `key`. A result built with fonts that changed
    /// since is evicted and reported as a miss.
    pub fn get(&self, key: &CacheKey) -> Option<TextLayoutResult> {
        let mut entries = lock_recover_debug(&self.entries, "TextLayoutCache::get");
        let result = entries.get(key)?;
        if result.has_stale_resolved_fonts() {
            log::debug!("evicting layout with stale fonts");
            entries.pop(key);
            return None;
        }
        Some(result.clone())
    }

    pub fn put(&self, key: CacheKey, result: TextLayoutResult) {
        lock_recover_debug(&self.entries, "TextLayoutCache::put").put(key, result);
    }

    pub fn len(&self) -> usize {
        lock_recover_debug(&self.entries, "TextLayoutCache::len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        lock_recover_debug(&self.entries, "TextLayoutCache::capacity")
            .cap()
            .get()
    }

    pub fn clear(&self) {
        lock_recover_debug(&self.entries, "TextLayoutCache::clear").clear();
    }
}
