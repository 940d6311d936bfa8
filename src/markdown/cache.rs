//! Memoization cache for markdown rendering
//!
//! The conversation panel re-renders every visible assistant message on
//! each frame, so rendered output is cached by content hash and width.

use ratatui::text::Line;
use std::collections::{HashMap, VecDeque};
use std::hash::{DefaultHasher, Hash, Hasher};

/// Maximum number of entries in the markdown cache before eviction
pub const MARKDOWN_CACHE_MAX_ENTRIES: usize = 500;

type CacheKey = (u64, u16);

#[derive(Debug)]
pub struct MarkdownCache {
    entries: HashMap<CacheKey, Vec<Line<'static>>>,
    /// Insertion order for eviction (oldest first)
    insertion_order: VecDeque<CacheKey>,
    hits: u64,
    misses: u64,
}

impl Default for MarkdownCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    fn key(content: &str, width: u16) -> CacheKey {
        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        (hasher.finish(), width)
    }

    /// Return cached lines for `content` at `width`, rendering on a miss.
    pub fn get_or_render<F, E>(
        &mut self,
        content: &str,
        width: u16,
        render: F,
    ) -> Result<Vec<Line<'static>>, E>
    where
        F: FnOnce() -> Result<Vec<Line<'static>>, E>,
    {
        let key = Self::key(content, width);
        if let Some(lines) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(lines.clone());
        }

        self.misses += 1;
        let lines = render()?;

        while self.entries.len() >= MARKDOWN_CACHE_MAX_ENTRIES {
            match self.insertion_order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.entries.insert(key, lines.clone());
        self.insertion_order.push_back(key);
        Ok(lines)
    }

    /// Get cache statistics (hits, misses)
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_ok(text: &str) -> Result<Vec<Line<'static>>, ()> {
        Ok(vec![Line::from(text.to_string())])
    }

    #[test]
    fn test_hit_after_miss() {
        let mut cache = MarkdownCache::new();
        cache.get_or_render("a", 10, || render_ok("a")).unwrap();
        cache.get_or_render("a", 10, || render_ok("a")).unwrap();
        assert_eq!(cache.stats(), (1, 1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_width_is_part_of_key() {
        let mut cache = MarkdownCache::new();
        cache.get_or_render("a", 10, || render_ok("a")).unwrap();
        cache.get_or_render("a", 20, || render_ok("a")).unwrap();
        assert_eq!(cache.stats(), (0, 2));
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache = MarkdownCache::new();
        let result: Result<_, &str> = cache.get_or_render("a", 10, || Err("boom"));
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_eviction_bounds_size() {
        let mut cache = MarkdownCache::new();
        for i in 0..(MARKDOWN_CACHE_MAX_ENTRIES + 10) {
            let text = format!("entry {}", i);
            cache.get_or_render(&text, 10, || render_ok(&text)).unwrap();
        }
        assert_eq!(cache.len(), MARKDOWN_CACHE_MAX_ENTRIES);
    }
}
