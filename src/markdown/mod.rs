//! Markdown rendering for assistant output.
//!
//! [`RenderService`] is the seam the conversation view renders through. The
//! production implementation, [`MarkdownRenderer`], parses with pulldown-cmark
//! and memoizes output per `(content, width)` so redraws of unchanged history
//! skip the parser entirely.

mod cache;
mod render;
mod styles;

pub use cache::{MarkdownCache, MARKDOWN_CACHE_MAX_ENTRIES};
pub use render::render_markdown;

use std::sync::Mutex;

use ratatui::text::Line;

use crate::error::RenderError;

/// Turns markdown into styled lines fitting a given width.
///
/// A failure means the caller should show the literal text instead.
pub trait RenderService: Send + Sync {
    fn render(&self, markdown: &str, width: u16) -> Result<Vec<Line<'static>>, RenderError>;
}

/// Cached pulldown-cmark renderer.
#[derive(Debug)]
pub struct MarkdownRenderer {
    cache: Mutex<MarkdownCache>,
}

impl MarkdownRenderer {
    /// Build the renderer and prove it works with a probe document.
    ///
    /// Startup aborts if this fails, so a broken renderer never reaches the
    /// event loop.
    pub fn new() -> Result<Self, RenderError> {
        let probe = render_markdown("# probe\n\n`ok`", 80)?;
        if probe.is_empty() {
            return Err(RenderError::Empty);
        }
        Ok(Self {
            cache: Mutex::new(MarkdownCache::new()),
        })
    }

    /// `(hits, misses)` of the render cache.
    pub fn cache_stats(&self) -> (u64, u64) {
        match self.cache.lock() {
            Ok(cache) => cache.stats(),
            Err(poisoned) => poisoned.into_inner().stats(),
        }
    }
}

impl RenderService for MarkdownRenderer {
    fn render(&self, markdown: &str, width: u16) -> Result<Vec<Line<'static>>, RenderError> {
        if width == 0 {
            return Err(RenderError::InvalidWidth(width));
        }
        let mut cache = match self.cache.lock() {
            Ok(cache) => cache,
            Err(poisoned) => poisoned.into_inner(),
        };
        cache.get_or_render(markdown, width, || render_markdown(markdown, width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_constructs() {
        assert!(MarkdownRenderer::new().is_ok());
    }

    #[test]
    fn test_render_is_cached_per_width() {
        let renderer = MarkdownRenderer::new().unwrap();
        renderer.render("**hi**", 20).unwrap();
        renderer.render("**hi**", 20).unwrap();
        renderer.render("**hi**", 30).unwrap();
        assert_eq!(renderer.cache_stats(), (1, 2));
    }

    #[test]
    fn test_zero_width_rejected() {
        let renderer = MarkdownRenderer::new().unwrap();
        assert_eq!(
            renderer.render("hi", 0).unwrap_err(),
            RenderError::InvalidWidth(0)
        );
    }

    #[test]
    fn test_usable_as_trait_object() {
        let service: std::sync::Arc<dyn RenderService> =
            std::sync::Arc::new(MarkdownRenderer::new().unwrap());
        let lines = service.render("plain", 10).unwrap();
        assert_eq!(lines.len(), 1);
    }
}
