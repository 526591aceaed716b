//! # Rendering
//!
//! Two text surfaces are produced from errors and collections:
//! - **full**: kind, description, details and the whole cause chain, for logs
//!   with full access control
//! - **redacted**: drops `details` (raw exception text, backtraces), for
//!   user-facing output
//!
//! Both are presets of [`RenderStyle`].

use std::fmt;

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    /// Separator between an error and its cause
    pub error_link: String,
    /// Separator between a collection and its cause collection
    pub collection_link: String,
    /// Separator between errors inside a collection
    pub list_separator: String,
    /// Whether error details are rendered
    pub include_details: bool,
    /// Maximum number of chain links to render; the rest are summarized
    pub max_depth: Option<usize>,
}

impl RenderStyle {
    /// Diagnostic-complete rendering
    pub fn full() -> Self {
        Self {
            error_link: " <-- ".into(),
            collection_link: " <== ".into(),
            list_separator: ", ".into(),
            include_details: true,
            max_depth: None,
        }
    }

    /// Rendering without details
    pub fn redacted() -> Self {
        Self {
            include_details: false,
            ..Self::full()
        }
    }

    pub fn with_error_link(mut self, link: impl Into<String>) -> Self {
        self.error_link = link.into();
        self
    }

    pub fn with_collection_link(mut self, link: impl Into<String>) -> Self {
        self.collection_link = link.into();
        self
    }

    pub fn with_list_separator(mut self, separator: impl Into<String>) -> Self {
        self.list_separator = separator.into();
        self
    }

    pub fn with_details(mut self, include: bool) -> Self {
        self.include_details = include;
        self
    }

    /// Cap the number of rendered chain links (at least one is always shown)
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth.max(1));
        self
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::full()
    }
}

/// Types with full and redacted text forms
pub trait Render {
    /// Render with the given style
    fn render(&self, style: &RenderStyle) -> String;

    /// Display adapter using the redacted preset
    fn redacted(&self) -> Redacted<'_, Self> {
        Redacted { inner: self }
    }
}

/// Displays the wrapped value with [`RenderStyle::redacted`]
pub struct Redacted<'a, T: ?Sized> {
    inner: &'a T,
}

impl<T: Render + ?Sized> fmt::Display for Redacted<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.render(&RenderStyle::redacted()))
    }
}

/// Join displayable items with a separator
pub fn join<I, D>(items: I, separator: &str) -> String
where
    I: IntoIterator<Item = D>,
    D: fmt::Display,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push_str(&item.to_string());
    }
    out
}

/// Join chain links with `link`, keeping at most `max_depth` of them.
///
/// Truncated links are summarized as `... (N more)`.
pub fn chain<I, D>(links: I, link: &str, max_depth: Option<usize>) -> String
where
    I: IntoIterator<Item = D>,
    D: fmt::Display,
{
    let links: Vec<D> = links.into_iter().collect();
    let shown = max_depth.map_or(links.len(), |max| max.min(links.len()));

    let mut out = join(&links[..shown], link);
    let hidden = links.len() - shown;
    if hidden > 0 {
        out.push_str(link);
        out.push_str(&format!("... ({} more)", hidden));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(RenderStyle::full().include_details);
        assert!(!RenderStyle::redacted().include_details);
        assert_eq!(RenderStyle::default(), RenderStyle::full());
    }

    #[test]
    fn test_builders() {
        let style = RenderStyle::full()
            .with_error_link(" -> ")
            .with_list_separator("; ")
            .with_max_depth(0);
        assert_eq!(style.error_link, " -> ");
        assert_eq!(style.list_separator, "; ");
        assert_eq!(style.max_depth, Some(1));
    }

    #[test]
    fn test_join() {
        assert_eq!(join(["a", "b", "c"], ", "), "a, b, c");
        assert_eq!(join(Vec::<String>::new(), ", "), "");
        assert_eq!(join([1, 2], "|"), "1|2");
    }

    #[test]
    fn test_chain() {
        assert_eq!(chain(["a", "b", "c"], " <-- ", None), "a <-- b <-- c");
        assert_eq!(
            chain(["a", "b", "c"], " <-- ", Some(1)),
            "a <-- ... (2 more)"
        );
        assert_eq!(chain(["a"], " <-- ", Some(3)), "a");
    }
}
