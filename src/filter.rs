//! Exclusion filter
//!
//! A pure substring predicate over paths and event descriptions. Patterns are
//! plain substrings: no globbing, no regex, first match short-circuits. The
//! version-control metadata directory (`.git`) is always part of the set.

/// Directory name excluded from watching regardless of configuration.
pub const VCS_METADATA_DIR: &str = ".git";

/// Substring patterns deciding which paths and events are ignored.
#[derive(Debug, Clone)]
pub struct ExcludeFilter {
    patterns: Vec<String>,
}

impl ExcludeFilter {
    /// Build a filter from user-supplied patterns, always adding `.git`.
    ///
    /// Empty patterns (e.g. from a trailing comma in `--exclude`) are dropped
    /// so they cannot match every path.
    pub fn new(user_patterns: impl IntoIterator<Item = String>) -> Self {
        let mut patterns = vec![VCS_METADATA_DIR.to_string()];
        patterns.extend(user_patterns.into_iter().filter(|p| !p.is_empty()));
        Self { patterns }
    }

    /// True iff at least one pattern is a substring of `text`.
    pub fn is_excluded(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| text.contains(p.as_str()))
    }

    /// The patterns in effect, `.git` included.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
