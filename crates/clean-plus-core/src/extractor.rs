//! Language-agnostic import extraction types and trait.
//!
//! `LanguageExtractor` is the extension point for adding new languages.
//! Extractors are line-oriented pattern scanners, not parsers: they never
//! resolve aliases or symbols, they only report the raw target string.

use std::path::Path;

use crate::js::JsExtractor;
use crate::php::PhpExtractor;

/// An uninterpreted import target extracted from one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImport {
    /// The import target as written (e.g., `Domains\User\Service` or `../modules/user`).
    pub target: String,
    /// Line number (1-indexed).
    pub line: usize,
}

impl RawImport {
    /// Creates a new raw import.
    #[must_use]
    pub fn new(target: impl Into<String>, line: usize) -> Self {
        Self {
            target: target.into(),
            line,
        }
    }
}

/// Trait for language-specific import extraction.
///
/// Implement this to add support for a new language.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"php"`).
    fn language_id(&self) -> &'static str;

    /// Lower-case file extensions this extractor handles, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Lazily extracts imports from source text.
    fn extract<'a>(&self, source: &'a str) -> Box<dyn Iterator<Item = RawImport> + 'a>;
}

/// The built-in extractors, one per supported ecosystem.
pub struct Extractors {
    extractors: Vec<Box<dyn LanguageExtractor>>,
}

impl Default for Extractors {
    fn default() -> Self {
        Self {
            extractors: vec![Box::new(PhpExtractor::new()), Box::new(JsExtractor::new())],
        }
    }
}

impl Extractors {
    /// Creates the default extractor set (PHP and JS/TS).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the extractor for a file by its extension (case-insensitive).
    #[must_use]
    pub fn for_path(&self, path: &Path) -> Option<&dyn LanguageExtractor> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.extractors
            .iter()
            .find(|e| e.extensions().contains(&ext.as_str()))
            .map(|e| &**e)
    }
}
