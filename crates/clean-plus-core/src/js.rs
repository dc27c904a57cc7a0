//! JavaScript/TypeScript import extractor.

use std::sync::LazyLock;

use regex::Regex;

use crate::extractor::{LanguageExtractor, RawImport};

#[allow(clippy::expect_used)]
static FROM_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bfrom\s*["']([^"']+)["']"#).expect("valid regex"));

#[allow(clippy::expect_used)]
static DYNAMIC_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\s*\(\s*["']([^"']+)["']\s*\)"#).expect("valid regex")
});

#[allow(clippy::expect_used)]
static REQUIRE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\brequire\s*\(\s*["']([^"']+)["']\s*\)"#).expect("valid regex")
});

/// Extracts module specifiers from JS/TS lines.
///
/// Each line is tested against three independent patterns: an ES
/// `from '…'` clause, a dynamic `import('…')` and a `require('…')` call.
/// Every matching pattern contributes one import, so a line yields between
/// zero and three. Multi-line statements, template literals and comments
/// are not understood.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsExtractor;

impl JsExtractor {
    /// Creates a new JS/TS extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LanguageExtractor for JsExtractor {
    fn language_id(&self) -> &'static str {
        "js"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["js", "jsx", "ts", "tsx", "mjs", "cjs"]
    }

    fn extract<'a>(&self, source: &'a str) -> Box<dyn Iterator<Item = RawImport> + 'a> {
        Box::new(source.lines().enumerate().flat_map(|(i, line)| {
            [&*FROM_CLAUSE, &*DYNAMIC_IMPORT, &*REQUIRE_CALL]
                .into_iter()
                .filter_map(move |re| re.captures(line))
                .filter_map(|caps| caps.get(1))
                .map(move |m| RawImport::new(m.as_str(), i + 1))
        }))
    }
}
