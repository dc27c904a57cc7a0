//! PHP `use` statement extractor.

use crate::extractor::{LanguageExtractor, RawImport};

/// Extracts type imports from PHP `use` lines.
///
/// Handles single, aliased and brace-grouped imports written on one line.
/// `use function` and `use const` are not type imports and are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhpExtractor;

impl PhpExtractor {
    /// Creates a new PHP extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LanguageExtractor for PhpExtractor {
    fn language_id(&self) -> &'static str {
        "php"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["php"]
    }

    fn extract<'a>(&self, source: &'a str) -> Box<dyn Iterator<Item = RawImport> + 'a> {
        Box::new(source.lines().enumerate().flat_map(|(i, line)| {
            use_targets(line)
                .into_iter()
                .map(move |target| RawImport::new(target, i + 1))
        }))
    }
}

/// Returns the import targets declared on one line, if it is a `use` line.
fn use_targets(line: &str) -> Vec<String> {
    let Some(rest) = line.trim().strip_prefix("use ") else {
        return Vec::new();
    };
    let rest = rest.trim_start();
    if rest.starts_with("function ") || rest.starts_with("const ") {
        return Vec::new();
    }

    let body = rest.split(';').next().unwrap_or_default().trim();

    if let (Some(open), Some(close)) = (body.find('{'), body.rfind('}')) {
        if open < close {
            let prefix = body[..open].trim();
            return body[open + 1..close]
                .split(',')
                .map(strip_alias)
                .filter(|member| !member.is_empty())
                .map(|member| format!("{prefix}{member}"))
                .collect();
        }
    }

    let target = strip_alias(body);
    if target.is_empty() {
        Vec::new()
    } else {
        vec![target.to_string()]
    }
}

/// Drops an `as Alias` suffix.
fn strip_alias(item: &str) -> &str {
    let item = item.trim();
    match item.to_ascii_lowercase().find(" as ") {
        Some(idx) => item[..idx].trim_end(),
        None => item,
    }
}
