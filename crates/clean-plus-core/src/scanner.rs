//! Source file discovery.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// File extensions (lower-case, without the dot) that are scanned for imports.
pub const CODE_EXTENSIONS: &[&str] = &["php", "js", "jsx", "ts", "tsx", "mjs", "cjs"];

/// Path fragments that exclude a file when they appear anywhere in its path.
///
/// This is a substring test on the `/`-normalised path, not a segment match:
/// `/build/` also excludes `src/build/x.ts`, and a root that itself sits
/// under e.g. `/dist/` excludes everything.
pub const EXCLUDED_MARKERS: &[&str] = &[
    "/vendor/",
    "/node_modules/",
    "/storage/",
    "/bootstrap/cache/",
    "/dist/",
    "/build/",
    "/coverage/",
    "/.git/",
];

/// Something that can enumerate source files under a root.
pub trait FileSource {
    /// Lazily yields candidate source files under `root`.
    fn files<'a>(&'a self, root: &Path) -> Box<dyn Iterator<Item = PathBuf> + 'a>;
}

/// Walks a directory tree and yields code files outside excluded directories.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileScanner;

impl FileScanner {
    /// Creates a new scanner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FileSource for FileScanner {
    fn files<'a>(&'a self, root: &Path) -> Box<dyn Iterator<Item = PathBuf> + 'a> {
        let iter = WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|path| has_code_extension(path))
            .filter(|path| {
                let excluded = is_excluded(path);
                if excluded {
                    debug!("Excluding: {}", path.display());
                }
                !excluded
            });
        Box::new(iter)
    }
}

/// Returns true if the path has one of [`CODE_EXTENSIONS`] (any case).
#[must_use]
pub fn has_code_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| CODE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Returns true if the path contains one of [`EXCLUDED_MARKERS`].
#[must_use]
pub fn is_excluded(path: &Path) -> bool {
    let normalized = path.to_string_lossy().replace('\\', "/");
    EXCLUDED_MARKERS.iter().any(|m| normalized.contains(m))
}

/// Reads a source file as text. Bytes that are not valid UTF-8 (e.g. a
/// Latin-1 comment in legacy PHP) are replaced rather than failing the read.
///
/// # Errors
///
/// Returns the I/O error if the file cannot be read.
pub fn read_source(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!("{} is not valid UTF-8; decoding lossily", path.display());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}
