//! Configuration constants, options and validation functions for the extractor.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ExtractorError, Result};

/// Prefix marking attribute entries in a converted document.
///
/// Keeps `<character name="x"><name/></character>` from colliding:
/// the attribute lands under `_name`, the child element under `name`.
pub const ATTRIBUTE_PREFIX: char = '_';

/// Archive member prefix for XML statblocks.
pub const STATBLOCK_XML_PREFIX: &str = "statblocks_xml";

/// Archive member prefix for HTML statblocks.
pub const STATBLOCK_HTML_PREFIX: &str = "statblocks_html";

/// Archive member prefix for plain text statblocks.
pub const STATBLOCK_TEXT_PREFIX: &str = "statblocks_text";

/// Indentation used for JSON output.
pub const JSON_INDENT: &[u8] = b"\t";

/// File extensions recognised as portfolio archives.
pub const ARCHIVE_EXTENSIONS: &[&str] = &["por", "stock", "zip"];

/// File extension of a bare XML statblock.
pub const XML_EXTENSION: &str = "xml";

/// Fallback used when a name sanitizes to nothing.
pub const UNNAMED: &str = "unnamed";

/// Characters that are unsafe in file names on common file systems.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).expect("valid regex"));

/// How an input path should be processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Zip-based portfolio archive.
    Archive,
    /// Bare XML statblock file.
    Xml,
}

/// Determine the input kind from the file extension (case-insensitive).
///
/// # Examples
/// ```
/// use statblock_extractor::config::{input_kind, InputKind};
///
/// assert_eq!(input_kind("party.por".as_ref()).unwrap(), InputKind::Archive);
/// assert_eq!(input_kind("Bob.XML".as_ref()).unwrap(), InputKind::Xml);
/// assert!(input_kind("notes.txt".as_ref()).is_err());
/// ```
pub fn input_kind(path: &Path) -> Result<InputKind> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if ARCHIVE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(InputKind::Archive)
    } else if ext == XML_EXTENSION {
        Ok(InputKind::Xml)
    } else {
        Err(ExtractorError::UnsupportedInput(
            path.display().to_string(),
        ))
    }
}

/// Replace characters that cannot appear in a file name.
///
/// Leading and trailing whitespace and dots are removed; a name that ends
/// up empty becomes [`UNNAMED`].
///
/// # Examples
/// ```
/// use statblock_extractor::config::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Bob"), "Bob");
/// assert_eq!(sanitize_filename("Fido/Rex"), "Fido_Rex");
/// assert_eq!(sanitize_filename("  "), "unnamed");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let replaced = UNSAFE_FILENAME_CHARS.replace_all(name, "_");
    let trimmed = replaced.trim_matches(|c: char| c.is_whitespace() || c == '.');
    if trimmed.is_empty() {
        UNNAMED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Options controlling what an extraction writes.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Directory outputs are written to. `None` writes next to the input.
    pub output_dir: Option<PathBuf>,
    /// Write raw XML/HTML/text copies next to the JSON output.
    pub write_raw: bool,
    /// Split minions into their own JSON documents.
    pub split_minions: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            write_raw: true,
            split_minions: true,
        }
    }
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_raw(mut self, write_raw: bool) -> Self {
        self.write_raw = write_raw;
        self
    }

    pub fn with_minions(mut self, split_minions: bool) -> Self {
        self.split_minions = split_minions;
        self
    }

    /// Directory outputs for `input` end up in.
    pub fn output_dir_for(&self, input: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }

    /// Check the configured output directory before any work is done.
    pub fn validate(&self) -> Result<()> {
        let Some(output_dir) = &self.output_dir else {
            return Ok(());
        };
        if !output_dir.exists() {
            return Err(ExtractorError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Output directory does not exist: {}", output_dir.display()),
            )));
        }
        if !output_dir.is_dir() {
            return Err(ExtractorError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Output path is not a directory: {}", output_dir.display()),
            )));
        }
        Ok(())
    }
}
