//! Portfolio archive reading.
//!
//! A portfolio is a zip archive. Each character's statblock is stored
//! three times, under `statblocks_xml/`, `statblocks_html/` and
//! `statblocks_text/`, in members named `<index>_<character name>.<ext>`.

mod portfolio;

use std::path::Path;

pub use portfolio::{ArchiveEntry, PortfolioArchive};

#[cfg(test)]
pub(crate) use portfolio::tests::build_zip;

use crate::config::{STATBLOCK_HTML_PREFIX, STATBLOCK_TEXT_PREFIX, STATBLOCK_XML_PREFIX};
use crate::error::{ExtractorError, Result};

/// Format of a statblock member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatblockKind {
    /// XML statblock, converted to JSON.
    Xml,
    /// HTML statblock, copied verbatim.
    Html,
    /// Plain text statblock, copied verbatim.
    Text,
}

impl StatblockKind {
    /// Classify an archive member path by its statblock prefix.
    ///
    /// # Examples
    /// ```
    /// use statblock_extractor::archive::StatblockKind;
    ///
    /// assert_eq!(
    ///     StatblockKind::from_member_path("statblocks_xml/1_Bob.xml"),
    ///     Some(StatblockKind::Xml)
    /// );
    /// assert_eq!(StatblockKind::from_member_path("index.xml"), None);
    /// ```
    #[must_use]
    pub fn from_member_path(path: &str) -> Option<Self> {
        if path.starts_with(STATBLOCK_XML_PREFIX) {
            Some(Self::Xml)
        } else if path.starts_with(STATBLOCK_HTML_PREFIX) {
            Some(Self::Html)
        } else if path.starts_with(STATBLOCK_TEXT_PREFIX) {
            Some(Self::Text)
        } else {
            None
        }
    }

    /// Extension used when the member has none of its own.
    #[must_use]
    pub fn default_extension(&self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Html => "htm",
            Self::Text => "txt",
        }
    }
}

/// A statblock member found in a portfolio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatblockMember {
    /// The underlying archive entry.
    pub entry: ArchiveEntry,
    /// Statblock format.
    pub kind: StatblockKind,
    /// Character name taken from the member file name.
    pub character: String,
    /// File extension of the member.
    pub extension: String,
}

/// Derive the character name from a statblock member path.
///
/// The file stem has the form `<index>_<name>`; everything after the first
/// underscore is the name.
///
/// # Examples
/// ```
/// use statblock_extractor::archive::character_name;
///
/// assert_eq!(character_name("statblocks_xml/1_Seoni.xml").unwrap(), "Seoni");
/// assert_eq!(character_name("statblocks_xml/2_Kyra_the_Cleric.xml").unwrap(), "Kyra_the_Cleric");
/// assert!(character_name("statblocks_xml/Seoni.xml").is_err());
/// ```
pub fn character_name(member_path: &str) -> Result<String> {
    let stem = Path::new(member_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    stem.split_once('_')
        .map(|(_, name)| name.to_string())
        .ok_or_else(|| ExtractorError::InvalidMemberName(member_path.to_string()))
}

/// List the statblock members of an archive in archive order.
///
/// Members outside the statblock folders and directory entries are
/// skipped. Statblock members whose names carry no character name are
/// reported as errors.
pub fn statblock_members(archive: &PortfolioArchive<'_>) -> Vec<Result<StatblockMember>> {
    archive
        .entries()
        .iter()
        .filter(|entry| !entry.is_dir())
        .filter_map(|entry| {
            let kind = StatblockKind::from_member_path(&entry.name)?;
            Some(character_name(&entry.name).map(|character| {
                let extension = Path::new(&entry.name)
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or(kind.default_extension())
                    .to_string();
                StatblockMember {
                    entry: entry.clone(),
                    kind,
                    character,
                    extension,
                }
            }))
        })
        .collect()
}
