//! Zip access to portfolio archives.
//!
//! Member data is checked against its stored CRC-32 while it is read, so a
//! corrupted statblock fails instead of being converted.

use std::io::{Cursor, Read};

use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{ExtractorError, Result};

/// A member listed in the archive's central directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Position in the central directory.
    pub index: usize,
    /// Path of the member inside the archive, `/`-separated.
    pub name: String,
    /// Uncompressed size in bytes, as recorded in the archive.
    pub size: u64,
    is_dir: bool,
}

impl ArchiveEntry {
    /// Directory entries carry no data.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

/// A portfolio archive held in memory.
#[derive(Debug)]
pub struct PortfolioArchive<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
    entries: Vec<ArchiveEntry>,
}

impl<'a> PortfolioArchive<'a> {
    /// Open the archive and list its members.
    ///
    /// # Errors
    /// `ExtractorError::Archive` when `data` is not a readable zip archive.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;

        let entries = (0..archive.len())
            .map(|index| -> Result<ArchiveEntry> {
                let file = archive.by_index_raw(index)?;
                Ok(ArchiveEntry {
                    index,
                    name: file.name().replace('\\', "/"),
                    size: file.size(),
                    is_dir: file.is_dir(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(entries = entries.len(), "read portfolio central directory");

        Ok(Self { archive, entries })
    }

    /// All entries in central directory order.
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Read and decompress a member, verifying its checksum.
    ///
    /// # Errors
    /// `ExtractorError::MemberRead` for unsupported compression, a broken
    /// compressed stream or a CRC mismatch.
    pub fn read(&mut self, entry: &ArchiveEntry) -> Result<Vec<u8>> {
        let member_error = |source: ZipError| ExtractorError::MemberRead {
            member: entry.name.clone(),
            source,
        };

        let mut file = self.archive.by_index(entry.index).map_err(member_error)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| member_error(ZipError::Io(e)))?;
        Ok(data)
    }
}
