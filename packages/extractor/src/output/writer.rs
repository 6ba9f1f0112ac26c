//! JSON writer for converted statblocks.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::config::JSON_INDENT;
use crate::document::Document;
use crate::error::Result;

/// Render a document as tab-indented JSON with a trailing newline.
///
/// Keys are written in document order. Non-ASCII text is written as UTF-8.
pub fn render_json(document: &Document) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;
    buf.push(b'\n');

    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Save a document as `<name>.json` in `output_dir`.
///
/// # Returns
/// Path to the saved file
pub fn save_json(document: &Document, output_dir: &Path, name: &str) -> Result<PathBuf> {
    let content = render_json(document)?;
    write_atomic(output_dir, &format!("{name}.json"), content.as_bytes())
}

/// Save raw statblock bytes as `<name>.<extension>` in `output_dir`.
pub fn save_raw(data: &[u8], output_dir: &Path, name: &str, extension: &str) -> Result<PathBuf> {
    write_atomic(output_dir, &format!("{name}.{extension}"), data)
}

/// Write a file atomically: temp file, sync to disk, then rename.
///
/// Partial writes never replace an existing output, and the temp file is
/// removed again when any step fails.
fn write_atomic(output_dir: &Path, file_name: &str, content: &[u8]) -> Result<PathBuf> {
    if !output_dir.as_os_str().is_empty() {
        fs::create_dir_all(output_dir)?;
    }

    let output_file = output_dir.join(file_name);
    let temp_file = output_dir.join(format!(".{file_name}.tmp"));

    if let Err(e) = write_and_rename(&temp_file, &output_file, content) {
        if let Err(cleanup) = fs::remove_file(&temp_file) {
            tracing::debug!(path = %temp_file.display(), error = %cleanup, "temp file not removed");
        }
        return Err(e.into());
    }

    tracing::debug!(path = %output_file.display(), bytes = content.len(), "wrote output");

    Ok(output_file)
}

fn write_and_rename(temp_file: &Path, output_file: &Path, content: &[u8]) -> std::io::Result<()> {
    {
        let mut file = File::create(temp_file)?;
        file.write_all(content)?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.is_file() {
        fs::remove_file(output_file)?;
    }

    fs::rename(temp_file, output_file)
}
