//! Main extraction service that ties all components together.

use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::{statblock_members, PortfolioArchive, StatblockKind, StatblockMember};
use crate::config::{input_kind, ExtractOptions, InputKind};
use crate::document::Document;
use crate::error::Result;
use crate::minion::split_minion;
use crate::naming::{base_name, minion_output_name, output_name};
use crate::output::{save_json, save_raw};
use crate::xml::transform;

/// Outcome of extracting one input file.
///
/// Per-member problems are collected here instead of aborting the input:
/// `failures` are statblocks that produced no JSON, `warnings` are minion
/// splits that were skipped while the primary output was still written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// The input that was processed.
    pub input: PathBuf,
    /// Every file written, in write order.
    pub outputs: Vec<PathBuf>,
    /// Characters converted to JSON.
    pub characters: Vec<String>,
    /// Minions split into their own JSON documents.
    pub minions: Vec<String>,
    /// Non-fatal problems.
    pub warnings: Vec<String>,
    /// Statblocks that could not be converted.
    pub failures: Vec<String>,
}

impl ExtractionReport {
    fn new(input: &Path) -> Self {
        Self {
            input: input.to_path_buf(),
            ..Self::default()
        }
    }

    /// True when every statblock in the input was converted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Extract an input file, choosing archive or XML handling by extension.
pub fn extract(input: &Path, options: &ExtractOptions) -> Result<ExtractionReport> {
    match input_kind(input)? {
        InputKind::Archive => extract_archive(input, options),
        InputKind::Xml => extract_xml_file(input, options),
    }
}

/// Extract every statblock from a portfolio archive.
///
/// For each character this writes `<base> - <name>.json` plus, when enabled,
/// the raw XML/HTML/text statblocks and `<base> - <name> - <minion>.json`.
///
/// # Errors
/// Fails when the archive cannot be read or an output cannot be written.
/// Malformed statblocks only fail their own member and are listed in
/// [`ExtractionReport::failures`].
pub fn extract_archive(input: &Path, options: &ExtractOptions) -> Result<ExtractionReport> {
    let data = fs::read(input)?;
    let mut archive = PortfolioArchive::new(&data)?;

    let base = base_name(input);
    let output_dir = options.output_dir_for(input);
    let mut report = ExtractionReport::new(input);

    for member in statblock_members(&archive) {
        let member = match member {
            Ok(member) => member,
            Err(e) => {
                tracing::warn!(error = %e, "skipping statblock member");
                report.failures.push(e.to_string());
                continue;
            }
        };

        let name = output_name(&base, &member.character, None);
        tracing::debug!(member = %member.entry.name, kind = ?member.kind, "processing member");

        let bytes = match archive.read(&member.entry) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(member = %member.entry.name, error = %e, "failed to read member");
                report.failures.push(e.to_string());
                continue;
            }
        };

        if options.write_raw {
            let path = save_raw(&bytes, &output_dir, &name, &member.extension)?;
            report.outputs.push(path);
        }

        if member.kind == StatblockKind::Xml {
            convert_member(&member, &bytes, &output_dir, &name, options, &mut report)?;
        }
    }

    Ok(report)
}

/// Convert an XML statblock file directly.
///
/// Writes `<stem>.json` and, when a minion is present, `<stem> - <minion>.json`.
///
/// # Errors
/// Unlike archive members, a malformed XML file fails the whole input.
pub fn extract_xml_file(input: &Path, options: &ExtractOptions) -> Result<ExtractionReport> {
    let data = fs::read(input)?;
    let name = base_name(input);
    let output_dir = options.output_dir_for(input);
    let mut report = ExtractionReport::new(input);

    let document = transform(&data)?;
    report.outputs.push(save_json(&document, &output_dir, &name)?);
    report.characters.push(name.clone());

    if options.split_minions {
        write_minion(&document, &output_dir, &name, &mut report)?;
    }

    Ok(report)
}

/// Convert one XML member, recording malformed input as a failure.
fn convert_member(
    member: &StatblockMember,
    bytes: &[u8],
    output_dir: &Path,
    name: &str,
    options: &ExtractOptions,
    report: &mut ExtractionReport,
) -> Result<()> {
    let document = match transform(bytes) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!(member = %member.entry.name, error = %e, "failed to convert statblock");
            report.failures.push(format!("{}: {e}", member.entry.name));
            return Ok(());
        }
    };

    report.outputs.push(save_json(&document, output_dir, name)?);
    report.characters.push(member.character.clone());

    if options.split_minions {
        write_minion(&document, output_dir, name, report)?;
    }

    Ok(())
}

/// Split and save the minion of `document`, if any.
///
/// A minion that cannot be split is a warning; the primary output has
/// already been written by then.
fn write_minion(
    document: &Document,
    output_dir: &Path,
    name: &str,
    report: &mut ExtractionReport,
) -> Result<()> {
    match split_minion(document) {
        Ok(Some(minion)) => {
            let minion_name = minion_output_name(name, &minion.name);
            report
                .outputs
                .push(save_json(&minion.document, output_dir, &minion_name)?);
            report.minions.push(minion.name);
        }
        Ok(None) => {}
        Err(e) if e.is_minion_error() => {
            tracing::warn!(output = name, error = %e, "skipping minion");
            report.warnings.push(format!("{name}: {e}"));
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::build_zip;
    use crate::error::ExtractorError;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const BOB_XML: &str = r#"<document><public><character name="Bob"><minions><character name="Fido"/></minions></character></public></document>"#;

    fn write_zip(dir: &Path, file: &str, members: &[(&str, &[u8], bool)]) -> PathBuf {
        let path = dir.join(file);
        fs::write(&path, build_zip(members)).unwrap();
        assert!(PortfolioArchive::new(&fs::read(&path).unwrap()).is_ok());
        path
    }

    fn file_names(report: &ExtractionReport) -> Vec<String> {
        report
            .outputs
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_extract_archive_with_minion() {
        let temp_dir = tempdir().unwrap();
        let input = write_zip(
            temp_dir.path(),
            "Party.por",
            &[
                ("statblocks_xml/1_Bob.xml", BOB_XML.as_bytes(), true),
                ("statblocks_text/1_Bob.txt", b"Bob".as_slice(), false),
            ],
        );

        let report = extract(&input, &ExtractOptions::default()).unwrap();

        assert!(report.is_success());
        assert_eq!(
            file_names(&report),
            vec![
                "Party - Bob.xml",
                "Party - Bob.json",
                "Party - Bob - Fido.json",
                "Party - Bob.txt",
            ]
        );
        assert_eq!(report.characters, vec!["Bob"]);
        assert_eq!(report.minions, vec!["Fido"]);
        assert_eq!(
            fs::read(temp_dir.path().join("Party - Bob.xml")).unwrap(),
            BOB_XML.as_bytes()
        );
    }

    #[test]
    fn test_extract_archive_without_raw_or_minions() {
        let temp_dir = tempdir().unwrap();
        let input = write_zip(
            temp_dir.path(),
            "Party.por",
            &[("statblocks_xml/1_Bob.xml", BOB_XML.as_bytes(), false)],
        );
        let options = ExtractOptions::new().with_raw(false).with_minions(false);

        let report = extract(&input, &options).unwrap();
        assert_eq!(file_names(&report), vec!["Party - Bob.json"]);
        assert!(report.minions.is_empty());
    }

    #[test]
    fn test_malformed_member_does_not_stop_others() {
        let temp_dir = tempdir().unwrap();
        let input = write_zip(
            temp_dir.path(),
            "Party.por",
            &[
                ("statblocks_xml/1_Bob.xml", BOB_XML.as_bytes(), false),
                ("statblocks_xml/2_Broken.xml", b"<document><public>".as_slice(), false),
                ("statblocks_xml/3_Lem.xml", b"<document/>".as_slice(), false),
            ],
        );
        let options = ExtractOptions::new().with_raw(false);

        let report = extract(&input, &options).unwrap();

        assert!(!report.is_success());
        assert_eq!(report.characters, vec!["Bob", "Lem"]);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("2_Broken.xml"));
        assert!(temp_dir.path().join("Party - Lem.json").exists());
        assert!(!temp_dir.path().join("Party - Broken.json").exists());
    }

    #[test]
    fn test_corrupted_member_does_not_stop_others() {
        let temp_dir = tempdir().unwrap();
        let mut data = build_zip(&[
            ("statblocks_xml/1_Bob.xml", BOB_XML.as_bytes(), false),
            ("statblocks_xml/2_Lem.xml", b"<document/>".as_slice(), false),
        ]);
        let pos = data.windows(5).position(|w| w == b"\"Bob\"").unwrap();
        data[pos + 1] = b'R';
        let input = temp_dir.path().join("Party.por");
        fs::write(&input, data).unwrap();

        let report = extract(&input, &ExtractOptions::new().with_raw(false)).unwrap();

        assert_eq!(report.characters, vec!["Lem"]);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("1_Bob.xml"));
        assert!(!temp_dir.path().join("Party - Bob.json").exists());
    }

    #[test]
    fn test_minion_without_name_keeps_primary() {
        let temp_dir = tempdir().unwrap();
        let xml = r#"<document><public><character name="Bob"><minions><character><race>Dog</race></character></minions></character></public></document>"#;
        let input = write_zip(
            temp_dir.path(),
            "Party.por",
            &[("statblocks_xml/1_Bob.xml", xml.as_bytes(), false)],
        );
        let options = ExtractOptions::new().with_raw(false);

        let report = extract(&input, &options).unwrap();

        assert!(report.is_success());
        assert_eq!(file_names(&report), vec!["Party - Bob.json"]);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("_name"));
    }

    #[test]
    fn test_output_dir_option() {
        let temp_dir = tempdir().unwrap();
        let out_dir = temp_dir.path().join("out");
        fs::create_dir(&out_dir).unwrap();
        let input = write_zip(
            temp_dir.path(),
            "Party.por",
            &[("statblocks_xml/1_Bob.xml", BOB_XML.as_bytes(), false)],
        );
        let options = ExtractOptions::new().with_output_dir(&out_dir).with_raw(false);

        let report = extract(&input, &options).unwrap();
        assert!(report.outputs.iter().all(|p| p.starts_with(&out_dir)));
    }

    #[test]
    fn test_extract_xml_file() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("Bob.xml");
        fs::write(&input, BOB_XML).unwrap();

        let report = extract(&input, &ExtractOptions::default()).unwrap();
        assert_eq!(file_names(&report), vec!["Bob.json", "Bob - Fido.json"]);
    }

    #[test]
    fn test_extract_malformed_xml_file() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("Bob.xml");
        fs::write(&input, "<document>").unwrap();

        assert!(matches!(
            extract(&input, &ExtractOptions::default()),
            Err(ExtractorError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_extract_unsupported_input() {
        assert!(matches!(
            extract(Path::new("Bob.htm"), &ExtractOptions::default()),
            Err(ExtractorError::UnsupportedInput(_))
        ));
    }

    #[test]
    fn test_extract_non_zip_archive() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("Party.por");
        fs::write(&input, "definitely not a zip file").unwrap();

        assert!(matches!(
            extract(&input, &ExtractOptions::default()),
            Err(ExtractorError::Archive(_))
        ));
    }
}
