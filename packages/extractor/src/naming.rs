//! Output file naming.
//!
//! Outputs are named `<base> - <character>` and, for a split minion,
//! `<base> - <character> - <minion>`, where `<base>` is the input file stem.

use std::path::Path;

use crate::config::{sanitize_filename, UNNAMED};

/// Base name of an input file: its stem, without directory or extension.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use statblock_extractor::naming::base_name;
///
/// assert_eq!(base_name(Path::new("portfolios/Party.por")), "Party");
/// ```
pub fn base_name(input: &Path) -> String {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .map(sanitize_filename)
        .unwrap_or_else(|| UNNAMED.to_string())
}

/// Output identifier for a character, or for its minion when `minion` is set.
///
/// # Examples
/// ```
/// use statblock_extractor::naming::output_name;
///
/// assert_eq!(output_name("Party", "Bob", None), "Party - Bob");
/// assert_eq!(output_name("Party", "Bob", Some("Fido")), "Party - Bob - Fido");
/// ```
pub fn output_name(base: &str, character: &str, minion: Option<&str>) -> String {
    let name = format!("{base} - {}", sanitize_filename(character));
    match minion {
        Some(minion) => minion_output_name(&name, minion),
        None => name,
    }
}

/// Output identifier for a minion split from the output named `primary`.
pub fn minion_output_name(primary: &str, minion: &str) -> String {
    format!("{primary} - {}", sanitize_filename(minion))
}
