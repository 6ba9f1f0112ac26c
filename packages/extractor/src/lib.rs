//! Statblock Extractor - Convert Hero Lab portfolio statblocks to JSON.
//!
//! Portfolio archives (`.por`, `.stock`) are zip files holding each
//! character's statblock as XML, HTML and plain text. This crate converts
//! the XML statblock into a generic JSON document and splits a character's
//! minion (animal companion, familiar, ...) into a standalone document.
//!
//! # Example
//!
//! ```
//! use statblock_extractor::{split_minion, transform};
//!
//! let xml = br#"<document><public><character name="Bob">
//!     <minions><character name="Fido"/></minions>
//! </character></public></document>"#;
//!
//! let primary = transform(xml).unwrap();
//! let minion = split_minion(&primary).unwrap().expect("Bob has a minion");
//! assert_eq!(minion.name, "Fido");
//! ```
//!
//! # Architecture
//!
//! - [`document`]: The generic Object/Sequence/Scalar document tree
//! - [`xml`]: XML to document conversion
//! - [`minion`]: Minion splitting
//! - [`archive`]: Portfolio (zip) reading and statblock member discovery
//! - [`naming`]: Output file naming
//! - [`output`]: JSON rendering and atomic file writes
//! - [`config`]: Constants, options and validation
//! - [`error`]: Error types and Result alias
//! - [`extractor`]: Per-input extraction service
//! - [`cli`]: Command-line interface

pub mod archive;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod extractor;
pub mod minion;
pub mod naming;
pub mod output;
pub mod xml;

// Re-export main functions
pub use extractor::{extract, extract_archive, extract_xml_file, ExtractionReport};
pub use minion::{split_minion, Minion};
pub use xml::{transform, transform_str};

// Re-export commonly used items
pub use config::ExtractOptions;
pub use document::Document;
pub use error::{ExtractorError, Result};
