//! JSON rendering and file output.

mod writer;

pub use writer::{render_json, save_json, save_raw};
