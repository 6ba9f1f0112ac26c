//! XML parsing and conversion into [`Document`](crate::document::Document) trees.

mod transform;
mod utils;

pub use transform::{transform, transform_str};
pub use utils::{direct_text, element_children, get_attribute_name, get_tag_name};
