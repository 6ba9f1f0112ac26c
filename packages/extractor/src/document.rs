//! The generic document tree produced from statblock XML.
//!
//! A [`Document`] is an object, a sequence or a string scalar. Objects keep
//! insertion order, and that order is the order keys are written out in.

use indexmap::IndexMap;
use serde::Serialize;

/// Ordered mapping used for [`Document::Object`].
pub type Object = IndexMap<String, Document>;

/// A converted statblock value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Document {
    /// Ordered key/value mapping.
    Object(Object),
    /// Repeated sibling elements, in document order.
    Sequence(Vec<Document>),
    /// Element text or attribute value. Never absent; empty when there is no text.
    Scalar(String),
}

impl Document {
    /// An empty string scalar.
    #[must_use]
    pub fn empty() -> Self {
        Self::Scalar(String::new())
    }

    /// Look up `key` if this is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_object()?.get(key)
    }

    /// Follow a path of object keys.
    ///
    /// Every step checks that the current value is an object; a scalar or
    /// sequence part-way down ends the lookup with `None`.
    ///
    /// # Examples
    /// ```
    /// use statblock_extractor::xml::transform_str;
    ///
    /// let doc = transform_str(r#"<a><b><c x="1"/></b></a>"#).unwrap();
    /// assert!(doc.get_path(&["a", "b", "c"]).is_some());
    /// assert!(doc.get_path(&["a", "b", "c", "_x", "deeper"]).is_none());
    /// ```
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&Document> {
        path.iter().try_fold(self, |current, key| current.get(key))
    }

    /// Replace the value at `path`, returning `false` if any parent along
    /// the way is missing or not an object.
    pub fn set_path(&mut self, path: &[&str], value: Document) -> bool {
        let Some((last, parents)) = path.split_last() else {
            *self = value;
            return true;
        };

        let mut current = self;
        for key in parents {
            current = match current {
                Self::Object(map) => match map.get_mut(*key) {
                    Some(next) => next,
                    None => return false,
                },
                _ => return false,
            };
        }

        match current {
            Self::Object(map) => {
                map.insert((*last).to_string(), value);
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Document]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// True for the empty-string placeholder an empty element turns into.
    #[must_use]
    pub fn is_empty_scalar(&self) -> bool {
        matches!(self, Self::Scalar(s) if s.is_empty())
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Object> for Document {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl From<Vec<Document>> for Document {
    fn from(value: Vec<Document>) -> Self {
        Self::Sequence(value)
    }
}
