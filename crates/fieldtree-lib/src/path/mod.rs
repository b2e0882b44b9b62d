//! The two coordinate systems of a field tree.
//!
//! - [`KeyPath`]: logical address over struct keys, tuple indices and union
//!   keys. Modifiers (`optional`, `list`, `map`) are transparent to it.
//! - [`ValuePath`]: backend-facing address into a stored value or query
//!   expression. Includes a segment for every modifier on the way.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};


/// One step of a [`KeyPath`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeySegment {
    /// Tuple position.
    Index(usize),
    /// Struct or union key.
    Key(String),
}

impl From<&str> for KeySegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for KeySegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for KeySegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for KeySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Key(k) => f.write_str(k),
        }
    }
}

/// Structural address of a field, ignoring modifier wrapping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPath(Vec<KeySegment>);

impl KeyPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[KeySegment] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeySegment> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, segment: impl Into<KeySegment>) {
        self.0.push(segment.into());
    }

    pub fn pop(&mut self) -> Option<KeySegment> {
        self.0.pop()
    }

    /// A copy of this path extended by one segment.
    pub fn child(&self, segment: impl Into<KeySegment>) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }
}

impl FromIterator<KeySegment> for KeyPath {
    fn from_iter<I: IntoIterator<Item = KeySegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<S: Into<KeySegment>> From<Vec<S>> for KeyPath {
    fn from(segments: Vec<S>) -> Self {
        segments.into_iter().map(Into::into).collect()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Parses dotted text: `tags.0.name`. Purely numeric segments become indices.
/// The empty string is the root path.
impl FromStr for KeyPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        Ok(s.split('.')
            .map(|part| match part.parse::<usize>() {
                Ok(index) => KeySegment::Index(index),
                Err(_) => KeySegment::Key(part.to_string()),
            })
            .collect())
    }
}

/// One step of a [`ValuePath`]. This is the vocabulary handed to the query
/// backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ValueSegment {
    Struct { key: String },
    Union { key: String },
    Tuple { index: usize },
    List,
    Map,
    Optional,
}

impl ValueSegment {
    pub fn is_modifier(&self) -> bool {
        matches!(self, Self::List | Self::Map | Self::Optional)
    }

    /// The structural segment this step corresponds to, if any.
    pub fn key_segment(&self) -> Option<KeySegment> {
        match self {
            Self::Struct { key } | Self::Union { key } => Some(KeySegment::Key(key.clone())),
            Self::Tuple { index } => Some(KeySegment::Index(*index)),
            Self::List | Self::Map | Self::Optional => None,
        }
    }
}

/// Keys that could be read as another segment, or as the `:` of a filter
/// id, are written quoted.
fn write_key(f: &mut fmt::Formatter<'_>, key: &str) -> fmt::Result {
    let plain = !key.is_empty()
        && !key.bytes().all(|b| b.is_ascii_digit())
        && !key
            .chars()
            .any(|c| c.is_whitespace() || ".<>[]{}?:\"\\".contains(c));
    if plain {
        f.write_str(key)
    } else {
        write!(f, "{key:?}")
    }
}

impl fmt::Display for ValueSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct { key } => write_key(f, key),
            Self::Union { key } => {
                f.write_str("<")?;
                write_key(f, key)?;
                f.write_str(">")
            }
            Self::Tuple { index } => write!(f, "{index}"),
            Self::List => f.write_str("[]"),
            Self::Map => f.write_str("{}"),
            Self::Optional => f.write_str("?"),
        }
    }
}

/// Typed address into a stored value, including modifier steps.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValuePath(Vec<ValueSegment>);

impl ValuePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[ValueSegment] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValueSegment> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, segment: ValueSegment) {
        self.0.push(segment);
    }

    pub fn pop(&mut self) -> Option<ValueSegment> {
        self.0.pop()
    }

    /// Re-root this path one level down, under `segment`.
    pub fn prepend(&mut self, segment: ValueSegment) {
        self.0.insert(0, segment);
    }

    /// A copy of this path extended by one segment.
    pub fn child(&self, segment: ValueSegment) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// The structural part of this path, dropping modifier steps.
    pub fn key_path(&self) -> KeyPath {
        self.0.iter().filter_map(ValueSegment::key_segment).collect()
    }

    pub fn modifier_count(&self) -> usize {
        self.0.iter().filter(|s| s.is_modifier()).count()
    }
}

impl FromIterator<ValueSegment> for ValuePath {
    fn from_iter<I: IntoIterator<Item = ValueSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<ValueSegment>> for ValuePath {
    fn from(segments: Vec<ValueSegment>) -> Self {
        Self(segments)
    }
}

/// Compact form: `$`, `$.tags.[]`, `$.shape.<circle>.radius`.
impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}
