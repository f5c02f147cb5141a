//! The `KeyPath` type: an owned, growable key sequence that renders back to
//! path syntax.
use crate::parser::parse;
use crate::path::{PathLike, to_path_all};
use keypath_types::Key;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::any::Any;
use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::ops::{Index, Range};
use std::str::FromStr;

/// An ordered sequence of keys.
///
/// A `KeyPath` passed to a traversal function is used as is, without being
/// rendered or re-parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    keys: Vec<Key>,
}

impl KeyPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a key path from several expressions, concatenated left to right.
    pub fn from_exprs(paths: &[&dyn PathLike]) -> Self {
        Self {
            keys: to_path_all(paths),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns a new key path with `paths` appended; `self` is left untouched.
    pub fn concat(&self, paths: &[&dyn PathLike]) -> KeyPath {
        let mut keys = self.keys.clone();
        for path in paths {
            path.append_keys(&mut keys);
        }
        Self { keys }
    }

    /// Appends `paths` in place and returns the new length.
    pub fn push(&mut self, paths: &[&dyn PathLike]) -> usize {
        for path in paths {
            path.append_keys(&mut self.keys);
        }
        self.keys.len()
    }

    /// `(index, key)` pairs in order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Key)> {
        self.keys.iter().enumerate()
    }

    /// The indices of the keys.
    pub fn keys(&self) -> Range<usize> {
        0..self.keys.len()
    }

    /// The keys in order.
    pub fn values(&self) -> std::slice::Iter<'_, Key> {
        self.keys.iter()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.keys.iter()
    }

    pub fn as_slice(&self) -> &[Key] {
        &self.keys
    }

    /// An independent copy of the keys.
    pub fn to_vec(&self) -> Vec<Key> {
        self.keys.clone()
    }

    pub fn into_vec(self) -> Vec<Key> {
        self.keys
    }
}

/// True if `value` is a [`KeyPath`].
pub fn is_key_path(value: &dyn Any) -> bool {
    value.is::<KeyPath>()
}

impl PathLike for KeyPath {
    fn append_keys(&self, out: &mut Vec<Key>) {
        out.extend_from_slice(&self.keys);
    }

    fn resolve(&self) -> Cow<'_, [Key]> {
        Cow::Borrowed(&self.keys)
    }
}

// --- Rendering ---

fn needs_quotes(name: &str) -> bool {
    name.contains(['.', '[', ']', '\'', '"'])
}

/// Keys that render as a plain dotted segment.
fn is_dotted(key: &Key) -> bool {
    match key {
        Key::Name(name) => !key.is_index() && !needs_quotes(name),
        Key::Symbol(_) => false,
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    f.write_str("['")?;
    for c in name.chars() {
        if matches!(c, '\\' | '[' | ']' | '\'' | '"') {
            f.write_str("\\")?;
        }
        write!(f, "{}", c)?;
    }
    f.write_str("']")
}

/// Renders path syntax that parses back to the same keys. Symbols render as
/// `[Symbol(description)]`, which does not parse back.
impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, key) in self.keys.iter().enumerate() {
            let next = self.keys.get(index + 1);
            match key {
                Key::Symbol(symbol) => write!(f, "[{}]", symbol)?,
                Key::Name(name) if key.is_index() => write!(f, "[{}]", name)?,
                Key::Name(name) if needs_quotes(name) => write_quoted(f, name)?,
                Key::Name(name) if !name.is_empty() => {
                    if index > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                // An empty key survives as a dotted gap only where the parser
                // produces one: before a plain key, or trailing.
                Key::Name(_) => {
                    let gap = match next {
                        Some(next) => is_dotted(next) && next != "",
                        None => index > 0 || self.keys.len() == 1,
                    };
                    if !gap {
                        f.write_str("['']")?;
                    } else if index > 0 {
                        f.write_str(".")?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Self { keys: parse(text) })
    }
}

impl From<Vec<Key>> for KeyPath {
    fn from(keys: Vec<Key>) -> Self {
        Self { keys }
    }
}

impl From<KeyPath> for Vec<Key> {
    fn from(path: KeyPath) -> Self {
        path.keys
    }
}

impl FromIterator<Key> for KeyPath {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl Extend<Key> for KeyPath {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        self.keys.extend(iter);
    }
}

impl Index<usize> for KeyPath {
    type Output = Key;

    fn index(&self, index: usize) -> &Key {
        &self.keys[index]
    }
}

impl AsRef<[Key]> for KeyPath {
    fn as_ref(&self) -> &[Key] {
        &self.keys
    }
}

impl IntoIterator for KeyPath {
    type Item = Key;
    type IntoIter = std::vec::IntoIter<Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

// --- Serde ---

/// Serializes as the rendered path string.
impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct KeyPathVisitor;

impl<'de> Visitor<'de> for KeyPathVisitor {
    type Value = KeyPath;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a path string or a sequence of keys")
    }

    fn visit_str<E: de::Error>(self, text: &str) -> Result<KeyPath, E> {
        Ok(KeyPath { keys: parse(text) })
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<KeyPath, A::Error> {
        let mut keys = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(name) = seq.next_element::<String>()? {
            keys.push(Key::Name(name));
        }
        Ok(KeyPath { keys })
    }
}

/// Accepts a path string (parsed) or a sequence of strings (taken verbatim).
impl<'de> Deserialize<'de> for KeyPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(KeyPathVisitor)
    }
}
