//! Defines the structural property-access contract for traversable data.
use keypath_types::Key;
use std::borrow::Cow;

/// The two shapes of container the engine creates on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Array-like, addressed by index.
    Ordered,
    /// Record-like, addressed by name.
    Keyed,
}

impl ContainerKind {
    /// The kind of container to create when `next` is the key that will be
    /// looked up inside it.
    pub fn for_next_key(next: &Key) -> Self {
        if next.is_index() {
            ContainerKind::Ordered
        } else {
            ContainerKind::Keyed
        }
    }
}

/// The universal contract for a node the traversal engine can walk.
///
/// The engine in [`crate::engine`] is written exclusively against this trait,
/// so it operates on [`keypath_types::Value`], `serde_json::Value` or any other
/// tree that implements it.
pub trait Container: Clone {
    /// A fresh, empty container of the given kind.
    fn empty(kind: ContainerKind) -> Self;

    /// True for the null/absent values that end a read.
    fn is_nullish(&self) -> bool;

    /// True for anything that is not a container. Nullish values are primitive.
    fn is_primitive(&self) -> bool;

    /// Reads a property, following delegation if the container supports it.
    /// Computed properties such as an array's `length` come back owned.
    fn get_property(&self, key: &Key) -> Option<Cow<'_, Self>>;

    /// Mutable access to an own, stored property.
    fn get_own_property_mut(&mut self, key: &Key) -> Option<&mut Self>;

    /// Writes a property. Returns `false` if the write is refused.
    fn set_property(&mut self, key: &Key, value: Self) -> bool;

    /// Deletes a property. Deleting a missing property succeeds.
    fn delete_property(&mut self, key: &Key) -> bool;

    /// True if `key` is an own property.
    fn has_own_property(&self, key: &Key) -> bool;

    /// True if `key` is an own or inherited property.
    fn has_property(&self, key: &Key) -> bool {
        self.has_own_property(key)
    }
}

/// Computed properties of a string: its `length` and its characters by index.
pub(crate) enum StringProperty {
    Length(usize),
    Char(char),
}

pub(crate) fn string_property(text: &str, key: &Key) -> Option<StringProperty> {
    if is_length(key) {
        return Some(StringProperty::Length(text.chars().count()));
    }
    let index = usize::try_from(key.index()?).ok()?;
    text.chars().nth(index).map(StringProperty::Char)
}

/// The slot an index key addresses, if it fits in memory.
pub(crate) fn slot(key: &Key) -> Option<usize> {
    key.index().and_then(|index| usize::try_from(index).ok())
}

pub(crate) fn is_length(key: &Key) -> bool {
    key.as_str() == Some("length")
}
