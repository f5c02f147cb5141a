//! `Container` for `serde_json::Value`.
//!
//! JSON has no symbols and no delegation: symbol keys are never present, and
//! `has_property` is the same as `has_own_property`. Deleting an array element
//! leaves `null` in its slot so later indices keep their positions.
//!
//! JSON arrays are dense and carry no named properties. Writes that the
//! dynamic [`keypath_types::Value`] accepts are refused here (`false`) when:
//!
//! * the key is not an array index, such as `list.name` or an index at or
//!   above `2^32 - 1`;
//! * an index or `length` would grow the array by more than
//!   `MAX_ARRAY_GROWTH` slots of `null` padding.
use crate::container::{Container, ContainerKind, StringProperty, is_length, slot, string_property};
use keypath_types::{Key, MAX_ARRAY_LENGTH};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// The most slots a single index or `length` write may add to a JSON array.
const MAX_ARRAY_GROWTH: usize = 1 << 16;

fn within_growth(items: &[Value], len: u64) -> bool {
    len <= MAX_ARRAY_LENGTH && len <= (items.len() + MAX_ARRAY_GROWTH) as u64
}

impl Container for Value {
    fn empty(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Ordered => Value::Array(Vec::new()),
            ContainerKind::Keyed => Value::Object(Map::new()),
        }
    }

    fn is_nullish(&self) -> bool {
        self.is_null()
    }

    fn is_primitive(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }

    fn get_property(&self, key: &Key) -> Option<Cow<'_, Self>> {
        match self {
            Value::Object(map) => map.get(key.as_str()?).map(Cow::Borrowed),
            Value::Array(items) if is_length(key) => Some(Cow::Owned(Value::from(items.len()))),
            Value::Array(items) => items.get(slot(key)?).map(Cow::Borrowed),
            Value::String(text) => match string_property(text, key)? {
                StringProperty::Length(len) => Some(Cow::Owned(Value::from(len))),
                StringProperty::Char(c) => Some(Cow::Owned(Value::String(c.to_string()))),
            },
            _ => None,
        }
    }

    fn get_own_property_mut(&mut self, key: &Key) -> Option<&mut Self> {
        match self {
            Value::Object(map) => map.get_mut(key.as_str()?),
            Value::Array(items) => items.get_mut(slot(key)?),
            _ => None,
        }
    }

    fn set_property(&mut self, key: &Key, value: Self) -> bool {
        match (self, key) {
            (_, Key::Symbol(_)) => false,
            (Value::Object(map), Key::Name(name)) => {
                map.insert(name.clone(), value);
                true
            }
            (Value::Array(items), _) if is_length(key) => match value.as_u64() {
                Some(len) if within_growth(items, len) => {
                    items.resize(len as usize, Value::Null);
                    true
                }
                _ => false,
            },
            (Value::Array(items), _) => match slot(key) {
                Some(index) if within_growth(items, index as u64 + 1) => {
                    if index >= items.len() {
                        items.resize(index + 1, Value::Null);
                    }
                    items[index] = value;
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    fn delete_property(&mut self, key: &Key) -> bool {
        match (self, key) {
            (Value::Object(map), Key::Name(name)) => {
                map.remove(name);
                true
            }
            (Value::Array(_), _) if is_length(key) => false,
            (Value::Array(items), _) => {
                if let Some(item) = slot(key).and_then(|index| items.get_mut(index)) {
                    *item = Value::Null;
                }
                true
            }
            (Value::Object(_), Key::Symbol(_)) => true,
            _ => false,
        }
    }

    fn has_own_property(&self, key: &Key) -> bool {
        match self {
            Value::Object(map) => key.as_str().is_some_and(|name| map.contains_key(name)),
            Value::Array(_) if is_length(key) => true,
            Value::Array(items) => slot(key).is_some_and(|index| index < items.len()),
            Value::String(text) => string_property(text, key).is_some(),
            _ => false,
        }
    }
}
