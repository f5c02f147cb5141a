//! A dynamic value tree with record-like objects, array-like arrays and
//! prototype delegation.
use crate::key::{Key, Symbol};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Arrays hold at most `2^32 - 1` slots; the largest valid index is one less.
pub const MAX_ARRAY_LENGTH: u64 = u32::MAX as u64;

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Symbol(Symbol),
    Array(Array),
    Object(Object),
}

impl Value {
    /// An empty object.
    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    /// An empty array.
    pub fn array() -> Self {
        Value::Array(Array::new())
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// True for `Null` and `Undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// True for everything that is not an array or an object.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Number(number)
    }
}

macro_rules! value_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(number: $ty) -> Self {
                    Value::Number(number as f64)
                }
            }
        )*
    };
}

value_from_integer!(i32, i64, u32, u64, usize);

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::String(text)
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Value::Symbol(symbol)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array::from(items))
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

/// An insertion-ordered record that may delegate reads to a prototype.
///
/// The prototype is shared and read-only: lookups fall through to it, writes
/// and deletes never reach it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    properties: IndexMap<Key, Value>,
    prototype: Option<Arc<Object>>,
    frozen: bool,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty object delegating to `prototype`.
    pub fn with_prototype(prototype: Arc<Object>) -> Self {
        Self {
            prototype: Some(prototype),
            ..Self::default()
        }
    }

    pub fn prototype(&self) -> Option<&Arc<Object>> {
        self.prototype.as_ref()
    }

    /// Refuses every later write, and every delete of an existing property.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Number of own properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn get_own(&self, key: &Key) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn get_own_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.properties.get_mut(key)
    }

    /// Looks `key` up on this object, then along the prototype chain.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        let mut object = self;
        loop {
            if let Some(value) = object.properties.get(key) {
                return Some(value);
            }
            object = object.prototype.as_deref()?;
        }
    }

    pub fn has_own(&self, key: &Key) -> bool {
        self.properties.contains_key(key)
    }

    /// True if `key` is an own property or is inherited from the prototype chain.
    pub fn has(&self, key: &Key) -> bool {
        self.get(key).is_some()
    }

    /// Writes an own property. Returns `false` if the object is frozen.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> bool {
        if self.frozen {
            return false;
        }
        self.properties.insert(key.into(), value.into());
        true
    }

    /// Deletes an own property. Removing a missing property succeeds; removing
    /// an existing property of a frozen object does not.
    pub fn remove(&mut self, key: &Key) -> bool {
        if !self.properties.contains_key(key) {
            return true;
        }
        if self.frozen {
            return false;
        }
        self.properties.shift_remove(key);
        true
    }

    /// Own properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.properties.iter()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            ..Self::default()
        }
    }
}

/// An ordered collection.
///
/// Slots are stored sparsely: a hole is a missing entry, so a large index or
/// `length` costs nothing until elements are written. Keys that are not array
/// indices, including index-shaped names at or above `2^32 - 1` and symbols,
/// live in a separate property map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    slots: BTreeMap<u32, Value>,
    len: u32,
    properties: IndexMap<Key, Value>,
    frozen: bool,
}

/// The slot `key` addresses on an array. Index-shaped keys beyond the largest
/// array index are ordinary property names.
pub fn array_index(key: &Key) -> Option<u32> {
    key.index()
        .filter(|index| *index < MAX_ARRAY_LENGTH)
        .and_then(|index| u32::try_from(index).ok())
}

fn to_slot(index: usize) -> Option<u32> {
    u32::try_from(index).ok().filter(|slot| u64::from(*slot) < MAX_ARRAY_LENGTH)
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// One past the highest slot, holes included.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The element at `index`; holes read as `None`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.slots.get(&to_slot(index)?)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.slots.get_mut(&to_slot(index)?)
    }

    pub fn has(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Writes `value` at `index`, extending the length when writing past the
    /// end. Indices at or above `2^32 - 1` are refused.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> bool {
        let Some(slot) = to_slot(index) else {
            return false;
        };
        if self.frozen {
            return false;
        }
        self.slots.insert(slot, value.into());
        self.len = self.len.max(slot + 1);
        true
    }

    /// Truncates to `len` slots, or extends with holes.
    pub fn set_len(&mut self, len: u64) -> bool {
        let Ok(len) = u32::try_from(len) else {
            return false;
        };
        if self.frozen {
            return false;
        }
        self.slots.retain(|slot, _| *slot < len);
        self.len = len;
        true
    }

    /// Punches a hole at `index`; the length is unchanged.
    pub fn remove(&mut self, index: usize) -> bool {
        if !self.has(index) {
            return true;
        }
        if self.frozen {
            return false;
        }
        if let Some(slot) = to_slot(index) {
            self.slots.remove(&slot);
        }
        true
    }

    pub fn push(&mut self, value: impl Into<Value>) -> bool {
        self.set(self.len as usize, value)
    }

    /// Present elements with their indices, in index order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.slots.iter().map(|(slot, value)| (*slot as usize, value))
    }

    /// A named (non-index) property.
    pub fn get_named(&self, key: &Key) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn get_named_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.properties.get_mut(key)
    }

    pub fn has_named(&self, key: &Key) -> bool {
        self.properties.contains_key(key)
    }

    pub fn insert_named(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> bool {
        if self.frozen {
            return false;
        }
        self.properties.insert(key.into(), value.into());
        true
    }

    pub fn remove_named(&mut self, key: &Key) -> bool {
        if !self.properties.contains_key(key) {
            return true;
        }
        if self.frozen {
            return false;
        }
        self.properties.shift_remove(key);
        true
    }
}

impl From<Vec<Value>> for Array {
    fn from(items: Vec<Value>) -> Self {
        items.into_iter().collect()
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut array = Array::new();
        for value in iter {
            array.push(value);
        }
        array
    }
}

#[cfg(feature = "json")]
mod json {
    use super::{Array, Object, Value};
    use crate::key::Key;
    use serde_json::{Map, Number};

    impl From<serde_json::Value> for Value {
        fn from(value: serde_json::Value) -> Self {
            match value {
                serde_json::Value::Null => Value::Null,
                serde_json::Value::Bool(flag) => Value::Bool(flag),
                serde_json::Value::Number(number) => {
                    Value::Number(number.as_f64().unwrap_or(f64::NAN))
                }
                serde_json::Value::String(text) => Value::String(text),
                serde_json::Value::Array(items) => {
                    Value::Array(items.into_iter().map(Value::from).collect())
                }
                serde_json::Value::Object(map) => Value::Object(map.into_iter().collect()),
            }
        }
    }

    /// Lossy: holes, `Undefined` and symbols become `null`; symbol-keyed,
    /// inherited and array-named properties are dropped.
    impl From<Value> for serde_json::Value {
        fn from(value: Value) -> Self {
            match value {
                Value::Undefined | Value::Null | Value::Symbol(_) => serde_json::Value::Null,
                Value::Bool(flag) => serde_json::Value::Bool(flag),
                Value::Number(number) => number_to_json(number),
                Value::String(text) => serde_json::Value::String(text),
                Value::Array(array) => array_to_json(array),
                Value::Object(object) => object_to_json(object),
            }
        }
    }

    fn number_to_json(number: f64) -> serde_json::Value {
        if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
            serde_json::Value::Number(Number::from(number as i64))
        } else {
            Number::from_f64(number).map_or(serde_json::Value::Null, serde_json::Value::Number)
        }
    }

    /// The result is dense: every hole up to `len` is written out as `null`.
    fn array_to_json(array: Array) -> serde_json::Value {
        let mut items = vec![serde_json::Value::Null; array.len()];
        for (slot, value) in array.slots {
            items[slot as usize] = serde_json::Value::from(value);
        }
        serde_json::Value::Array(items)
    }

    fn object_to_json(object: Object) -> serde_json::Value {
        let map: Map<String, serde_json::Value> = object
            .properties
            .into_iter()
            .filter_map(|(key, value)| match key {
                Key::Name(name) => Some((name, serde_json::Value::from(value))),
                Key::Symbol(_) => None,
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prototype_lookup() {
        let proto: Object = [("inherited", 1)].into_iter().collect();
        let mut object = Object::with_prototype(Arc::new(proto));
        object.insert("own", 2);

        assert_eq!(object.get(&Key::from("inherited")), Some(&Value::from(1)));
        assert!(object.has(&Key::from("inherited")));
        assert!(!object.has_own(&Key::from("inherited")));
        assert!(object.has_own(&Key::from("own")));
        assert_eq!(object.len(), 1);
    }

    #[test]
    fn test_frozen_object() {
        let mut object: Object = [("a", 1)].into_iter().collect();
        object.freeze();
        assert!(!object.insert("b", 2));
        assert!(!object.remove(&Key::from("a")));
        assert!(object.remove(&Key::from("missing")));
        assert_eq!(object.get_own(&Key::from("a")), Some(&Value::from(1)));
    }

    #[test]
    fn test_array_holes() {
        let mut array = Array::new();
        assert!(array.set(2, "c"));
        assert_eq!(array.len(), 3);
        assert!(!array.has(0));
        assert_eq!(array.get(2), Some(&Value::from("c")));

        assert!(array.remove(2));
        assert_eq!(array.len(), 3);
        assert!(!array.has(2));

        assert!(array.set(4, "e"));
        assert!(array.set_len(2));
        assert_eq!(array.entries().count(), 0);
    }

    #[test]
    fn test_array_is_sparse() {
        let mut array = Array::new();
        assert!(array.set(4_000_000_000, 1));
        assert_eq!(array.len(), 4_000_000_001);
        assert_eq!(array.get(4_000_000_000), Some(&Value::from(1)));
        assert_eq!(array.entries().count(), 1);

        assert!(array.set_len(MAX_ARRAY_LENGTH));
        assert_eq!(array.len() as u64, MAX_ARRAY_LENGTH);
        assert!(!array.set_len(MAX_ARRAY_LENGTH + 1));
    }

    #[test]
    fn test_array_limits() {
        let mut array = Array::new();
        assert!(!array.set(MAX_ARRAY_LENGTH as usize, 1));
        assert!(array.is_empty());
        array.freeze();
        assert!(!array.push(1));
        assert!(!array.set_len(4));
        assert!(!array.insert_named("name", 1));
    }

    #[test]
    fn test_array_named_properties() {
        let mut array: Array = [1, 2].into_iter().collect();
        let big = Key::from("4294967295");
        assert_eq!(array_index(&big), None);
        assert_eq!(array_index(&Key::from("4294967294")), Some(4_294_967_294));

        assert!(array.insert_named(big.clone(), "far"));
        assert!(array.insert_named("name", "list"));
        assert_eq!(array.len(), 2);
        assert_eq!(array.get_named(&big), Some(&Value::from("far")));
        assert!(array.has_named(&Key::from("name")));

        assert!(array.remove_named(&Key::from("name")));
        assert!(!array.has_named(&Key::from("name")));
        assert!(array.remove_named(&Key::from("missing")));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_conversion() {
        let json = serde_json::json!({ "a": [1, "two", null], "b": { "c": true } });
        let value = Value::from(json.clone());
        assert_eq!(
            value.as_object().and_then(|o| o.get_own(&Key::from("a"))),
            Some(&Value::from(vec![Value::from(1), Value::from("two"), Value::Null]))
        );
        assert_eq!(serde_json::Value::from(value), json);
    }
}
