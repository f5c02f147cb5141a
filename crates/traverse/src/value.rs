//! `Container` for the dynamic [`Value`] tree.
//!
//! Arrays accept any key: array indices address slots, everything else
//! (names, symbols, index-shaped keys past the largest slot) is a named
//! property of the array.
use crate::container::{Container, ContainerKind, StringProperty, is_length, string_property};
use keypath_types::{Array, Key, MAX_ARRAY_LENGTH, Value, array_index};
use std::borrow::Cow;

impl Container for Value {
    fn empty(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Ordered => Value::array(),
            ContainerKind::Keyed => Value::object(),
        }
    }

    fn is_nullish(&self) -> bool {
        Value::is_nullish(self)
    }

    fn is_primitive(&self) -> bool {
        Value::is_primitive(self)
    }

    fn get_property(&self, key: &Key) -> Option<Cow<'_, Self>> {
        match self {
            Value::Object(object) => object.get(key).map(Cow::Borrowed),
            Value::Array(array) if is_length(key) => {
                Some(Cow::Owned(Value::from(array.len())))
            }
            Value::Array(array) => match array_index(key) {
                Some(slot) => array.get(slot as usize).map(Cow::Borrowed),
                None => array.get_named(key).map(Cow::Borrowed),
            },
            Value::String(text) => match string_property(text, key)? {
                StringProperty::Length(len) => Some(Cow::Owned(Value::from(len))),
                StringProperty::Char(c) => Some(Cow::Owned(Value::String(c.to_string()))),
            },
            _ => None,
        }
    }

    fn get_own_property_mut(&mut self, key: &Key) -> Option<&mut Self> {
        match self {
            Value::Object(object) => object.get_own_mut(key),
            Value::Array(array) => match array_index(key) {
                Some(slot) => array.get_mut(slot as usize),
                None => array.get_named_mut(key),
            },
            _ => None,
        }
    }

    fn set_property(&mut self, key: &Key, value: Self) -> bool {
        match self {
            Value::Object(object) => object.insert(key.clone(), value),
            Value::Array(array) if is_length(key) => set_length(array, &value),
            Value::Array(array) => match array_index(key) {
                Some(slot) => array.set(slot as usize, value),
                None => array.insert_named(key.clone(), value),
            },
            _ => false,
        }
    }

    fn delete_property(&mut self, key: &Key) -> bool {
        match self {
            Value::Object(object) => object.remove(key),
            Value::Array(_) if is_length(key) => false,
            Value::Array(array) => match array_index(key) {
                Some(slot) => array.remove(slot as usize),
                None => array.remove_named(key),
            },
            _ => false,
        }
    }

    fn has_own_property(&self, key: &Key) -> bool {
        match self {
            Value::Object(object) => object.has_own(key),
            Value::Array(_) if is_length(key) => true,
            Value::Array(array) => match array_index(key) {
                Some(slot) => array.has(slot as usize),
                None => array.has_named(key),
            },
            Value::String(text) => string_property(text, key).is_some(),
            _ => false,
        }
    }

    fn has_property(&self, key: &Key) -> bool {
        match self {
            Value::Object(object) => object.has(key),
            _ => self.has_own_property(key),
        }
    }
}

/// Assigning `length` truncates the array or extends it with holes; only
/// whole, non-negative numbers are accepted.
fn set_length(array: &mut Array, value: &Value) -> bool {
    match value.as_f64() {
        Some(len) if len >= 0.0 && len.fract() == 0.0 && len <= MAX_ARRAY_LENGTH as f64 => {
            array.set_len(len as u64)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keypath_types::{Object, Symbol};
    use std::sync::Arc;

    fn key(name: &str) -> Key {
        Key::from(name)
    }

    #[test]
    fn test_array_properties() {
        let mut array = Value::from(vec![Value::from("a"), Value::from("b")]);
        assert_eq!(array.get_property(&key("length")).as_deref(), Some(&Value::from(2)));
        assert_eq!(array.get_property(&key("1")).as_deref(), Some(&Value::from("b")));
        assert!(array.get_property(&key("2")).is_none());
        assert!(array.get_property(&key("x")).is_none());

        assert!(array.set_property(&key("3"), Value::from("d")));
        assert_eq!(array.get_property(&key("length")).as_deref(), Some(&Value::from(4)));
        assert!(!array.has_own_property(&key("2")));

        assert!(array.set_property(&key("x"), Value::Null));
        assert_eq!(array.get_property(&key("x")).as_deref(), Some(&Value::Null));
        assert_eq!(array.get_property(&key("length")).as_deref(), Some(&Value::from(4)));
        assert!(array.delete_property(&key("x")));
        assert!(!array.has_own_property(&key("x")));

        assert!(array.set_property(&key("length"), Value::from(1)));
        assert!(!array.has_own_property(&key("1")));
        assert!(!array.set_property(&key("length"), Value::from(-1)));
        assert!(!array.delete_property(&key("length")));
    }

    #[test]
    fn test_string_properties() {
        let text = Value::from("héllo");
        assert_eq!(text.get_property(&key("length")).as_deref(), Some(&Value::from(5)));
        assert_eq!(text.get_property(&key("1")).as_deref(), Some(&Value::from("é")));
        assert!(text.has_own_property(&key("4")));
        assert!(!text.has_own_property(&key("5")));
    }

    #[test]
    fn test_object_delegation() {
        let proto: Object = [("shared", 1)].into_iter().collect();
        let value = Value::Object(Object::with_prototype(Arc::new(proto)));
        assert_eq!(value.get_property(&key("shared")).as_deref(), Some(&Value::from(1)));
        assert!(value.has_property(&key("shared")));
        assert!(!value.has_own_property(&key("shared")));
    }

    #[test]
    fn test_symbol_keys() {
        let tag = Key::Symbol(Symbol::new("tag"));
        let mut object = Value::object();
        assert!(object.set_property(&tag, Value::from(true)));
        assert!(object.has_own_property(&tag));
        assert!(!object.has_own_property(&key("Symbol(tag)")));

        let mut array = Value::array();
        assert!(array.set_property(&tag, Value::Null));
        assert!(array.has_own_property(&tag));
        assert!(!array.has_own_property(&key("Symbol(tag)")));
    }

    #[test]
    fn test_array_huge_writes() {
        let mut array = Value::array();
        assert!(array.set_property(&key("4000000000"), Value::from(1)));
        assert_eq!(
            array.get_property(&key("length")).as_deref(),
            Some(&Value::from(4_000_000_001u64))
        );
        assert_eq!(array.get_property(&key("4000000000")).as_deref(), Some(&Value::from(1)));

        assert!(array.set_property(&key("length"), Value::from(4_294_967_295u64)));
        assert!(!array.set_property(&key("length"), Value::from(4_294_967_296u64)));
        assert!(array.set_property(&key("length"), Value::from(0)));
        assert!(!array.has_own_property(&key("4000000000")));
    }

    #[test]
    fn test_array_index_past_last_slot_is_a_name() {
        let mut array = Value::array();
        assert!(array.set_property(&key("4294967295"), Value::from("far")));
        assert!(array.set_property(&key("9007199254740991"), Value::from("farther")));
        assert_eq!(array.get_property(&key("length")).as_deref(), Some(&Value::from(0)));
        assert_eq!(
            array.get_property(&key("4294967295")).as_deref(),
            Some(&Value::from("far"))
        );
        assert!(array.has_own_property(&key("9007199254740991")));
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(Value::empty(ContainerKind::Ordered), Value::array());
        assert_eq!(Value::empty(ContainerKind::Keyed), Value::object());
        assert_eq!(ContainerKind::for_next_key(&key("0")), ContainerKind::Ordered);
        assert_eq!(ContainerKind::for_next_key(&key("01")), ContainerKind::Keyed);
    }
}
