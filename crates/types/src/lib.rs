//! Foundation types for key paths: property keys, symbols, coercion helpers
//! and a dynamic value model to traverse.

pub mod key;
pub mod value;

// --- Public API ---
pub use key::{
    Key, MAX_SAFE_INTEGER, Symbol, ToPropertyKey, is_index_key, number_to_string, parse_index,
};
pub use value::{Array, MAX_ARRAY_LENGTH, Object, Value, array_index};
