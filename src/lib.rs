//! Key paths for nested data.
//!
//! A key path such as `a.b[0]['c.d']` names a location in a tree of objects
//! and arrays. This crate parses paths into key sequences and walks them to
//! read, write, delete and test values:
//!
//! ```
//! use keypath::{Value, get, set};
//!
//! let mut data = Value::object();
//! assert!(set(&mut data, "a.b[0].c", Value::from(1)).unwrap());
//! assert_eq!(get(&data, "a.b.0.c").unwrap().as_deref(), Some(&Value::from(1)));
//! ```
//!
//! With the default `json` feature the same operations work on
//! `serde_json::Value`.
//!
//! Traversal is synchronous and walks only the path it is given. Nothing
//! guards against a [`Container`] implementation that re-enters the engine
//! from inside a property access.

// --- Public API ---
pub use keypath_parser::{KeyPath, PathLike, is_key_path, key_path, parse, to_path, to_path_all};
pub use keypath_traverse::{
    Container, ContainerKind, KeyPathError, delete, exists, get, has, has_in, set,
};
pub use keypath_types::{
    Array, Key, MAX_ARRAY_LENGTH, MAX_SAFE_INTEGER, Object, Symbol, ToPropertyKey, Value,
    array_index, is_index_key, parse_index,
};
