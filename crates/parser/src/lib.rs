//! Parsing for key path expressions.
//!
//! A key path addresses a location in nested data: `a.b[0]['c.d']` is the
//! four keys `a`, `b`, `0` and `c.d`. This crate turns path expressions into
//! key sequences and provides [`KeyPath`], an owned key sequence that renders
//! back to path syntax.

pub mod key_path;
mod parser;
pub mod path;

// --- Public API ---
pub use key_path::{KeyPath, is_key_path};
pub use keypath_types::{Key, Symbol, ToPropertyKey};
pub use parser::parse;
pub use path::{PathLike, to_path, to_path_all};

/// Builds a [`KeyPath`] from any number of path expressions.
///
/// ```
/// use keypath_parser::{Key, key_path};
///
/// let path = key_path!("a", [Key::from("b"), Key::from(0)], "c");
/// assert_eq!(path.to_string(), "a.b[0].c");
/// ```
#[macro_export]
macro_rules! key_path {
    () => {
        $crate::KeyPath::new()
    };
    ($($path:expr),+ $(,)?) => {
        $crate::KeyPath::from_exprs(&[$(&$path as &dyn $crate::PathLike),+])
    };
}
