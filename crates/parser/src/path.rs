//! Path expressions and their normalization into key sequences.
use crate::parser::parse;
use keypath_types::{Key, Symbol, ToPropertyKey};
use std::borrow::Cow;

/// Anything a key sequence can be derived from.
///
/// - text is parsed (`"a.b[0]"` → `a`, `b`, `0`);
/// - a scalar key is coerced to a property key, then parsed unless it is a
///   symbol (`Key::from("a.b")` → `a`, `b`; `1.5` → `1`, `5`);
/// - a sequence has each element coerced to a key, without parsing
///   (`["a.b", "c"]` → `a.b`, `c`);
/// - a [`KeyPath`](crate::KeyPath) contributes its keys as they are.
pub trait PathLike {
    /// Appends this expression's keys to `out`.
    fn append_keys(&self, out: &mut Vec<Key>);

    /// The key sequence for this expression, borrowed when it is already resolved.
    fn resolve(&self) -> Cow<'_, [Key]> {
        let mut keys = Vec::new();
        self.append_keys(&mut keys);
        Cow::Owned(keys)
    }
}

/// Normalizes one path expression into an owned key sequence.
pub fn to_path<P: PathLike + ?Sized>(path: &P) -> Vec<Key> {
    path.resolve().into_owned()
}

/// Concatenates the key sequences of several path expressions, left to right.
pub fn to_path_all(paths: &[&dyn PathLike]) -> Vec<Key> {
    let mut keys = Vec::new();
    for path in paths {
        path.append_keys(&mut keys);
    }
    keys
}

impl PathLike for str {
    fn append_keys(&self, out: &mut Vec<Key>) {
        out.extend(parse(self));
    }
}

impl PathLike for String {
    fn append_keys(&self, out: &mut Vec<Key>) {
        self.as_str().append_keys(out);
    }
}

impl PathLike for Key {
    fn append_keys(&self, out: &mut Vec<Key>) {
        match self {
            Key::Name(name) => name.append_keys(out),
            Key::Symbol(_) => out.push(self.clone()),
        }
    }
}

impl PathLike for Symbol {
    fn append_keys(&self, out: &mut Vec<Key>) {
        out.push(Key::Symbol(self.clone()));
    }
}

macro_rules! scalar_path {
    ($($ty:ty),*) => {
        $(
            impl PathLike for $ty {
                fn append_keys(&self, out: &mut Vec<Key>) {
                    self.to_property_key().append_keys(out);
                }
            }
        )*
    };
}

scalar_path!(bool, f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<K: ToPropertyKey> PathLike for [K] {
    fn append_keys(&self, out: &mut Vec<Key>) {
        out.extend(self.iter().map(ToPropertyKey::to_property_key));
    }
}

impl<K: ToPropertyKey, const N: usize> PathLike for [K; N] {
    fn append_keys(&self, out: &mut Vec<Key>) {
        self.as_slice().append_keys(out);
    }
}

impl<K: ToPropertyKey> PathLike for Vec<K> {
    fn append_keys(&self, out: &mut Vec<Key>) {
        self.as_slice().append_keys(out);
    }
}

impl<T: PathLike + ?Sized> PathLike for &T {
    fn append_keys(&self, out: &mut Vec<Key>) {
        (**self).append_keys(out);
    }

    fn resolve(&self) -> Cow<'_, [Key]> {
        (**self).resolve()
    }
}
