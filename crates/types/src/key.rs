//! Property keys and the coercions that produce them.
//!
//! A [`Key`] is either a textual property name or an opaque [`Symbol`].
//! Textual names cover array indices too: `"0"` addresses the first slot of an
//! array and the `"0"` property of an object alike.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// The largest integer an `f64` represents exactly (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(0);

/// An opaque property key, compared by identity.
///
/// Two symbols are equal only if one is a clone of the other; the description
/// is informational and plays no part in comparisons.
#[derive(Clone)]
pub struct Symbol {
    id: u64,
    description: Option<Arc<str>>,
}

impl Symbol {
    /// Creates a fresh symbol with a description.
    pub fn new(description: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, AtomicOrdering::Relaxed),
            description: Some(description.into()),
        }
    }

    /// Creates a fresh symbol without a description.
    pub fn anonymous() -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, AtomicOrdering::Relaxed),
            description: None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self, self.id)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or_default())
    }
}

/// A single addressing unit of a key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A textual property name, including `""` and index-shaped names like `"0"`.
    Name(String),
    /// An opaque symbolic key. Never produced by parsing text.
    Symbol(Symbol),
}

impl Key {
    /// Returns the textual name, or `None` for a symbol.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Symbol(_) => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Key::Name(_) => None,
            Key::Symbol(symbol) => Some(symbol),
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Key::Symbol(_))
    }

    /// The array index this key denotes, if it is index-shaped.
    pub fn index(&self) -> Option<u64> {
        self.as_str().and_then(parse_index)
    }

    pub fn is_index(&self) -> bool {
        self.index().is_some()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Symbol(symbol) => write!(f, "{}", symbol),
        }
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<Symbol> for Key {
    fn from(symbol: Symbol) -> Self {
        Key::Symbol(symbol)
    }
}

impl From<f64> for Key {
    fn from(number: f64) -> Self {
        Key::Name(number_to_string(number))
    }
}

impl From<bool> for Key {
    fn from(flag: bool) -> Self {
        Key::Name(flag.to_string())
    }
}

macro_rules! key_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(number: $ty) -> Self {
                    Key::Name(number.to_string())
                }
            }

            impl ToPropertyKey for $ty {
                fn to_property_key(&self) -> Key {
                    Key::from(*self)
                }
            }
        )*
    };
}

key_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Returns the index denoted by `name`, if it is the canonical decimal form of
/// an integer in `0..=MAX_SAFE_INTEGER`.
///
/// `"0"` and `"42"` are index-shaped; `"042"`, `"-1"`, `"1.0"` and `""` are not.
pub fn parse_index(name: &str) -> Option<u64> {
    match name.as_bytes() {
        [] => None,
        [b'0'] => Some(0),
        [b'0', ..] => None,
        bytes if bytes.iter().all(u8::is_ascii_digit) => {
            name.parse::<u64>().ok().filter(|index| *index <= MAX_SAFE_INTEGER)
        }
        _ => None,
    }
}

/// True for keys whose text denotes a non-negative integer index.
pub fn is_index_key(key: &Key) -> bool {
    key.is_index()
}

/// Renders a number the way it reads as a property name: integral values lose
/// their fraction, `-0` becomes `"0"`, and magnitudes at or above `1e21` or
/// below `1e-6` use exponent notation (`"1e+21"`, `"1.5e-7"`).
pub fn number_to_string(number: f64) -> String {
    if number.is_nan() {
        "NaN".to_string()
    } else if number.is_infinite() {
        let name = if number > 0.0 { "Infinity" } else { "-Infinity" };
        name.to_string()
    } else if number == 0.0 {
        "0".to_string()
    } else if number.abs() >= 1e21 || number.abs() < 1e-6 {
        exponent_to_string(number)
    } else {
        number.to_string()
    }
}

/// `LowerExp` already yields the shortest round-trip digits; only the sign of
/// a non-negative exponent is missing.
fn exponent_to_string(number: f64) -> String {
    let text = format!("{number:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

/// Coerces a value into a single property key without parsing it.
pub trait ToPropertyKey {
    fn to_property_key(&self) -> Key;
}

impl ToPropertyKey for Key {
    fn to_property_key(&self) -> Key {
        self.clone()
    }
}

impl ToPropertyKey for Symbol {
    fn to_property_key(&self) -> Key {
        Key::Symbol(self.clone())
    }
}

impl ToPropertyKey for str {
    fn to_property_key(&self) -> Key {
        Key::from(self)
    }
}

impl ToPropertyKey for String {
    fn to_property_key(&self) -> Key {
        Key::Name(self.clone())
    }
}

impl ToPropertyKey for f64 {
    fn to_property_key(&self) -> Key {
        Key::from(*self)
    }
}

impl ToPropertyKey for f32 {
    fn to_property_key(&self) -> Key {
        Key::from(f64::from(*self))
    }
}

impl ToPropertyKey for bool {
    fn to_property_key(&self) -> Key {
        Key::from(*self)
    }
}

impl<T: ToPropertyKey + ?Sized> ToPropertyKey for &T {
    fn to_property_key(&self) -> Key {
        (**self).to_property_key()
    }
}
