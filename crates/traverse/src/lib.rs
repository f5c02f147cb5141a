//! Traversal of nested data along key paths.
//!
//! The engine works on any [`Container`]; implementations are provided for
//! [`keypath_types::Value`] and, with the `json` feature, `serde_json::Value`.

pub mod container;
pub mod engine;
pub mod error;
#[cfg(feature = "json")]
mod json;
mod value;

// --- Public API ---
pub use container::{Container, ContainerKind};
pub use engine::{delete, exists, get, has, has_in, set};
pub use error::KeyPathError;
