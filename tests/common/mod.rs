#![allow(dead_code)]

pub mod fixtures;

use keypath::{Key, KeyPath};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a key path of textual keys, bypassing the parser.
pub fn names(keys: &[&str]) -> KeyPath {
    keys.iter().map(|key| Key::from(*key)).collect()
}
