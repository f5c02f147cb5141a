use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyPathError {
    /// The target violates the operation's precondition.
    #[error("Invalid target: {0}")]
    InvalidTarget(String),
}

impl KeyPathError {
    pub(crate) fn nullish_target() -> Self {
        KeyPathError::InvalidTarget("the target cannot be undefined or null".to_string())
    }

    pub(crate) fn primitive_target() -> Self {
        KeyPathError::InvalidTarget("the target must be an object".to_string())
    }
}
