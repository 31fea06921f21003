//! Scene construction and lookup errors.

use thiserror::Error;

/// Errors from building or looking up a scene.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SceneError {
    /// No scene is registered under this name.
    #[error("unknown scene '{name}'")]
    UnknownScene {
        /// The requested name.
        name: String,
    },
    /// A builder parameter is invalid.
    #[error("invalid scene parameter: {reason}")]
    InvalidParameter {
        /// What went wrong.
        reason: String,
    },
}
