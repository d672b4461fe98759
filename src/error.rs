//! Error type shared by the fallible parts of the module.
//!
//! Systems never panic on these: they log through `log` and skip the
//! offending entity or keep their defaults.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DefenceError {
    /// The INI file could not be read, parsed or written.
    #[error("config file {path}: {reason}")]
    Config { path: String, reason: String },

    /// The field dimensions do not describe a usable dome.
    #[error("invalid field geometry: {0}")]
    InvalidGeometry(String),

    /// A selection method needed a component the candidate does not carry.
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        entity: String,
        component: &'static str,
    },

    /// Scenario JSON could not be loaded.
    #[error("scenario: {0}")]
    Scenario(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
