//! source::traits
//!
//! Class-map provider seam.
//!
//! # Design
//!
//! A [`ClassSource`] hands out the complete class-name→source-path map a
//! catalog is seeded from. The catalog calls it exactly once per scan and
//! never refreshes; a source that can change over time still only gets one
//! chance per catalog to say what exists.

use thiserror::Error;

use crate::types::ClassMap;

/// Errors a class-map provider can surface.
#[derive(Debug, Error)]
pub enum SourceError {
    /// I/O failure while reading the backing store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing document did not parse as a class map.
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider-specific failure.
    #[error("class map provider failed: {0}")]
    Provider(String),
}

/// Provider of a complete class map snapshot.
pub trait ClassSource: std::fmt::Debug {
    /// Produce the full class-name→source-path map.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the map cannot be produced; there is no
    /// notion of a partial map.
    fn class_map(&self) -> Result<ClassMap, SourceError>;
}
