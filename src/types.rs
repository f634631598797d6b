//! types
//!
//! Strong types for class-map entries.
//!
//! # Types
//!
//! - [`ClassName`] - Validated fully-qualified class name
//! - [`SourcePath`] - Opaque source location reported by a loader
//! - [`ClassMap`] - Insertion-ordered mapping from name to source location
//!
//! # Validation
//!
//! [`ClassName`] enforces validity at construction time: a name must be
//! non-empty and free of control characters. Everything else (separators,
//! casing, segment structure) is deliberately uninterpreted, because loaders
//! disagree about all of it and this crate only ever compares names as
//! literal strings.
//!
//! # Examples
//!
//! ```
//! use class_catalog::types::{ClassName, SourcePath};
//!
//! let name = ClassName::new(r"App\Models\User").unwrap();
//! assert_eq!(name.as_str(), r"App\Models\User");
//! assert!(name.starts_with(r"App\Models"));
//!
//! // Invalid constructions fail at creation time
//! assert!(ClassName::new("").is_err());
//! assert!(ClassName::new("App\tUser").is_err());
//!
//! // Paths are opaque and never validated
//! let path = SourcePath::from("src/Models/User.php");
//! assert_eq!(path.as_str(), "src/Models/User.php");
//! ```

use std::borrow::Borrow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("invalid class name: {0}")]
    InvalidClassName(String),
}

/// A validated fully-qualified class name.
///
/// Names are compared, hashed, and prefix-tested as literal strings. The
/// namespace separator (`\`, `::`, `.`, ...) is whatever the producing
/// loader uses; this crate attaches no meaning to it.
///
/// # Example
///
/// ```
/// use class_catalog::types::ClassName;
///
/// let name = ClassName::new(r"App\User").unwrap();
/// assert_eq!(name.as_str(), r"App\User");
///
/// // Prefix tests are ordinal and case-sensitive
/// assert!(name.starts_with("App"));
/// assert!(!name.starts_with("app"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName(String);

impl ClassName {
    /// Create a new validated class name.
    ///
    /// # Errors
    ///
    /// Returns `NameError::InvalidClassName` if the name is empty or
    /// contains control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// Validate a class name.
    fn validate(name: &str) -> Result<(), NameError> {
        if name.is_empty() {
            return Err(NameError::InvalidClassName(
                "class name cannot be empty".into(),
            ));
        }

        // Control characters (0x00-0x1F, 0x7F) never appear in loader output
        // and usually indicate a mangled classmap.
        if name.chars().any(|c| c.is_control()) {
            return Err(NameError::InvalidClassName(
                "class name cannot contain control characters".into(),
            ));
        }

        Ok(())
    }

    /// Literal, case-sensitive prefix test.
    ///
    /// No segment-boundary awareness: `"App\User"` is a prefix of
    /// `"App\UserProfile"`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Get the class name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClassName {
    type Error = NameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ClassName {
    type Error = NameError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ClassName> for String {
    fn from(name: ClassName) -> Self {
        name.0
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets maps keyed by ClassName answer `&str` lookups.
impl Borrow<str> for ClassName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClassName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque source location for a class, as reported by a loader.
///
/// The catalog carries these verbatim and never interprets them; they are
/// usually file paths but nothing here requires that.
///
/// # Example
///
/// ```
/// use class_catalog::types::SourcePath;
///
/// let path = SourcePath::from("vendor/acme/src/Widget.php");
/// assert_eq!(path.as_str(), "vendor/acme/src/Widget.php");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourcePath(String);

impl SourcePath {
    /// Get the source location as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SourcePath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&str> for SourcePath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<SourcePath> for String {
    fn from(path: SourcePath) -> Self {
        path.0
    }
}

impl AsRef<str> for SourcePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An insertion-ordered mapping from class name to source location.
///
/// Iteration order is the producing loader's reported order. Map semantics:
/// keys are unique, and on duplicate insertion the last value wins, matching
/// the array semantics of the loaders that emit these maps.
pub type ClassMap = IndexMap<ClassName, SourcePath>;
