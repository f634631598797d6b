//! source::classmap
//!
//! Class-map source backed by a generated JSON file.
//!
//! # Design
//!
//! Autoload tooling commonly dumps its class map as a flat JSON object,
//! `{ "Fully\\Qualified\\Name": "relative/path.php", ... }`. This source
//! reads such a file on demand. Document order is preserved, so a catalog
//! scanned from the file iterates classes the way the generator wrote them.
//!
//! Name validation happens during deserialization: a key that is not a
//! valid class name fails the whole load as a parse error.

use std::path::PathBuf;

use super::traits::{ClassSource, SourceError};
use crate::types::ClassMap;

/// A [`ClassSource`] reading a JSON class-map file from disk.
///
/// # Example
///
/// ```no_run
/// use class_catalog::source::{ClassSource, ClassmapFile};
///
/// let source = ClassmapFile::new("vendor/classmap.json");
/// let map = source.class_map()?;
/// # Ok::<(), class_catalog::source::SourceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClassmapFile {
    path: PathBuf,
}

impl ClassmapFile {
    /// Point at a class-map document.
    ///
    /// Nothing is read until [`class_map`] is called.
    ///
    /// [`class_map`]: ClassSource::class_map
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The document path this source reads.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ClassSource for ClassmapFile {
    fn class_map(&self) -> Result<ClassMap, SourceError> {
        let raw = std::fs::read_to_string(&self.path)?;
        let map: ClassMap = serde_json::from_str(&raw)?;
        tracing::debug!(
            path = %self.path.display(),
            classes = map.len(),
            "class map loaded"
        );
        Ok(map)
    }
}
