//! source::map
//!
//! Fixed in-memory class-map source.

use super::traits::{ClassSource, SourceError};
use crate::types::{ClassMap, ClassName, NameError, SourcePath};

/// A [`ClassSource`] over a map fixed at construction.
///
/// This is the embedding case (the host application already knows its class
/// map) and the natural test double.
///
/// # Example
///
/// ```
/// use class_catalog::source::{ClassSource, MapSource};
///
/// let source = MapSource::from_pairs([
///     (r"App\User", "app/Models/User.php"),
///     (r"App\Order", "app/Models/Order.php"),
/// ])?;
///
/// let map = source.class_map()?;
/// assert_eq!(map.len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    map: ClassMap,
}

impl MapSource {
    /// Wrap an existing class map.
    pub fn new(map: ClassMap) -> Self {
        Self { map }
    }

    /// Build a source from name/path pairs, validating each name.
    ///
    /// Pair order becomes map order; a repeated name keeps its first
    /// position and takes the last path.
    ///
    /// # Errors
    ///
    /// Returns [`NameError`] for the first invalid class name.
    pub fn from_pairs<K, V, I>(pairs: I) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map = ClassMap::default();
        for (name, path) in pairs {
            let name = ClassName::new(name.as_ref())?;
            map.insert(name, SourcePath::from(path.into()));
        }
        Ok(Self { map })
    }
}

impl ClassSource for MapSource {
    fn class_map(&self) -> Result<ClassMap, SourceError> {
        Ok(self.map.clone())
    }
}
