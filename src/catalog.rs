//! catalog
//!
//! Immutable, chainable discovery over a class map.
//!
//! # Architecture
//!
//! A [`ClassCatalog`] is an insertion-ordered map from class name to
//! [`ClassEntry`], plus the introspector every catalog in a chain shares.
//! The pipeline is staged and lazy: a scan seeds path-valued entries,
//! [`namespace`] narrows by literal prefix, [`reflect`] materializes
//! structural handles for the survivors, and the structural predicates
//! filter on those handles. Reflection cost is paid only for classes that
//! make it past the prefix.
//!
//! Every stage takes `&self` and returns a new catalog; a catalog in hand
//! never changes, so intermediate results can be kept and re-filtered
//! freely.
//!
//! [`namespace`]: ClassCatalog::namespace
//! [`reflect`]: ClassCatalog::reflect
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use class_catalog::catalog::ClassCatalog;
//! use class_catalog::reflect::TypeRegistry;
//! use class_catalog::source::MapSource;
//!
//! let registry = TypeRegistry::builder()
//!     .interface(r"App\Contracts\Handler")
//!     .class(r"App\Handlers\Email")
//!     .implements(r"App\Contracts\Handler")
//!     .class(r"App\Handlers\Sms")
//!     .implements(r"App\Contracts\Handler")
//!     .class(r"App\Models\User")
//!     .build()?;
//!
//! let source = MapSource::from_pairs([
//!     (r"App\Handlers\Email", "app/Handlers/Email.php"),
//!     (r"App\Handlers\Sms", "app/Handlers/Sms.php"),
//!     (r"App\Models\User", "app/Models/User.php"),
//! ])?;
//!
//! let handlers = ClassCatalog::scan(&source, Arc::new(registry))?
//!     .namespace(r"App\Handlers", true)?
//!     .implements(r"App\Contracts\Handler")?;
//!
//! assert_eq!(handlers.len(), 2);
//! assert!(handlers.contains(r"App\Handlers\Email"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use crate::reflect::{Introspector, ReflectError, TypeInfo, TypeInfoRef};
use crate::source::{ClassSource, SourceError};
use crate::types::{ClassMap, ClassName, NameError, SourcePath};

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A structural predicate met an entry whose metadata was never
    /// materialized. Call [`ClassCatalog::reflect`] (or filter with
    /// `namespace(prefix, true)`) before structural filtering.
    #[error("structural query on unreflected class `{class}`; reflect the catalog first")]
    Unreflected {
        /// The first entry the predicate could not be applied to
        class: ClassName,
    },

    /// Reflective inspection failed for a class in the catalog.
    #[error("reflection failed: {0}")]
    Reflect(#[from] ReflectError),

    /// The class-map provider failed during a scan.
    #[error("class map unavailable: {0}")]
    Source(#[from] SourceError),

    /// An ancestor argument was not a valid class name.
    #[error("invalid ancestor name: {0}")]
    Name(#[from] NameError),
}

/// The value side of one catalog entry.
///
/// Entries start as the source path reported by the class map and are
/// swapped for structural handles by [`ClassCatalog::reflect`]. The two
/// states are deliberately a tagged union: code cannot ask a structural
/// question without the type system or a checked error pointing out that
/// reflection has not happened.
#[derive(Debug, Clone)]
pub enum ClassEntry {
    /// Known location; structure not yet materialized.
    Unreflected(SourcePath),
    /// Materialized structural handle.
    Reflected(TypeInfoRef),
}

impl ClassEntry {
    /// Whether this entry carries a structural handle.
    pub fn is_reflected(&self) -> bool {
        matches!(self, ClassEntry::Reflected(_))
    }

    /// The source path, if the entry is unreflected.
    pub fn source_path(&self) -> Option<&SourcePath> {
        match self {
            ClassEntry::Unreflected(path) => Some(path),
            ClassEntry::Reflected(_) => None,
        }
    }

    /// The structural handle, if the entry is reflected.
    pub fn type_info(&self) -> Option<&TypeInfoRef> {
        match self {
            ClassEntry::Unreflected(_) => None,
            ClassEntry::Reflected(info) => Some(info),
        }
    }
}

impl PartialEq for ClassEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ClassEntry::Unreflected(a), ClassEntry::Unreflected(b)) => a == b,
            (ClassEntry::Reflected(a), ClassEntry::Reflected(b)) => {
                // Handles are equal only when they are the same handle.
                // Compare data pointers; vtable pointers are not stable
                // across codegen units.
                std::ptr::eq(Arc::as_ptr(a) as *const u8, Arc::as_ptr(b) as *const u8)
            }
            _ => false,
        }
    }
}

impl fmt::Display for ClassEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassEntry::Unreflected(path) => write!(f, "{path}"),
            ClassEntry::Reflected(info) => {
                let kind = if info.is_trait() {
                    "trait"
                } else if info.is_interface() {
                    "interface"
                } else if info.is_instantiable() {
                    "class"
                } else {
                    "abstract class"
                };
                write!(f, "{kind} {}", info.name())
            }
        }
    }
}

/// One structural question, ready to put to a handle.
#[derive(Debug, Clone)]
enum StructuralQuery {
    Instantiable,
    Trait,
    Interface,
    SubclassOf(ClassName),
}

impl StructuralQuery {
    fn answer(&self, info: &dyn TypeInfo) -> bool {
        match self {
            StructuralQuery::Instantiable => info.is_instantiable(),
            StructuralQuery::Trait => info.is_trait(),
            StructuralQuery::Interface => info.is_interface(),
            StructuralQuery::SubclassOf(ancestor) => info.is_subclass_of(ancestor),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            StructuralQuery::Instantiable => "instantiable",
            StructuralQuery::Trait => "trait",
            StructuralQuery::Interface => "interface",
            StructuralQuery::SubclassOf(_) => "subclass-of",
        }
    }
}

/// Immutable, chainable catalog of classes.
///
/// See the [module documentation](self) for the pipeline shape. Cloning is
/// shallow for reflected entries (handles are shared) and cheap relative to
/// re-running discovery.
#[derive(Debug, Clone)]
pub struct ClassCatalog {
    entries: IndexMap<ClassName, ClassEntry>,
    introspector: Arc<dyn Introspector>,
}

impl ClassCatalog {
    /// Seed a catalog from a class-map provider.
    ///
    /// The provider is consulted exactly once; the catalog never refreshes.
    /// Every entry starts unreflected. An empty map from the provider is a
    /// valid (empty) catalog, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Source`] if the provider fails.
    pub fn scan(
        source: &dyn ClassSource,
        introspector: Arc<dyn Introspector>,
    ) -> Result<Self, CatalogError> {
        let map = source.class_map()?;
        tracing::debug!(classes = map.len(), "catalog scanned");
        Ok(Self::with_entries(map, introspector))
    }

    /// Build a catalog from entries already in hand.
    ///
    /// No source is consulted; an explicitly empty map stays empty. This is
    /// the constructor for embedders that assemble their own class map.
    pub fn with_entries(entries: ClassMap, introspector: Arc<dyn Introspector>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(name, path)| (name, ClassEntry::Unreflected(path)))
            .collect();
        Self {
            entries,
            introspector,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a class is in the catalog.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Look up a single entry by name.
    pub fn get(&self, name: &str) -> Option<&ClassEntry> {
        self.entries.get(name)
    }

    /// Iterate entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&ClassName, &ClassEntry)> {
        self.entries.iter()
    }

    /// Iterate class names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &ClassName> {
        self.entries.keys()
    }

    /// Keep entries whose class name starts with `prefix`, optionally
    /// reflecting the survivors.
    ///
    /// Matching is literal and ordinal: no separator awareness, no case
    /// folding. `r"App\User"` also matches `r"App\UserProfile"`; callers
    /// that want a namespace boundary include the trailing separator in the
    /// prefix. The empty prefix keeps everything.
    ///
    /// With `should_reflect`, the filtered catalog is reflected before it is
    /// returned, so the common discovery path hands back handle-valued
    /// entries ready for structural filtering.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Reflect`] only when `should_reflect` is set
    /// and a surviving class fails inspection.
    pub fn namespace(&self, prefix: &str, should_reflect: bool) -> Result<Self, CatalogError> {
        let entries: IndexMap<ClassName, ClassEntry> = self
            .entries
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, entry)| (name.clone(), entry.clone()))
            .collect();
        tracing::debug!(
            prefix,
            kept = entries.len(),
            from = self.entries.len(),
            "namespace filter"
        );

        let filtered = Self {
            entries,
            introspector: Arc::clone(&self.introspector),
        };
        if should_reflect {
            filtered.reflect(true)
        } else {
            Ok(filtered)
        }
    }

    /// Materialize structural handles for every entry.
    ///
    /// With `should_reflect` unset this is a no-op that returns an
    /// equivalent catalog and never touches the introspector.
    ///
    /// Otherwise every entry's value is replaced by a fresh inspection of
    /// its name. Path values are discarded; entries that already carry a
    /// handle are re-inspected too. Reflection is all-or-nothing: the first
    /// failure aborts the call and no partially-reflected catalog exists.
    /// The receiver is untouched either way and remains usable after a
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Reflect`] for the first class the
    /// introspector cannot resolve.
    pub fn reflect(&self, should_reflect: bool) -> Result<Self, CatalogError> {
        if !should_reflect {
            return Ok(self.clone());
        }

        let mut entries = IndexMap::with_capacity(self.entries.len());
        for name in self.entries.keys() {
            let info = self.introspector.inspect(name)?;
            tracing::trace!(class = %name, "reflected");
            entries.insert(name.clone(), ClassEntry::Reflected(info));
        }
        tracing::debug!(classes = entries.len(), "catalog reflected");

        Ok(Self {
            entries,
            introspector: Arc::clone(&self.introspector),
        })
    }

    /// Keep classes that derive from or realize `ancestor`.
    ///
    /// The ancestor itself is excluded: a class is not its own subclass.
    /// An ancestor name absent from every hierarchy yields an empty catalog,
    /// not an error.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Name`] for an invalid ancestor name;
    /// [`CatalogError::Unreflected`] if any entry has no handle.
    pub fn is_subclass_of(&self, ancestor: &str) -> Result<Self, CatalogError> {
        let ancestor = ClassName::new(ancestor)?;
        self.quick_filter(StructuralQuery::SubclassOf(ancestor))
    }

    /// Keep classes that derive from `ancestor`.
    ///
    /// Alias of [`is_subclass_of`]: the inspection capability does not
    /// distinguish extension from realization, so the two spellings return
    /// identical results.
    ///
    /// [`is_subclass_of`]: ClassCatalog::is_subclass_of
    pub fn extends(&self, ancestor: &str) -> Result<Self, CatalogError> {
        self.is_subclass_of(ancestor)
    }

    /// Keep classes that realize `contract`.
    ///
    /// Alias of [`is_subclass_of`], same as [`extends`].
    ///
    /// [`is_subclass_of`]: ClassCatalog::is_subclass_of
    /// [`extends`]: ClassCatalog::extends
    pub fn implements(&self, contract: &str) -> Result<Self, CatalogError> {
        self.is_subclass_of(contract)
    }

    /// Keep concretely instantiable classes.
    ///
    /// Abstract classes, interfaces, and traits are dropped.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Unreflected`] if any entry has no handle.
    pub fn is_normal(&self) -> Result<Self, CatalogError> {
        self.quick_filter(StructuralQuery::Instantiable)
    }

    /// Keep trait/mixin constructs.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Unreflected`] if any entry has no handle.
    pub fn is_trait(&self) -> Result<Self, CatalogError> {
        self.quick_filter(StructuralQuery::Trait)
    }

    /// Keep interfaces.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Unreflected`] if any entry has no handle.
    pub fn is_interface(&self) -> Result<Self, CatalogError> {
        self.quick_filter(StructuralQuery::Interface)
    }

    /// Keep entries the predicate approves. Order is preserved; the
    /// receiver is untouched.
    pub fn filter<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&ClassName, &ClassEntry) -> bool,
    {
        let entries = self
            .entries
            .iter()
            .filter(|(name, entry)| pred(name, entry))
            .map(|(name, entry)| (name.clone(), entry.clone()))
            .collect();
        Self {
            entries,
            introspector: Arc::clone(&self.introspector),
        }
    }

    /// Replace each entry's value, keeping keys and order.
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&ClassName, &ClassEntry) -> ClassEntry,
    {
        let entries = self
            .entries
            .iter()
            .map(|(name, entry)| (name.clone(), f(name, entry)))
            .collect();
        Self {
            entries,
            introspector: Arc::clone(&self.introspector),
        }
    }

    /// Evaluate one structural query against every entry's handle.
    ///
    /// Errors out on the first unreflected entry even if the query would
    /// have dropped it; predicates are simply not defined on paths.
    fn quick_filter(&self, query: StructuralQuery) -> Result<Self, CatalogError> {
        let mut entries = IndexMap::new();
        for (name, entry) in &self.entries {
            let ClassEntry::Reflected(info) = entry else {
                return Err(CatalogError::Unreflected {
                    class: name.clone(),
                });
            };
            if query.answer(info.as_ref()) {
                entries.insert(name.clone(), entry.clone());
            }
        }
        tracing::debug!(
            query = query.label(),
            kept = entries.len(),
            from = self.entries.len(),
            "structural filter"
        );

        Ok(Self {
            entries,
            introspector: Arc::clone(&self.introspector),
        })
    }
}

/// Order-sensitive entry equality. The introspector is identity, not state,
/// and does not participate.
impl PartialEq for ClassCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|(a, b)| a == b)
    }
}

impl fmt::Display for ClassCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, entry) in &self.entries {
            writeln!(f, "{name} => {entry}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ClassCatalog {
    type Item = (&'a ClassName, &'a ClassEntry);
    type IntoIter = indexmap::map::Iter<'a, ClassName, ClassEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for ClassCatalog {
    type Item = (ClassName, ClassEntry);
    type IntoIter = indexmap::map::IntoIter<ClassName, ClassEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::mock::{FailOn, MockIntrospector, MockTypeInfo};
    use crate::source::MapSource;

    fn name(s: &str) -> ClassName {
        ClassName::new(s).unwrap()
    }

    fn app_introspector() -> MockIntrospector {
        MockIntrospector::with_types(vec![
            MockTypeInfo::class(r"App\User").with_ancestor(r"App\Model"),
            MockTypeInfo::class(r"App\UserProfile").with_ancestor(r"App\Model"),
            MockTypeInfo::abstract_class(r"App\Model"),
            MockTypeInfo::interface(r"App\Jsonable"),
            MockTypeInfo::trait_(r"App\Sluggable"),
            MockTypeInfo::class(r"Vendor\Client"),
        ])
    }

    fn app_catalog(introspector: &MockIntrospector) -> ClassCatalog {
        let source = MapSource::from_pairs([
            (r"App\User", "app/User.php"),
            (r"App\UserProfile", "app/UserProfile.php"),
            (r"App\Model", "app/Model.php"),
            (r"App\Jsonable", "app/Jsonable.php"),
            (r"App\Sluggable", "app/Sluggable.php"),
            (r"Vendor\Client", "vendor/Client.php"),
        ])
        .unwrap();
        ClassCatalog::scan(&source, Arc::new(introspector.clone())).unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn scan_seeds_unreflected_entries_in_source_order() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector);

            assert_eq!(catalog.len(), 6);
            let names: Vec<&str> = catalog.names().map(|n| n.as_str()).collect();
            assert_eq!(
                names,
                vec![
                    r"App\User",
                    r"App\UserProfile",
                    r"App\Model",
                    r"App\Jsonable",
                    r"App\Sluggable",
                    r"Vendor\Client",
                ]
            );
            assert!(catalog.iter().all(|(_, entry)| !entry.is_reflected()));
            // Seeding is lazy: nothing was inspected.
            assert_eq!(introspector.call_count(), 0);
        }

        #[test]
        fn scan_surfaces_source_failure() {
            #[derive(Debug)]
            struct BrokenSource;
            impl crate::source::ClassSource for BrokenSource {
                fn class_map(&self) -> Result<ClassMap, SourceError> {
                    Err(SourceError::Provider("loader not booted".into()))
                }
            }

            let err = ClassCatalog::scan(&BrokenSource, Arc::new(MockIntrospector::new()))
                .unwrap_err();
            assert!(matches!(err, CatalogError::Source(_)));
        }

        #[test]
        fn with_entries_accepts_an_empty_map() {
            let catalog =
                ClassCatalog::with_entries(ClassMap::default(), Arc::new(MockIntrospector::new()));
            assert!(catalog.is_empty());
        }

        #[test]
        fn with_entries_never_consults_a_source() {
            let mut map = ClassMap::default();
            map.insert(name(r"App\User"), SourcePath::from("app/User.php"));

            let catalog = ClassCatalog::with_entries(map, Arc::new(MockIntrospector::new()));
            assert_eq!(catalog.len(), 1);
            assert_eq!(
                catalog.get(r"App\User"),
                Some(&ClassEntry::Unreflected(SourcePath::from("app/User.php")))
            );
        }
    }

    mod namespace {
        use super::*;

        #[test]
        fn keeps_only_matching_prefixes_in_order() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector);

            let app = catalog.namespace(r"App\", false).unwrap();
            assert_eq!(app.len(), 5);
            assert!(!app.contains(r"Vendor\Client"));

            let names: Vec<&str> = app.names().map(|n| n.as_str()).collect();
            assert_eq!(
                names,
                vec![
                    r"App\User",
                    r"App\UserProfile",
                    r"App\Model",
                    r"App\Jsonable",
                    r"App\Sluggable",
                ]
            );
        }

        #[test]
        fn matching_is_literal_not_namespace_aware() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector);

            // No trailing separator: the name itself is a matching prefix
            // of a longer sibling.
            let users = catalog.namespace(r"App\User", false).unwrap();
            let names: Vec<&str> = users.names().map(|n| n.as_str()).collect();
            assert_eq!(names, vec![r"App\User", r"App\UserProfile"]);
        }

        #[test]
        fn empty_prefix_keeps_everything() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector);

            let all = catalog.namespace("", false).unwrap();
            assert_eq!(all.len(), catalog.len());
        }

        #[test]
        fn unmatched_prefix_yields_empty_catalog() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector);

            let none = catalog.namespace(r"Acme\", false).unwrap();
            assert!(none.is_empty());
        }

        #[test]
        fn without_reflection_no_inspection_happens() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector);

            let _ = catalog.namespace(r"App\", false).unwrap();
            assert_eq!(introspector.call_count(), 0);
        }

        #[test]
        fn with_reflection_only_survivors_are_inspected() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector);

            let users = catalog.namespace(r"App\User", true).unwrap();
            assert!(users.iter().all(|(_, entry)| entry.is_reflected()));
            assert_eq!(
                introspector.calls(),
                vec![name(r"App\User"), name(r"App\UserProfile")]
            );
        }

        #[test]
        fn receiver_is_untouched() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector);
            let before: Vec<ClassName> = catalog.names().cloned().collect();

            let _ = catalog.namespace(r"App\User", true).unwrap();

            let after: Vec<ClassName> = catalog.names().cloned().collect();
            assert_eq!(before, after);
            assert!(catalog.iter().all(|(_, entry)| !entry.is_reflected()));
        }
    }

    mod reflect {
        use super::*;

        #[test]
        fn reflect_false_returns_an_equal_catalog_without_inspection() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector);

            let same = catalog.reflect(false).unwrap();
            assert_eq!(same, catalog);
            assert_eq!(introspector.call_count(), 0);
        }

        #[test]
        fn reflect_true_materializes_every_entry() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector);

            let reflected = catalog.reflect(true).unwrap();
            assert_eq!(reflected.len(), catalog.len());
            assert!(reflected.iter().all(|(_, entry)| entry.is_reflected()));

            // Order survives the value swap.
            let names: Vec<&str> = reflected.names().map(|n| n.as_str()).collect();
            let original: Vec<&str> = catalog.names().map(|n| n.as_str()).collect();
            assert_eq!(names, original);
        }

        #[test]
        fn reflect_true_re_inspects_reflected_entries() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector).reflect(true).unwrap();
            introspector.clear_calls();

            let again = catalog.reflect(true).unwrap();
            assert_eq!(introspector.call_count(), again.len());
        }

        #[test]
        fn first_failure_aborts_with_no_partial_catalog() {
            let introspector = app_introspector().fail_on(FailOn::Class(
                name(r"App\Model"),
                "include failed".into(),
            ));
            let catalog = app_catalog(&introspector);

            let err = catalog.reflect(true).unwrap_err();
            match err {
                CatalogError::Reflect(reflect_err) => {
                    assert_eq!(reflect_err.class(), &name(r"App\Model"));
                }
                other => panic!("unexpected error: {other:?}"),
            }

            // Inspection stopped at the failing class.
            assert_eq!(
                introspector.calls(),
                vec![name(r"App\User"), name(r"App\UserProfile"), name(r"App\Model")]
            );

            // The receiver is still fully usable.
            assert_eq!(catalog.len(), 6);
            introspector.clear_fail_on();
            assert!(catalog.reflect(true).is_ok());
        }

        #[test]
        fn unknown_class_fails_reflection() {
            let source = MapSource::from_pairs([(r"App\Ghost", "app/Ghost.php")]).unwrap();
            let catalog =
                ClassCatalog::scan(&source, Arc::new(MockIntrospector::new())).unwrap();

            let err = catalog.reflect(true).unwrap_err();
            assert!(matches!(
                err,
                CatalogError::Reflect(ReflectError::NotFound { .. })
            ));
        }

        #[test]
        fn empty_catalog_reflects_to_empty() {
            let catalog =
                ClassCatalog::with_entries(ClassMap::default(), Arc::new(app_introspector()));
            assert!(catalog.reflect(true).unwrap().is_empty());
        }
    }

    mod predicates {
        use super::*;

        fn reflected_app(introspector: &MockIntrospector) -> ClassCatalog {
            app_catalog(introspector)
                .namespace(r"App\", true)
                .unwrap()
        }

        #[test]
        fn predicate_on_unreflected_entry_is_a_checked_error() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector);

            let err = catalog.is_normal().unwrap_err();
            match err {
                CatalogError::Unreflected { class } => assert_eq!(class, name(r"App\User")),
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn error_names_the_first_unreflected_entry_even_mid_catalog() {
            let introspector = app_introspector();
            let reflected = reflected_app(&introspector);

            // Re-install a path value in the middle of the catalog.
            let mixed = reflected.map(|class, entry| {
                if class.as_str() == r"App\Model" {
                    ClassEntry::Unreflected(SourcePath::from("app/Model.php"))
                } else {
                    entry.clone()
                }
            });

            let err = mixed.is_normal().unwrap_err();
            assert!(
                matches!(err, CatalogError::Unreflected { class } if class == name(r"App\Model"))
            );
        }

        #[test]
        fn is_normal_keeps_concrete_classes_only() {
            let introspector = app_introspector();
            let normal = reflected_app(&introspector).is_normal().unwrap();

            let names: Vec<&str> = normal.names().map(|n| n.as_str()).collect();
            assert_eq!(names, vec![r"App\User", r"App\UserProfile"]);
        }

        #[test]
        fn is_trait_keeps_traits_only() {
            let introspector = app_introspector();
            let traits = reflected_app(&introspector).is_trait().unwrap();

            let names: Vec<&str> = traits.names().map(|n| n.as_str()).collect();
            assert_eq!(names, vec![r"App\Sluggable"]);
        }

        #[test]
        fn is_interface_keeps_interfaces_only() {
            let introspector = app_introspector();
            let interfaces = reflected_app(&introspector).is_interface().unwrap();

            let names: Vec<&str> = interfaces.names().map(|n| n.as_str()).collect();
            assert_eq!(names, vec![r"App\Jsonable"]);
        }

        #[test]
        fn is_subclass_of_excludes_the_ancestor_itself() {
            let introspector = app_introspector();
            let models = reflected_app(&introspector)
                .is_subclass_of(r"App\Model")
                .unwrap();

            let names: Vec<&str> = models.names().map(|n| n.as_str()).collect();
            assert_eq!(names, vec![r"App\User", r"App\UserProfile"]);
            assert!(!models.contains(r"App\Model"));
        }

        #[test]
        fn unknown_ancestor_yields_empty_not_error() {
            let introspector = app_introspector();
            let none = reflected_app(&introspector)
                .is_subclass_of(r"Acme\Nothing")
                .unwrap();
            assert!(none.is_empty());
        }

        #[test]
        fn aliases_agree_with_is_subclass_of() {
            let introspector = app_introspector();
            let reflected = reflected_app(&introspector);

            let direct = reflected.is_subclass_of(r"App\Model").unwrap();
            let extended = reflected.extends(r"App\Model").unwrap();
            let implemented = reflected.implements(r"App\Model").unwrap();

            assert_eq!(direct, extended);
            assert_eq!(direct, implemented);
        }

        #[test]
        fn invalid_ancestor_name_is_rejected() {
            let introspector = app_introspector();
            let err = reflected_app(&introspector).is_subclass_of("").unwrap_err();
            assert!(matches!(err, CatalogError::Name(_)));
        }

        #[test]
        fn predicates_on_empty_catalog_are_fine() {
            let catalog =
                ClassCatalog::with_entries(ClassMap::default(), Arc::new(app_introspector()));
            assert!(catalog.is_normal().unwrap().is_empty());
            assert!(catalog.is_subclass_of(r"App\Model").unwrap().is_empty());
        }

        #[test]
        fn chains_compose() {
            let introspector = app_introspector();
            let survivors = app_catalog(&introspector)
                .namespace(r"App\", true)
                .unwrap()
                .is_subclass_of(r"App\Model")
                .unwrap()
                .is_normal()
                .unwrap();

            let names: Vec<&str> = survivors.names().map(|n| n.as_str()).collect();
            assert_eq!(names, vec![r"App\User", r"App\UserProfile"]);
        }
    }

    mod collection {
        use super::*;

        #[test]
        fn filter_is_pure_and_order_preserving() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector);

            let users = catalog.filter(|class, _| class.as_str().contains("User"));
            let names: Vec<&str> = users.names().map(|n| n.as_str()).collect();
            assert_eq!(names, vec![r"App\User", r"App\UserProfile"]);
            assert_eq!(catalog.len(), 6);
        }

        #[test]
        fn map_replaces_values_keeping_keys() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector);

            let rewritten =
                catalog.map(|_, _| ClassEntry::Unreflected(SourcePath::from("elsewhere.php")));
            assert_eq!(rewritten.len(), catalog.len());
            assert!(rewritten
                .iter()
                .all(|(_, entry)| entry.source_path().map(|p| p.as_str()) == Some("elsewhere.php")));
        }

        #[test]
        fn entry_equality_is_path_or_handle_identity() {
            let introspector = app_introspector();
            let reflected = app_catalog(&introspector).reflect(true).unwrap();

            let a = reflected.get(r"App\User").unwrap();
            let b = reflected.get(r"App\User").unwrap();
            assert_eq!(a, b);

            let other = reflected.get(r"App\UserProfile").unwrap();
            assert_ne!(a, other);

            let path_a = ClassEntry::Unreflected(SourcePath::from("a.php"));
            let path_b = ClassEntry::Unreflected(SourcePath::from("a.php"));
            assert_eq!(path_a, path_b);
            assert_ne!(path_a, ClassEntry::Unreflected(SourcePath::from("b.php")));
            assert_ne!(&path_a, a);
        }

        #[test]
        fn display_renders_one_line_per_entry() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector)
                .namespace(r"App\User", false)
                .unwrap();

            let rendered = catalog.to_string();
            assert_eq!(
                rendered,
                "App\\User => app/User.php\nApp\\UserProfile => app/UserProfile.php\n"
            );
        }

        #[test]
        fn display_shows_kind_for_reflected_entries() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector)
                .namespace(r"App\", true)
                .unwrap();

            let rendered = catalog.to_string();
            assert!(rendered.contains(r"App\User => class App\User"));
            assert!(rendered.contains(r"App\Model => abstract class App\Model"));
            assert!(rendered.contains(r"App\Jsonable => interface App\Jsonable"));
            assert!(rendered.contains(r"App\Sluggable => trait App\Sluggable"));
        }

        #[test]
        fn borrowing_iteration_is_restartable() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector);

            let first: Vec<&ClassName> = (&catalog).into_iter().map(|(n, _)| n).collect();
            let second: Vec<&ClassName> = (&catalog).into_iter().map(|(n, _)| n).collect();
            assert_eq!(first, second);
            assert_eq!(first.len(), 6);
        }

        #[test]
        fn owned_iteration_consumes_in_order() {
            let introspector = app_introspector();
            let catalog = app_catalog(&introspector);

            let names: Vec<String> = catalog.into_iter().map(|(n, _)| n.into()).collect();
            assert_eq!(names[0], r"App\User");
            assert_eq!(names.len(), 6);
        }
    }
}
