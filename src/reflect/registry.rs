//! reflect::registry
//!
//! In-memory type-metadata table implementing [`Introspector`].
//!
//! # Architecture
//!
//! The registry is the classic id-indexed table: definitions live in a
//! `Vec<TypeDef>` and a name→id map answers lookups. It is built once
//! through [`TypeRegistryBuilder`] and immutable afterwards; the definition
//! storage sits behind an `Arc` so handles stay valid for as long as anyone
//! holds them, independent of the registry value itself.
//!
//! Ancestry is resolved by a breadth-first walk over `extends` and
//! `implements` edges. Edges are stored and compared **by name**: a target
//! that was never registered still matches literally but is not expanded
//! further. A type is never an ancestor of itself; the builder rejects
//! inheritance cycles so that guarantee cannot be subverted.
//!
//! # Example
//!
//! ```
//! use class_catalog::reflect::{Introspector, TypeRegistry};
//! use class_catalog::types::ClassName;
//!
//! let registry = TypeRegistry::builder()
//!     .interface(r"App\Contract")
//!     .class(r"App\User")
//!     .implements(r"App\Contract")
//!     .build()
//!     .unwrap();
//!
//! let user = ClassName::new(r"App\User").unwrap();
//! let info = registry.inspect(&user).unwrap();
//! assert!(info.is_instantiable());
//! assert!(info.is_subclass_of(&ClassName::new(r"App\Contract").unwrap()));
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use super::traits::{Introspector, ReflectError, TypeInfo, TypeInfoRef};
use crate::types::{ClassName, NameError};

/// Errors from registry construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The same name was declared twice.
    #[error("duplicate type definition: {0}")]
    Duplicate(ClassName),

    /// `extends`/`implements` was called before any type was declared.
    #[error("`{relation}` must follow a type declaration")]
    NoSubject {
        /// The relation that had no subject
        relation: &'static str,
    },

    /// A class declared a second parent.
    #[error("class `{class}` already extends `{existing}`")]
    SecondParent {
        /// The class with two parents
        class: ClassName,
        /// The parent already on record
        existing: ClassName,
    },

    /// The relation is not valid for the subject's kind.
    #[error("`{class}` is a {kind} and cannot use `{relation}`")]
    BadRelation {
        /// The subject of the relation
        class: ClassName,
        /// The subject's kind
        kind: TypeKind,
        /// The rejected relation
        relation: &'static str,
    },

    /// The declared edges form an inheritance cycle.
    #[error("inheritance cycle detected at `{0}`")]
    Cycle(ClassName),

    /// A name passed to the builder failed validation.
    #[error(transparent)]
    Name(#[from] NameError),
}

/// What kind of type a definition declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Concrete, directly constructible class
    Class,
    /// Class that cannot be constructed directly
    AbstractClass,
    /// Interface
    Interface,
    /// Trait/mixin construct
    Trait,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TypeKind::Class => "class",
            TypeKind::AbstractClass => "abstract class",
            TypeKind::Interface => "interface",
            TypeKind::Trait => "trait",
        };
        write!(f, "{label}")
    }
}

/// One registered definition.
#[derive(Debug)]
struct TypeDef {
    name: ClassName,
    kind: TypeKind,
    /// `extends` targets: at most one for classes, any number for interfaces.
    parents: Vec<ClassName>,
    /// `implements` targets: classes only.
    interfaces: Vec<ClassName>,
}

/// Definition storage shared between the registry and its handles.
#[derive(Debug)]
struct RegistryInner {
    defs: Vec<TypeDef>,
    by_name: FxHashMap<ClassName, usize>,
}

impl RegistryInner {
    /// Edges leaving a definition, in declaration order.
    fn edges(&self, id: usize) -> impl Iterator<Item = &ClassName> {
        let def = &self.defs[id];
        def.parents.iter().chain(def.interfaces.iter())
    }

    /// Breadth-first ancestry test by name.
    fn is_ancestor(&self, id: usize, target: &ClassName) -> bool {
        let mut visited: FxHashSet<&ClassName> = FxHashSet::default();
        let mut queue: VecDeque<&ClassName> = self.edges(id).collect();

        while let Some(name) = queue.pop_front() {
            if name == target {
                return true;
            }
            if !visited.insert(name) {
                continue;
            }
            if let Some(&next) = self.by_name.get(name) {
                queue.extend(self.edges(next));
            }
        }
        false
    }
}

/// Immutable in-memory type-metadata table.
///
/// Cloning is cheap (shared storage). The registry implements
/// [`Introspector`], so it plugs directly into catalog construction.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    inner: Arc<RegistryInner>,
}

impl TypeRegistry {
    /// Start building a registry.
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.inner.defs.len()
    }

    /// Whether the registry holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.inner.defs.is_empty()
    }

    /// Whether a name was registered.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.by_name.contains_key(name)
    }
}

impl Introspector for TypeRegistry {
    fn inspect(&self, class: &ClassName) -> Result<TypeInfoRef, ReflectError> {
        let id = self
            .inner
            .by_name
            .get(class)
            .copied()
            .ok_or_else(|| ReflectError::NotFound {
                class: class.clone(),
            })?;
        Ok(Arc::new(RegistryHandle {
            inner: Arc::clone(&self.inner),
            id,
        }))
    }
}

/// Handle into the shared definition storage.
#[derive(Debug, Clone)]
struct RegistryHandle {
    inner: Arc<RegistryInner>,
    id: usize,
}

impl RegistryHandle {
    fn def(&self) -> &TypeDef {
        // ids are only ever minted from by_name, so the index is in range
        &self.inner.defs[self.id]
    }
}

impl TypeInfo for RegistryHandle {
    fn name(&self) -> &ClassName {
        &self.def().name
    }

    fn is_instantiable(&self) -> bool {
        self.def().kind == TypeKind::Class
    }

    fn is_trait(&self) -> bool {
        self.def().kind == TypeKind::Trait
    }

    fn is_interface(&self) -> bool {
        self.def().kind == TypeKind::Interface
    }

    fn is_subclass_of(&self, ancestor: &ClassName) -> bool {
        self.inner.is_ancestor(self.id, ancestor)
    }
}

/// Builder for [`TypeRegistry`].
///
/// Declarations (`class`, `abstract_class`, `interface`, `trait_`) append a
/// definition; `extends`/`implements` attach facts to the most recent
/// declaration. The first error sticks and surfaces from [`build`].
///
/// [`build`]: TypeRegistryBuilder::build
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    defs: Vec<TypeDef>,
    by_name: FxHashMap<ClassName, usize>,
    err: Option<RegistryError>,
}

impl TypeRegistryBuilder {
    /// Declare a concrete class.
    pub fn class(self, name: &str) -> Self {
        self.declare(name, TypeKind::Class)
    }

    /// Declare an abstract class.
    pub fn abstract_class(self, name: &str) -> Self {
        self.declare(name, TypeKind::AbstractClass)
    }

    /// Declare an interface.
    pub fn interface(self, name: &str) -> Self {
        self.declare(name, TypeKind::Interface)
    }

    /// Declare a trait.
    pub fn trait_(self, name: &str) -> Self {
        self.declare(name, TypeKind::Trait)
    }

    /// Record that the last-declared type extends `parent`.
    ///
    /// Classes take at most one parent; interfaces may extend several;
    /// traits extend nothing.
    pub fn extends(mut self, parent: &str) -> Self {
        if self.err.is_some() {
            return self;
        }
        let parent = match ClassName::new(parent) {
            Ok(parent) => parent,
            Err(e) => return self.fail(e.into()),
        };
        let Some(def) = self.defs.last_mut() else {
            return self.fail(RegistryError::NoSubject {
                relation: "extends",
            });
        };
        match def.kind {
            TypeKind::Class | TypeKind::AbstractClass => {
                if let Some(existing) = def.parents.first() {
                    let err = RegistryError::SecondParent {
                        class: def.name.clone(),
                        existing: existing.clone(),
                    };
                    return self.fail(err);
                }
                def.parents.push(parent);
            }
            TypeKind::Interface => def.parents.push(parent),
            TypeKind::Trait => {
                let err = RegistryError::BadRelation {
                    class: def.name.clone(),
                    kind: def.kind,
                    relation: "extends",
                };
                return self.fail(err);
            }
        }
        self
    }

    /// Record that the last-declared type implements `contract`.
    ///
    /// Only classes implement; interfaces extend instead, traits do neither.
    pub fn implements(mut self, contract: &str) -> Self {
        if self.err.is_some() {
            return self;
        }
        let contract = match ClassName::new(contract) {
            Ok(contract) => contract,
            Err(e) => return self.fail(e.into()),
        };
        let Some(def) = self.defs.last_mut() else {
            return self.fail(RegistryError::NoSubject {
                relation: "implements",
            });
        };
        match def.kind {
            TypeKind::Class | TypeKind::AbstractClass => {
                def.interfaces.push(contract);
                self
            }
            TypeKind::Interface | TypeKind::Trait => {
                let err = RegistryError::BadRelation {
                    class: def.name.clone(),
                    kind: def.kind,
                    relation: "implements",
                };
                self.fail(err)
            }
        }
    }

    /// Finish the registry.
    ///
    /// # Errors
    ///
    /// Returns the first recorded builder error, or [`RegistryError::Cycle`]
    /// if the declared edges form an inheritance cycle.
    pub fn build(self) -> Result<TypeRegistry, RegistryError> {
        if let Some(err) = self.err {
            return Err(err);
        }
        let inner = RegistryInner {
            defs: self.defs,
            by_name: self.by_name,
        };
        if let Some(name) = find_cycle(&inner) {
            return Err(RegistryError::Cycle(name));
        }
        tracing::debug!(types = inner.defs.len(), "type registry built");
        Ok(TypeRegistry {
            inner: Arc::new(inner),
        })
    }

    fn declare(mut self, name: &str, kind: TypeKind) -> Self {
        if self.err.is_some() {
            return self;
        }
        let name = match ClassName::new(name) {
            Ok(name) => name,
            Err(e) => return self.fail(e.into()),
        };
        if self.by_name.contains_key(&name) {
            return self.fail(RegistryError::Duplicate(name));
        }
        let id = self.defs.len();
        self.by_name.insert(name.clone(), id);
        self.defs.push(TypeDef {
            name,
            kind,
            parents: Vec::new(),
            interfaces: Vec::new(),
        });
        self
    }

    fn fail(mut self, err: RegistryError) -> Self {
        self.err = Some(err);
        self
    }
}

/// Check the declared edges for an inheritance cycle.
///
/// Returns the name of a definition on a cycle, if any. Only registered
/// targets are followed; dangling edge names cannot participate in a cycle.
fn find_cycle(inner: &RegistryInner) -> Option<ClassName> {
    let mut visited: FxHashSet<usize> = FxHashSet::default();
    let mut path: FxHashSet<usize> = FxHashSet::default();

    for id in 0..inner.defs.len() {
        if has_cycle_from(inner, id, &mut visited, &mut path) {
            return Some(inner.defs[id].name.clone());
        }
    }
    None
}

fn has_cycle_from(
    inner: &RegistryInner,
    id: usize,
    visited: &mut FxHashSet<usize>,
    path: &mut FxHashSet<usize>,
) -> bool {
    if path.contains(&id) {
        return true;
    }
    if visited.contains(&id) {
        return false;
    }

    visited.insert(id);
    path.insert(id);

    for edge in inner.edges(id) {
        if let Some(&next) = inner.by_name.get(edge) {
            if has_cycle_from(inner, next, visited, path) {
                return true;
            }
        }
    }

    path.remove(&id);
    false
}
