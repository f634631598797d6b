//! reflect
//!
//! Structural inspection of classes: the capability catalogs use to turn
//! names into queryable type metadata.
//!
//! # Architecture
//!
//! The [`Introspector`] trait defines the interface for resolving a class
//! name to structural metadata. Catalogs hold an introspector and call it
//! lazily; they never assume a concrete implementation, so the reflection
//! backend is swappable.
//!
//! Inspection answers are [`TypeInfoRef`] handles. A handle is opaque and
//! shared: cloning a catalog never re-runs inspection, and two filtered
//! views of the same catalog see the same handle for the same class.
//!
//! # Modules
//!
//! - `traits`: Core `Introspector` and `TypeInfo` traits plus `ReflectError`
//! - [`registry`]: In-memory type-metadata table with ancestry resolution
//! - [`mock`]: Scripted implementation for deterministic testing
//!
//! # Example
//!
//! ```
//! use class_catalog::reflect::{Introspector, TypeRegistry};
//! use class_catalog::types::ClassName;
//!
//! let registry = TypeRegistry::builder()
//!     .abstract_class(r"App\Model")
//!     .class(r"App\User")
//!     .extends(r"App\Model")
//!     .build()?;
//!
//! let info = registry.inspect(&ClassName::new(r"App\User")?)?;
//! assert!(info.is_instantiable());
//! assert!(info.is_subclass_of(&ClassName::new(r"App\Model")?));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod mock;
pub mod registry;
mod traits;

pub use registry::{RegistryError, TypeKind, TypeRegistry, TypeRegistryBuilder};
pub use traits::*;
