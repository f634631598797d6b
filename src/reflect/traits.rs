//! reflect::traits
//!
//! Introspection traits for answering structural questions about classes.
//!
//! # Design
//!
//! The catalog never performs introspection itself; it delegates to an
//! [`Introspector`] injected at construction. The introspector resolves a
//! class name into a [`TypeInfo`] handle, and the handle answers a fixed set
//! of structural queries (instantiable, trait, interface, ancestry). The set
//! is deliberately small: that is all namespace-driven discovery needs, and
//! a wider reflection surface would leak host-language details into every
//! consumer.
//!
//! Handles are shared as [`TypeInfoRef`] (`Arc<dyn TypeInfo>`): catalogs are
//! value-like and freely cloned, so handle ownership has to be cheap.
//!
//! # Example
//!
//! ```
//! use class_catalog::reflect::{Introspector, ReflectError, TypeInfoRef};
//! use class_catalog::types::ClassName;
//!
//! fn find_handler(
//!     introspector: &dyn Introspector,
//!     name: &ClassName,
//! ) -> Result<TypeInfoRef, ReflectError> {
//!     let info = introspector.inspect(name)?;
//!     assert!(info.is_instantiable());
//!     Ok(info)
//! }
//! ```

use std::sync::Arc;

use thiserror::Error;

use crate::types::ClassName;

/// Errors from reflective inspection.
///
/// To a discovery chain both variants mean the class could not be resolved
/// into a structural handle; they stay separate because a loader can report
/// distinct causes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReflectError {
    /// The class name is not known to the introspector.
    #[error("class `{class}` is not known to the introspector")]
    NotFound {
        /// The unresolved class name
        class: ClassName,
    },

    /// The class is known but its definition could not be loaded.
    #[error("class `{class}` failed to load: {reason}")]
    LoadFailed {
        /// The class that failed to load
        class: ClassName,
        /// Loader-reported cause (missing file, malformed definition, ...)
        reason: String,
    },
}

impl ReflectError {
    /// The class name the failure is about.
    pub fn class(&self) -> &ClassName {
        match self {
            ReflectError::NotFound { class } => class,
            ReflectError::LoadFailed { class, .. } => class,
        }
    }
}

/// Structural metadata handle for a single class.
///
/// Answers the fixed query set discovery needs. Implementations typically
/// borrow into some backing table, so handles are exposed as
/// [`TypeInfoRef`] rather than bare values.
pub trait TypeInfo: std::fmt::Debug + Send + Sync {
    /// The fully-qualified name this handle describes.
    fn name(&self) -> &ClassName;

    /// Whether the class can be constructed directly.
    ///
    /// Abstract classes, interfaces, and traits all answer `false`.
    fn is_instantiable(&self) -> bool;

    /// Whether this is a trait/mixin-like construct.
    fn is_trait(&self) -> bool;

    /// Whether this is an interface.
    fn is_interface(&self) -> bool;

    /// Whether `ancestor` is a proper ancestor of this class: a class it
    /// derives from, or an interface it realizes (directly or transitively).
    ///
    /// A type is never a subclass of itself. Names absent from the hierarchy
    /// answer `false`.
    fn is_subclass_of(&self, ancestor: &ClassName) -> bool;
}

/// Shared structural handle.
pub type TypeInfoRef = Arc<dyn TypeInfo>;

/// The reflective inspection capability.
///
/// Given a class name, produce a structural handle or fail with the reason
/// the class could not be resolved. Inspection is synchronous: metadata is
/// expected to already be in memory or cheaply loadable.
pub trait Introspector: std::fmt::Debug + Send + Sync {
    /// Resolve `class` into a structural handle.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError`] if the class does not exist or its
    /// definition cannot be loaded. Inspection of the same name twice
    /// returns equivalent handles; no caching is required or assumed.
    fn inspect(&self, class: &ClassName) -> Result<TypeInfoRef, ReflectError>;
}
