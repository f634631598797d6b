//! reflect::mock
//!
//! Mock introspector for deterministic testing.
//!
//! # Design
//!
//! The mock introspector provides a deterministic implementation of the
//! `Introspector` trait for use in tests. It answers from canned
//! [`MockTypeInfo`] values and records every `inspect` call; failures are
//! scripted with [`FailOn`]. Unlike [`TypeRegistry`], the mock does not
//! resolve ancestry; tests script the exact answers they need.
//!
//! [`TypeRegistry`]: crate::reflect::TypeRegistry
//!
//! # Example
//!
//! ```
//! use class_catalog::reflect::mock::{MockIntrospector, MockTypeInfo};
//! use class_catalog::reflect::Introspector;
//! use class_catalog::types::ClassName;
//!
//! let introspector = MockIntrospector::with_types(vec![
//!     MockTypeInfo::class(r"App\User").with_ancestor(r"App\Model"),
//!     MockTypeInfo::trait_(r"App\Concerns\Sluggable"),
//! ]);
//!
//! let user = ClassName::new(r"App\User").unwrap();
//! let info = introspector.inspect(&user).unwrap();
//! assert!(info.is_instantiable());
//! assert!(info.is_subclass_of(&ClassName::new(r"App\Model").unwrap()));
//!
//! // Every lookup is on record.
//! assert_eq!(introspector.calls(), vec![user]);
//! ```

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use super::traits::{Introspector, ReflectError, TypeInfo, TypeInfoRef};
use crate::types::ClassName;

/// Scripted structural metadata for one class.
///
/// Answers are fixed at construction; `is_subclass_of` reports `true`
/// exactly for the names added via [`with_ancestor`].
///
/// [`with_ancestor`]: MockTypeInfo::with_ancestor
#[derive(Debug, Clone)]
pub struct MockTypeInfo {
    name: ClassName,
    instantiable: bool,
    trait_: bool,
    interface: bool,
    ancestors: Vec<ClassName>,
}

impl MockTypeInfo {
    /// A concrete (instantiable) class.
    pub fn class(name: &str) -> Self {
        Self::with_flags(name, true, false, false)
    }

    /// An abstract class: neither instantiable, a trait, nor an interface.
    pub fn abstract_class(name: &str) -> Self {
        Self::with_flags(name, false, false, false)
    }

    /// An interface.
    pub fn interface(name: &str) -> Self {
        Self::with_flags(name, false, false, true)
    }

    /// A trait.
    pub fn trait_(name: &str) -> Self {
        Self::with_flags(name, false, true, false)
    }

    /// Add a name this type counts as a subclass of.
    pub fn with_ancestor(mut self, ancestor: &str) -> Self {
        self.ancestors
            .push(ClassName::new(ancestor).expect("valid ancestor name"));
        self
    }

    fn with_flags(name: &str, instantiable: bool, trait_: bool, interface: bool) -> Self {
        Self {
            name: ClassName::new(name).expect("valid class name"),
            instantiable,
            trait_,
            interface,
            ancestors: Vec::new(),
        }
    }
}

impl TypeInfo for MockTypeInfo {
    fn name(&self) -> &ClassName {
        &self.name
    }

    fn is_instantiable(&self) -> bool {
        self.instantiable
    }

    fn is_trait(&self) -> bool {
        self.trait_
    }

    fn is_interface(&self) -> bool {
        self.interface
    }

    fn is_subclass_of(&self, ancestor: &ClassName) -> bool {
        self.ancestors.contains(ancestor)
    }
}

/// Configuration for which lookups should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail every inspect call as a load failure with this reason.
    Inspect(String),
    /// Fail inspect for one specific class; others resolve normally.
    Class(ClassName, String),
}

/// Mock introspector for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockIntrospector {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockIntrospectorInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockIntrospectorInner {
    /// Canned answers by class name.
    types: FxHashMap<ClassName, Arc<MockTypeInfo>>,
    /// Lookup to fail (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded inspect calls, in order.
    calls: Vec<ClassName>,
}

impl MockIntrospector {
    /// Create a new empty mock introspector.
    ///
    /// Every lookup fails with [`ReflectError::NotFound`] until types are
    /// seeded via [`with_types`].
    ///
    /// [`with_types`]: MockIntrospector::with_types
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockIntrospectorInner::default())),
        }
    }

    /// Create a mock introspector pre-seeded with canned answers.
    pub fn with_types(types: Vec<MockTypeInfo>) -> Self {
        let types: FxHashMap<ClassName, Arc<MockTypeInfo>> = types
            .into_iter()
            .map(|info| (info.name.clone(), Arc::new(info)))
            .collect();

        Self {
            inner: Arc::new(Mutex::new(MockIntrospectorInner {
                types,
                fail_on: None,
                calls: Vec::new(),
            })),
        }
    }

    /// Configure the mock to fail lookups.
    ///
    /// # Example
    ///
    /// ```
    /// use class_catalog::reflect::mock::{FailOn, MockIntrospector, MockTypeInfo};
    ///
    /// let introspector = MockIntrospector::with_types(vec![
    ///     MockTypeInfo::class(r"App\User"),
    /// ])
    /// .fail_on(FailOn::Inspect("autoloader offline".into()));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = None;
    }

    /// Get all recorded inspect calls, in call order.
    ///
    /// Useful for verifying what a catalog actually looked up, and when.
    pub fn calls(&self) -> Vec<ClassName> {
        let inner = self.inner.lock().unwrap();
        inner.calls.clone()
    }

    /// Get the number of recorded inspect calls.
    pub fn call_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.calls.len()
    }

    /// Clear recorded calls.
    pub fn clear_calls(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.clear();
    }
}

impl Default for MockIntrospector {
    fn default() -> Self {
        Self::new()
    }
}

impl Introspector for MockIntrospector {
    fn inspect(&self, class: &ClassName) -> Result<TypeInfoRef, ReflectError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(class.clone());

        match &inner.fail_on {
            Some(FailOn::Inspect(reason)) => {
                return Err(ReflectError::LoadFailed {
                    class: class.clone(),
                    reason: reason.clone(),
                });
            }
            Some(FailOn::Class(target, reason)) if target == class => {
                return Err(ReflectError::LoadFailed {
                    class: class.clone(),
                    reason: reason.clone(),
                });
            }
            _ => {}
        }

        inner
            .types
            .get(class)
            .cloned()
            .map(|info| info as TypeInfoRef)
            .ok_or_else(|| ReflectError::NotFound {
                class: class.clone(),
            })
    }
}
