//! Class catalog - namespace and structure driven class discovery
//!
//! A class catalog is an immutable, chainable view over the classes a
//! module-loading system knows about. Bootstrapping code uses it to find
//! every implementation of a contract without manual registration: narrow
//! the full class map by namespace prefix, materialize structural metadata
//! for the survivors, then filter on structure (instantiable, trait,
//! interface, derives-from-or-realizes).
//!
//! # Architecture
//!
//! The codebase keeps the catalog pure and pushes the environment behind
//! trait seams:
//!
//! - [`types`] - Validated domain types (class names, source paths, class maps)
//! - [`catalog`] - The immutable catalog, its filters, and its errors
//! - [`reflect`] - Structural inspection seam, in-memory registry, scripted mock
//! - [`source`] - Class-map provider seam, in-memory map, JSON classmap file
//!
//! # Correctness Invariants
//!
//! The catalog maintains the following invariants:
//!
//! 1. Operations never mutate their receiver; every stage returns a new catalog
//! 2. Filters preserve key uniqueness and the relative order of survivors
//! 3. Structural questions are answered only by materialized handles; asking
//!    one of a path-valued entry is a checked error
//! 4. Reflection is all-or-nothing; a failure leaves no partially-reflected
//!    catalog behind

pub mod catalog;
pub mod reflect;
pub mod source;
pub mod types;
