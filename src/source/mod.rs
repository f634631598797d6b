//! source
//!
//! Where class maps come from.
//!
//! # Architecture
//!
//! The [`ClassSource`] trait is the seam between catalogs and whatever
//! produces the class-name→source-path map: a generated classmap document,
//! an embedding host that already has the map in memory, or a test fixture.
//! A catalog consults its source exactly once, at scan time.
//!
//! # Modules
//!
//! - `traits`: Core `ClassSource` trait and `SourceError`
//! - `map`: [`MapSource`], a fixed in-memory map
//! - `classmap`: [`ClassmapFile`], a JSON class-map document on disk

mod classmap;
mod map;
mod traits;

pub use classmap::ClassmapFile;
pub use map::MapSource;
pub use traits::*;
