//! Cross-calculator payload handoff.
//!
//! Producing calculators push their results; the Harvest calculator reads
//! them back newest first. Failures never propagate to the caller.
//!
//! # Modules
//!
//! - [`storage`]: [`StorageBackend`] with in-memory and file-backed implementations
//! - [`store`]: [`HarvestStore`], the bounded newest-first list

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod storage;
pub mod store;

pub use storage::{FileStorage, MemoryStorage, StorageBackend};
pub use store::{HarvestEvent, HarvestStore};
