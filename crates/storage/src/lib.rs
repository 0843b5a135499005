//! contractor-storage: the key-value persistence seam for Contractor.
//!
//! Repositories in `contractor-core` never touch a concrete backend. They
//! read and write whole JSON documents through [`KeyValueStore`], which
//! lets the same code run against the in-process [`MemoryStore`] in tests
//! and the on-disk [`FileStore`] from the CLI.

pub mod conformance;
mod error;
mod file;
mod memory;
mod traits;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
