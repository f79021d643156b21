//! Service implementations
//!
//! Production implementations of the storage trait. Tests use the
//! mockall-generated mocks from `crate::traits` instead.

pub mod sqlite_store;

pub use sqlite_store::SqliteStore;
