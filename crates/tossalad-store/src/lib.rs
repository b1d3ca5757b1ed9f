//! Storage layer: the store accessor trait, concrete in-process stores,
//! current-row selection, and the audit runner.

mod error;
pub use error::StoreError;

pub mod accessor;
pub use accessor::{FetchPolicy, RecordStore, fetch_with_policy};

mod memory;
pub use memory::{FileStore, MemoryStore};

pub mod runner;
pub use runner::Auditor;

pub mod select;
