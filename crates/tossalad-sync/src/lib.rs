//! Sync layer: HTTP access to the hosted analysis database.

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::RestStore;
