//! # Shelfwise Dataset Loader
//!
//! Reads the retail sales CSV into an immutable [`Dataset`].
//!
//! The loader is strict: the header is checked for every required column
//! before any row is read, and the first value that fails to parse rejects
//! the whole load. Nothing is silently dropped.
//!
//! ## Public API
//!
//! - `load`: reads a file from disk.
//! - `load_from_reader`: reads from any `std::io::Read` source.
//! - `REQUIRED_COLUMNS`: the column names the header must contain.
//! - `DatasetError`: the specific error types that can be returned from this crate.

pub mod error;
pub mod loader;
mod parse;

pub use core_types::Dataset;
pub use error::DatasetError;
pub use loader::{REQUIRED_COLUMNS, load, load_from_reader};
