//! Filesystem adapters: enumerate assets, discover source files, read and replace files.
//!
//! This crate is allowed to do filesystem IO. It does not spawn processes; the build step is
//! run by the CLI.

#![forbid(unsafe_code)]

mod assets;
mod fs;
mod sources;

pub use assets::list_asset_files;
pub use fs::{read_bytes, read_text, write_atomic};
pub use sources::{Discovered, SourceFile, SourceFilter, discover_sources};
