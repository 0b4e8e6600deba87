//! Use case orchestration for uisync.
//!
//! This crate coordinates the manifest and marker domains with the filesystem adapters. It
//! never prints and never spawns processes; the CLI handles arguments, the build step, and
//! exit codes.

#![forbid(unsafe_code)]

mod nocheck;
mod pack;
mod render;
mod report;

pub use nocheck::{NocheckInput, NocheckOutput, nocheck_exit_code, run_nocheck};
pub use pack::{PackInput, PackOutput, run_pack};
pub use render::{render_file_outcome, render_pack_lines};
pub use report::serialize_report;
