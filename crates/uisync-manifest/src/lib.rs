//! Manifest domain: build `data` entries from asset paths and splice them into a ResX document.
//!
//! No filesystem access happens here. Callers hand in the walked paths and the current
//! manifest text and get back the complete replacement text.

#![forbid(unsafe_code)]

mod document;
mod entry;

pub use document::{Rewrite, read_entries, rewrite_manifest};
pub use entry::{EntryError, EntrySpec, ManifestEntry, build_entries, strip_fixed_prefix};
