//! Fuzz target for marker detection and insertion.
//!
//! Goal: decoding and applying **never panic**, applying is idempotent, and the original
//! content survives untouched after the inserted line.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_marker_apply
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use uisync_marker::{Marker, MarkerState};
use uisync_types::ids;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Ok(content) = uisync_marker::decode(data.to_vec()) else {
        return;
    };

    let marker = Marker::new(ids::DEFAULT_MARKER, ids::DEFAULT_DIRECTIVE);
    match marker.apply(&content) {
        Some(marked) => {
            assert!(marked.ends_with(content.as_str()));
            assert_eq!(marker.state(&marked), MarkerState::Present);
            assert!(marker.apply(&marked).is_none());
        }
        None => assert_eq!(marker.state(&content), MarkerState::Present),
    }
});
