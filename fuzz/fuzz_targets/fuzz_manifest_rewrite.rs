//! Fuzz target for the manifest rewriter.
//!
//! Goal: rewriting **never panics**, and a successful rewrite is a fixed point: rewriting
//! its own output with the same entries yields the same document.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_manifest_rewrite
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use uisync_manifest::ManifestEntry;

#[derive(Arbitrary, Debug)]
struct RewriteInput {
    document: String,
    names: Vec<String>,
}

fuzz_target!(|input: RewriteInput| {
    if input.document.len() > 64 * 1024 || input.names.len() > 50 {
        return;
    }

    let entries: Vec<ManifestEntry> = input
        .names
        .into_iter()
        .filter(|n| n.len() <= 256)
        .map(|name| ManifestEntry {
            value: format!("UiResources\\{};System.Byte[], mscorlib", name.replace('/', "\\")),
            entry_type: "System.Resources.ResXFileRef, System.Windows.Forms".to_string(),
            name,
        })
        .collect();

    let Ok(first) = uisync_manifest::rewrite_manifest(&input.document, &entries) else {
        return;
    };
    let second = uisync_manifest::rewrite_manifest(&first.xml, &entries)
        .expect("rewriter output must be readable by the rewriter");
    assert_eq!(first.xml, second.xml);
    assert_eq!(second.removed, entries.len());
});
