use crate::entry::ManifestEntry;
use anyhow::Context;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use uisync_types::ids::{DATA_ELEMENT, VALUE_ELEMENT};

/// Result of splicing new entries into a manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rewrite {
    /// Complete replacement document, tab-indented, with a trailing newline.
    pub xml: String,
    /// Number of `data` entries dropped from the original document.
    pub removed: usize,
}

/// Replace every `data` child of the root element with `entries`.
///
/// Everything else in the document (declaration, comments, `resheader`, schema) is carried
/// through; whitespace is dropped and the output is re-indented with tabs. The new entries
/// are appended at the end of the root in the order given.
pub fn rewrite_manifest(text: &str, entries: &[ManifestEntry]) -> anyhow::Result<Rewrite> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = Reader::from_str(text);
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);

    let mut depth = 0usize;
    let mut root_seen = false;
    let mut removed = 0usize;
    // Depth at which a skipped `data` subtree ends.
    let mut skip_to: Option<usize> = None;
    // A start tag waiting to learn whether the element is empty.
    let mut pending: Option<BytesStart<'_>> = None;

    loop {
        let event = reader
            .read_event()
            .with_context(|| format!("parse manifest at byte {}", reader.buffer_position()))?;

        if let Some(target) = skip_to {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    depth -= 1;
                    if depth == target {
                        skip_to = None;
                    }
                }
                Event::Eof => anyhow::bail!("manifest ends inside a `{DATA_ELEMENT}` element"),
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(start) => {
                if depth == 0 {
                    if root_seen {
                        anyhow::bail!("manifest has more than one root element");
                    }
                    root_seen = true;
                }
                depth += 1;
                if depth == 2 && start.name().as_ref() == DATA_ELEMENT.as_bytes() {
                    removed += 1;
                    skip_to = Some(1);
                    continue;
                }
                flush_pending(&mut writer, &mut pending)?;
                pending = Some(start);
            }
            Event::Empty(start) => {
                if depth == 0 {
                    if root_seen {
                        anyhow::bail!("manifest has more than one root element");
                    }
                    root_seen = true;
                    if entries.is_empty() {
                        write(&mut writer, Event::Empty(start))?;
                    } else {
                        write(&mut writer, Event::Start(start.clone()))?;
                        write_entries(&mut writer, entries)?;
                        write(&mut writer, Event::End(start.to_end()))?;
                    }
                    continue;
                }
                if depth == 1 && start.name().as_ref() == DATA_ELEMENT.as_bytes() {
                    removed += 1;
                    continue;
                }
                flush_pending(&mut writer, &mut pending)?;
                write(&mut writer, Event::Empty(start))?;
            }
            Event::End(end) => {
                depth = depth
                    .checked_sub(1)
                    .context("manifest closes an element that was never opened")?;
                if depth == 0 && !entries.is_empty() {
                    flush_pending(&mut writer, &mut pending)?;
                    write_entries(&mut writer, entries)?;
                    write(&mut writer, Event::End(end))?;
                } else if let Some(start) = pending.take() {
                    write(&mut writer, Event::Empty(start))?;
                } else {
                    write(&mut writer, Event::End(end))?;
                }
            }
            Event::Text(text) => {
                if text.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                flush_pending(&mut writer, &mut pending)?;
                write(&mut writer, Event::Text(text))?;
            }
            Event::Eof => break,
            other => {
                flush_pending(&mut writer, &mut pending)?;
                write(&mut writer, other)?;
            }
        }
    }

    if !root_seen {
        anyhow::bail!("manifest has no root element");
    }
    if depth != 0 {
        anyhow::bail!("manifest ends with {depth} unclosed element(s)");
    }

    let mut xml = String::from_utf8(writer.into_inner()).context("manifest output is not UTF-8")?;
    xml.push('\n');
    Ok(Rewrite { xml, removed })
}

/// Read back the `data` entries that are direct children of the root, in document order.
pub fn read_entries(text: &str) -> anyhow::Result<Vec<ManifestEntry>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = Reader::from_str(text);

    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut current: Option<ManifestEntry> = None;
    let mut in_value = false;

    loop {
        let event = reader
            .read_event()
            .with_context(|| format!("parse manifest at byte {}", reader.buffer_position()))?;
        match event {
            Event::Start(start) => {
                depth += 1;
                if depth == 2 && start.name().as_ref() == DATA_ELEMENT.as_bytes() {
                    current = Some(entry_from_attributes(&start)?);
                } else if depth == 3
                    && current.is_some()
                    && start.name().as_ref() == VALUE_ELEMENT.as_bytes()
                {
                    in_value = true;
                }
            }
            Event::Empty(start) => {
                if depth == 1 && start.name().as_ref() == DATA_ELEMENT.as_bytes() {
                    out.push(entry_from_attributes(&start)?);
                }
            }
            Event::Text(text) if in_value => {
                if let Some(entry) = current.as_mut() {
                    entry.value.push_str(&text.unescape().context("unescape entry value")?);
                }
            }
            Event::End(_) => {
                if depth == 3 {
                    in_value = false;
                }
                if depth == 2
                    && let Some(entry) = current.take()
                {
                    out.push(entry);
                }
                depth = depth
                    .checked_sub(1)
                    .context("manifest closes an element that was never opened")?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

fn entry_from_attributes(start: &BytesStart<'_>) -> anyhow::Result<ManifestEntry> {
    let mut entry = ManifestEntry {
        name: String::new(),
        entry_type: String::new(),
        value: String::new(),
    };
    for attr in start.attributes() {
        let attr = attr.context("read entry attribute")?;
        let value = attr.unescape_value().context("unescape entry attribute")?;
        match attr.key.as_ref() {
            b"name" => entry.name = value.into_owned(),
            b"type" => entry.entry_type = value.into_owned(),
            _ => {}
        }
    }
    Ok(entry)
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> anyhow::Result<()> {
    writer.write_event(event).context("write manifest xml")?;
    Ok(())
}

fn flush_pending(
    writer: &mut Writer<Vec<u8>>,
    pending: &mut Option<BytesStart<'_>>,
) -> anyhow::Result<()> {
    if let Some(start) = pending.take() {
        write(writer, Event::Start(start))?;
    }
    Ok(())
}

fn write_entries(writer: &mut Writer<Vec<u8>>, entries: &[ManifestEntry]) -> anyhow::Result<()> {
    for entry in entries {
        let data = BytesStart::new(DATA_ELEMENT).with_attributes([
            ("name", entry.name.as_str()),
            ("type", entry.entry_type.as_str()),
        ]);
        write(writer, Event::Start(data))?;
        write(writer, Event::Start(BytesStart::new(VALUE_ELEMENT)))?;
        write(writer, Event::Text(BytesText::new(&entry.value)))?;
        write(writer, Event::End(BytesEnd::new(VALUE_ELEMENT)))?;
        write(writer, Event::End(BytesEnd::new(DATA_ELEMENT)))?;
    }
    Ok(())
}
