//! XML record files
//!
//! ```text
//! <benchmarks>
//!     <benchmark>
//!         <system>…</system>
//!         <model>…</model>
//!         <single_core_score>…</single_core_score>
//!         <multi_core_score>…</multi_core_score>
//!         <url>…</url>
//!     </benchmark>
//! </benchmarks>
//! ```
//!
//! `<url>` is left out for records without a detail link. When reading, a
//! missing or empty child falls back to `"Unknown"`, `"N/A"` or no URL.
//! Field text is kept exactly as written, surrounding whitespace included;
//! only the indentation between elements is dropped.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::models::Record;
use crate::utils::error::StoreError;

const ROOT: &str = "benchmarks";
const ENTRY: &str = "benchmark";
const SYSTEM: &str = "system";
const MODEL: &str = "model";
const SINGLE_CORE: &str = "single_core_score";
const MULTI_CORE: &str = "multi_core_score";
const URL: &str = "url";

/// Encode records as an XML document
///
/// # Errors
///
/// Returns `StoreError::Xml` if writing fails.
pub fn to_string(records: &[Record]) -> Result<String, StoreError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(StoreError::xml)?;
    writer
        .write_event(Event::Start(BytesStart::new(ROOT)))
        .map_err(StoreError::xml)?;

    for record in records {
        writer
            .write_event(Event::Start(BytesStart::new(ENTRY)))
            .map_err(StoreError::xml)?;

        write_field(&mut writer, SYSTEM, &record.system)?;
        write_field(&mut writer, MODEL, &record.model)?;
        write_field(&mut writer, SINGLE_CORE, &record.single_core)?;
        write_field(&mut writer, MULTI_CORE, &record.multi_core)?;
        if let Some(url) = &record.url {
            write_field(&mut writer, URL, url)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(ENTRY)))
            .map_err(StoreError::xml)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(ROOT)))
        .map_err(StoreError::xml)?;

    String::from_utf8(writer.into_inner()).map_err(StoreError::xml)
}

fn write_field(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<(), StoreError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(StoreError::xml)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(StoreError::xml)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(StoreError::xml)?;
    Ok(())
}

/// Fields of the `<benchmark>` currently being read
#[derive(Default)]
struct PartialRecord {
    system: Option<String>,
    model: Option<String>,
    single_core: Option<String>,
    multi_core: Option<String>,
    url: Option<String>,
}

impl PartialRecord {
    fn set(&mut self, tag: &str, text: String) {
        let slot = match tag {
            SYSTEM => &mut self.system,
            MODEL => &mut self.model,
            SINGLE_CORE => &mut self.single_core,
            MULTI_CORE => &mut self.multi_core,
            URL => &mut self.url,
            _ => return,
        };
        slot.get_or_insert_with(String::new).push_str(&text);
    }

    fn finish(self) -> Record {
        Record::new(
            self.system.unwrap_or_default(),
            self.model.unwrap_or_default(),
            self.single_core.unwrap_or_default(),
            self.multi_core.unwrap_or_default(),
            self.url,
        )
    }
}

/// Decode an XML document of `<benchmark>` entries
///
/// # Errors
///
/// Returns `StoreError::Xml` for malformed XML or a document without a
/// root element.
pub fn from_str(content: &str) -> Result<Vec<Record>, StoreError> {
    let mut reader = Reader::from_str(content);

    let mut records = Vec::new();
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut current: Option<PartialRecord> = None;
    let mut current_tag = String::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(StoreError::xml)? {
            Event::Start(e) => {
                depth += 1;
                saw_root = true;
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if name == ENTRY {
                    current = Some(PartialRecord::default());
                    current_tag.clear();
                } else {
                    current_tag = name;
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if name == ENTRY {
                    if let Some(partial) = current.take() {
                        records.push(partial.finish());
                    }
                }
                current_tag.clear();
            }
            Event::Empty(e) => {
                saw_root = true;
                // A self-closing <benchmark/> is an entry with every field missing
                if e.local_name().as_ref() == ENTRY.as_bytes() {
                    records.push(PartialRecord::default().finish());
                }
            }
            // Text outside a field element is indentation
            Event::Text(e) if !current_tag.is_empty() => {
                if let Some(partial) = current.as_mut() {
                    let text = e.unescape().map_err(StoreError::xml)?;
                    partial.set(&current_tag, text.into_owned());
                }
            }
            Event::CData(e) if !current_tag.is_empty() => {
                if let Some(partial) = current.as_mut() {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    partial.set(&current_tag, text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(StoreError::Xml(String::from("no root element found")));
    }
    if depth > 0 {
        return Err(StoreError::Xml(String::from("unexpected end of document")));
    }

    Ok(records)
}
