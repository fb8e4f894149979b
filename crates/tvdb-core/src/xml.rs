//! XML parsing and type coercion
//!
//! The catalog wire format is a flat document: one record per top-level
//! element, one field per immediate child, all values carried as element
//! text. [`Document`] parses a payload once and hands out the records for
//! any requested tag; [`coerce`] turns field text into a typed [`Value`].

use std::sync::LazyLock;

use chrono::NaiveDate;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tracing::debug;

use crate::attrs::Value;
use crate::error::{Error, Result};

static FLOAT_RE: LazyLock<regex_lite::Regex> =
    LazyLock::new(|| regex_lite::Regex::new(r"^\d+\.\d+$").unwrap());
static INT_RE: LazyLock<regex_lite::Regex> =
    LazyLock::new(|| regex_lite::Regex::new(r"^\d+$").unwrap());

/// Coerce raw field text into a typed [`Value`].
///
/// The rules apply in this order:
/// 1. empty or whitespace-only text becomes an empty text value
/// 2. text of the exact form yyyy-mm-dd becomes a date
/// 3. text containing a `|` is split into a list, with the fencing pipes
///    dropped and each segment trimmed; segments are never coerced further
/// 4. digits with a single decimal point become a float
/// 5. all digits become an integer
/// 6. anything else stays as trimmed text
pub fn coerce(raw: &str) -> Value {
    let text = raw.trim();
    if text.is_empty() {
        return Value::Text(String::new());
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Value::Date(date);
    }

    if text.contains('|') {
        let items = text
            .trim_matches('|')
            .split('|')
            .map(|s| s.trim().to_string())
            .collect();
        return Value::List(items);
    }

    if FLOAT_RE.is_match(text) {
        if let Ok(value) = text.parse::<f64>() {
            return Value::Float(value);
        }
    }

    if INT_RE.is_match(text) {
        // Digit runs beyond i64 range stay text
        if let Ok(value) = text.parse::<i64>() {
            return Value::Int(value);
        }
    }

    Value::Text(text.to_string())
}

/// One top-level record: the element tag plus its immediate child fields
#[derive(Debug, Clone)]
struct Record {
    tag: String,
    fields: Vec<(String, Value)>,
}

/// A parsed catalog payload.
///
/// A single parse serves every record extraction, so a series payload that
/// carries both `Series` and `Episode` elements is only walked once.
#[derive(Debug, Clone)]
pub struct Document {
    records: Vec<Record>,
}

impl Document {
    /// Parse a payload into its top-level records.
    ///
    /// # Errors
    /// `Error::BadData` if the payload is not well-formed XML. This typically
    /// means the backend served an HTML error page instead of data.
    pub fn parse(xml: &[u8]) -> Result<Document> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut records = Vec::new();
        let mut buf = Vec::new();
        let mut depth = 0usize;
        let mut current: Option<Record> = None;
        let mut field: Option<(String, String)> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    depth += 1;
                    match depth {
                        2 => {
                            current = Some(Record {
                                tag: name,
                                fields: Vec::new(),
                            });
                        }
                        3 => field = Some((name, String::new())),
                        _ => {}
                    }
                }
                Ok(Event::Empty(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    match depth {
                        1 => records.push(Record {
                            tag: name,
                            fields: Vec::new(),
                        }),
                        2 => {
                            if let Some(record) = &mut current {
                                record.fields.push((name, Value::Text(String::new())));
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Text(t)) => {
                    if depth == 3 {
                        if let Some((_, text)) = &mut field {
                            let unescaped = t
                                .unescape()
                                .map_err(|e| Error::BadData(format!("bad XML text: {e}")))?;
                            text.push_str(&unescaped);
                        }
                    }
                }
                Ok(Event::CData(t)) => {
                    if depth == 3 {
                        if let Some((_, text)) = &mut field {
                            text.push_str(&String::from_utf8_lossy(&t.into_inner()));
                        }
                    }
                }
                Ok(Event::End(_)) => {
                    match depth {
                        3 => {
                            if let (Some(record), Some((name, text))) =
                                (&mut current, field.take())
                            {
                                record.fields.push((name, coerce(&text)));
                            }
                        }
                        2 => {
                            if let Some(record) = current.take() {
                                records.push(record);
                            }
                        }
                        _ => {}
                    }
                    depth = depth.saturating_sub(1);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::BadData(format!("malformed XML: {e}"))),
            }
            buf.clear();
        }

        debug!(records = records.len(), "parsed document");
        Ok(Document { records })
    }

    /// All records whose top-level tag equals `tag`, in document order
    pub fn records<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a [(String, Value)]> {
        self.records
            .iter()
            .filter(move |r| r.tag == tag)
            .map(|r| r.fields.as_slice())
    }

    /// Whether any top-level record carries the given tag, e.g. the
    /// `Error` marker element some endpoints answer with
    pub fn has(&self, tag: &str) -> bool {
        self.records.iter().any(|r| r.tag == tag)
    }
}
