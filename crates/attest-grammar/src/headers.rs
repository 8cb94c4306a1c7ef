//! Header entry parsing and serialization.

use std::collections::BTreeMap;

use regex::Regex;

use crate::errors::HeaderError;

/// Header name → value mapping for one assertion.
///
/// Values are plain UTF-8 strings, stored unescaped; integer-valued headers
/// are parsed on demand by consumers. Iteration order is lexicographic by
/// name, which the canonical encoder relies on.
pub type Headers = BTreeMap<String, String>;

/// Sanity pattern for header names: lowercase, digits and inner dashes,
/// at least two characters.
const HEADER_NAME_SANITY: &str = "^[a-z][a-z0-9-]*[a-z0-9]$";

/// Parses a raw header block into a [`Headers`] map.
///
/// The block is a sequence of entries separated by single `\n`. An entry
/// with a single-line value looks like:
///
/// ```text
/// NAME ": " VALUE
/// ```
///
/// An entry with a multi-line value (a value with `\n`s in it) looks like:
///
/// ```text
/// NAME ":\n" 1-space indented VALUE
/// ```
///
/// At least one continuation line is required for a multi-line value; a
/// continuation line of a single space contributes an empty fragment.
/// If a name occurs more than once, the last entry wins.
pub fn parse_headers(head: &[u8]) -> Result<Headers, HeaderError> {
    let head = std::str::from_utf8(head).map_err(|_| HeaderError::NotUtf8)?;
    let name_sanity = Regex::new(HEADER_NAME_SANITY).expect("invalid regex");

    let mut headers = Headers::new();
    let lines: Vec<&str> = head.split('\n').collect();
    let mut i = 0;
    while i < lines.len() {
        let entry = lines[i];
        i += 1;
        let name_value_split = entry.find(':').ok_or_else(|| HeaderError::MissingColon {
            entry: entry.to_string(),
        })?;
        let name = &entry[..name_value_split];
        if !name_sanity.is_match(name) {
            return Err(HeaderError::InvalidName {
                name: name.to_string(),
            });
        }

        let after_split = name_value_split + 1;
        if after_split == entry.len() {
            // multiline value, consume the one-space indented continuation
            let mut j = i;
            while j < lines.len() {
                let iline = lines[j];
                if iline.is_empty() || !iline.starts_with(' ') {
                    break;
                }
                j += 1;
            }
            if j == i {
                return Err(HeaderError::EmptyMultiline {
                    entry: entry.to_string(),
                });
            }

            let mut value = String::new();
            value.push_str(&lines[i][1..]);
            i += 1;
            while i < j {
                value.push('\n');
                value.push_str(&lines[i][1..]);
                i += 1;
            }

            headers.insert(name.to_string(), value);
            continue;
        }

        if entry.as_bytes()[after_split] != b' ' {
            return Err(HeaderError::MissingSpace {
                entry: entry.to_string(),
            });
        }

        headers.insert(name.to_string(), entry[after_split + 1..].to_string());
    }
    Ok(headers)
}

/// Serializes one header entry into `buf`, preceded by a `\n` separator.
///
/// Multi-line values are quoted by one-space indenting every line. The
/// caller emits the very first header of a block without the leading
/// separator.
pub fn write_header(buf: &mut Vec<u8>, headers: &Headers, name: &str) {
    buf.push(b'\n');
    buf.extend_from_slice(name.as_bytes());
    let value = headers.get(name).map(String::as_str).unwrap_or("");
    if value.contains('\n') {
        buf.extend_from_slice(b":\n ");
        buf.extend_from_slice(value.replace('\n', "\n ").as_bytes());
    } else {
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
    }
}
