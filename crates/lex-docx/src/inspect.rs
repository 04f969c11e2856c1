//! Reading existing `.docx` packages: structure, paragraph text, and the
//! `{placeholder}` names a template expects.
//!
//! The scanner understands the subset of WordprocessingML that editors emit
//! for body text (`<w:p>` containing `<w:r>`/`<w:t>`). A placeholder split
//! across runs by the editor is not recognized.

use std::io::{Cursor, Read};

use serde::Serialize;
use zip::ZipArchive;

use crate::error::DocxError;
use crate::package::DOCUMENT_PART;
use crate::xml::unescape;

/// What [`inspect`] found in a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocxSummary {
    /// Package part names in archive order.
    pub entries: Vec<String>,
    /// Non-empty paragraph texts of the main document, runs joined.
    pub paragraphs: Vec<String>,
    /// `{name}` / `{{name}}` placeholders, first appearance order, no repeats.
    pub placeholders: Vec<String>,
}

/// # Errors
///
/// `DocxError::Zip` for a non-zip input, `DocxError::MissingPart` when
/// `word/document.xml` is absent.
pub fn inspect(bytes: &[u8]) -> Result<DocxSummary, DocxError> {
    let parts = read_parts(bytes)?;
    let document = parts
        .iter()
        .find(|(name, _)| name == DOCUMENT_PART)
        .ok_or_else(|| DocxError::MissingPart(DOCUMENT_PART.to_string()))?;
    let xml = std::str::from_utf8(&document.1).map_err(|_| DocxError::Encoding {
        part: DOCUMENT_PART.to_string(),
    })?;

    let paragraphs = paragraph_texts(xml);
    let placeholders = placeholders(&paragraphs);
    Ok(DocxSummary {
        entries: parts.into_iter().map(|(name, _)| name).collect(),
        paragraphs,
        placeholders,
    })
}

fn read_parts(bytes: &[u8]) -> Result<Vec<(String, Vec<u8>)>, DocxError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut parts = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        parts.push((file.name().to_string(), data));
    }
    Ok(parts)
}

/// Byte offset of the next `<{name}` start tag (not a longer tag name).
fn find_start_tag(haystack: &str, name: &str) -> Option<usize> {
    let needle = format!("<{name}");
    let mut from = 0;
    while let Some(found) = haystack[from..].find(&needle) {
        let at = from + found;
        match haystack[at + needle.len()..].chars().next() {
            Some('>' | ' ' | '/' | '\t' | '\n' | '\r') => return Some(at),
            _ => from = at + needle.len(),
        }
    }
    None
}

/// Contents of each `<{name}>…</{name}>` element; self-closing ones yield "".
fn elements<'a>(xml: &'a str, name: &str) -> Vec<&'a str> {
    let close = format!("</{name}>");
    let mut out = Vec::new();
    let mut rest = xml;
    while let Some(start) = find_start_tag(rest, name) {
        let after = &rest[start..];
        let Some(tag_end) = after.find('>') else {
            break;
        };
        if after[..tag_end].ends_with('/') {
            out.push("");
            rest = &after[tag_end + 1..];
            continue;
        }
        let inner = &after[tag_end + 1..];
        let end = inner.find(&close).unwrap_or(inner.len());
        out.push(&inner[..end]);
        rest = inner.get(end + close.len()..).unwrap_or("");
    }
    out
}

fn paragraph_texts(xml: &str) -> Vec<String> {
    elements(xml, "w:p")
        .into_iter()
        .map(|p| {
            elements(p, "w:t")
                .into_iter()
                .map(unescape)
                .collect::<String>()
        })
        .filter(|text| !text.trim().is_empty())
        .collect()
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

fn placeholders(texts: &[String]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for text in texts {
        let mut rest = text.as_str();
        while let Some(open) = rest.find('{') {
            let after = &rest[open..];
            // Double braces tolerate inner padding; single braces do not.
            let (candidate, skip) = if let Some(inner) = after.strip_prefix("{{") {
                (inner.find("}}").map(|end| (inner[..end].trim(), end + 4)), 2)
            } else {
                (after[1..].find('}').map(|end| (&after[1..=end], end + 2)), 1)
            };
            // An unclosed opener is skipped whole; scanning goes on after it.
            let Some((name, consumed)) = candidate else {
                rest = &after[skip..];
                continue;
            };
            if is_placeholder_name(name) {
                if !found.iter().any(|f| f == name) {
                    found.push(name.to_string());
                }
                rest = &after[consumed..];
            } else {
                rest = &after[1..];
            }
        }
    }
    found
}
