//! Shared XML plumbing for the JUnit and Polarion writers.

use e2e_report_core::{Error, Result};
use serde::Serialize;
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Declaration written before every document.
pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Spaces per nesting level in the encoded body.
pub const INDENT: usize = 4;

/// Encode `value` as an indented document rooted at `root`, declaration
/// included.
pub fn to_document<T: Serialize>(root: &str, value: &T) -> Result<String> {
    let mut body = String::new();
    let mut ser = quick_xml::se::Serializer::with_root(&mut body, Some(root))?;
    ser.indent(' ', INDENT);
    value.serialize(ser)?;

    let mut doc = String::with_capacity(XML_HEADER.len() + body.len() + 1);
    doc.push_str(XML_HEADER);
    doc.push_str(&body);
    doc.push('\n');
    Ok(doc)
}

/// Encode `value` and write it to `dst`, creating or truncating the file.
pub fn write_document<T: Serialize>(dst: &Path, root: &str, value: &T) -> Result<()> {
    let doc = to_document(root, value)?;
    let mut file = File::create(dst).map_err(|e| Error::io("create", dst, e))?;
    file.write_all(doc.as_bytes())
        .map_err(|e| Error::io("write", dst, e))?;
    file.flush().map_err(|e| Error::io("flush", dst, e))
}

/// Replace characters XML 1.0 cannot carry (control bytes such as the ANSI
/// escapes in captured terminal output) with U+FFFD.
pub fn sanitize(s: &str) -> Cow<'_, str> {
    if s.chars().all(is_xml_char) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.chars()
            .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
            .collect(),
    )
}

/// Owned form of [`sanitize`], for struct fields.
pub fn clean(s: &str) -> String {
    sanitize(s).into_owned()
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
