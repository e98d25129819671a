//! Test-case naming — classnames and filesystem-safe shortened names.
//!
//! Container labels in this suite are written as `[suite-name Description]`,
//! so the classname is the first token of the outermost container with the
//! opening bracket dropped.

use crate::output::floor_char_boundary;
use crate::types::SpecReport;
use sha1::{Digest, Sha1};

/// Maximum number of bytes kept verbatim by [`shortened_name`]. Together
/// with the separator and digest this keeps attachment directory names well
/// under the usual 255-byte file-name limit.
pub const MAX_NAME_BYTES: usize = 100;

/// Separator between the kept prefix and the digest of the overflow.
pub const HASH_SEPARATOR: &str = " sha: ";

/// Derive the JUnit classname of a spec.
///
/// Returns an empty string when the spec has no texts at all, or when the
/// outermost text is blank.
pub fn classname_from_report(report: &SpecReport) -> String {
    let texts = report.texts();
    let Some(first) = texts.first() else {
        return texts.join(" ");
    };
    let Some(token) = first.split_whitespace().next() else {
        return String::new();
    };
    let mut chars = token.chars();
    chars.next();
    chars.as_str().to_string()
}

/// Build the test-case identifier used for JUnit names and attachment
/// directories.
///
/// The display name has the classname removed once. Anything past
/// [`MAX_NAME_BYTES`] bytes is replaced by the lower-hex SHA-1 of the
/// overflow, so distinct tails never collide on the same prefix. The cut
/// moves back to a char boundary when byte 100 falls inside a character.
pub fn shortened_name(report: &SpecReport) -> String {
    let classname = classname_from_report(report);
    let replaced = report.display_name().replacen(&classname, "", 1);
    shorten_with_hash(&replaced)
}

/// Apply the length bound and hash suffix to an already-stripped name.
pub fn shorten_with_hash(name: &str) -> String {
    if name.len() <= MAX_NAME_BYTES {
        return name.to_string();
    }
    let (head, tail) = name.split_at(floor_char_boundary(name, MAX_NAME_BYTES));
    format!("{head}{HASH_SEPARATOR}{}", sha1_hex(tail))
}

fn sha1_hex(s: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(s.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
