//! Reconstruction of a spec's system-out and system-err streams.
//!
//! system-err is the GinkgoWriter transcript with every progress snapshot
//! spliced in at the byte offset it was taken at. system-out is the captured
//! stdout/stderr followed by any report entries.

use crate::progress::render_progress_report;
use crate::types::{Failure, ProgressReport, SpecReport};
use chrono::{DateTime, FixedOffset};

/// Interleave `transcript` with rendered `snapshots`.
///
/// Snapshots are taken in order. Offsets past the end of the transcript are
/// clamped, and offsets inside a multi-byte character move back to the
/// previous boundary. Transcript bytes are never reordered or dropped.
pub fn splice_output(transcript: &str, snapshots: &[ProgressReport]) -> String {
    splice_with(transcript, snapshots, render_progress_report)
}

/// [`splice_output`] with a caller-supplied snapshot renderer.
pub fn splice_with<F>(transcript: &str, snapshots: &[ProgressReport], render: F) -> String
where
    F: Fn(&ProgressReport) -> String,
{
    let mut out = String::with_capacity(transcript.len());
    let mut cursor = 0usize;

    for snapshot in snapshots {
        let offset = snapshot.timeline_location.offset;
        if cursor < offset {
            let end = floor_char_boundary(transcript, offset.min(transcript.len()));
            if cursor < end {
                out.push_str(&transcript[cursor..end]);
                cursor = end;
            }
        }
        out.push_str(&render(snapshot));
    }

    if cursor < transcript.len() {
        out.push_str(&transcript[cursor..]);
    }
    out
}

/// The spec's system-err: its GinkgoWriter transcript with progress reports
/// spliced in.
pub fn system_err(spec: &SpecReport) -> String {
    splice_output(&spec.captured_ginkgo_writer_output, &spec.progress_reports)
}

/// The spec's system-out: captured stdout/stderr, then a `Report Entries:`
/// section when the spec has any. The header always starts its own line.
pub fn system_out(spec: &SpecReport) -> String {
    let mut out = spec.captured_std_out_err.clone();
    if spec.report_entries.is_empty() {
        return out;
    }

    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("Report Entries:\n");
    let last = spec.report_entries.len() - 1;
    for (i, entry) in spec.report_entries.iter().enumerate() {
        let time = entry.time.as_ref().map(rfc3339_nano).unwrap_or_default();
        out.push_str(&format!("{}\n{}\n{}\n", entry.name, entry.location, time));
        let representation = entry.string_representation();
        if !representation.is_empty() {
            out.push_str(representation);
            out.push('\n');
        }
        if i < last {
            out.push_str("--\n");
        }
    }
    out
}

/// Description body for an interrupted spec: the failure message followed by
/// the rendered progress report captured at interruption.
pub fn interrupt_description(failure: &Failure) -> String {
    let mut out = format!("{}\n", failure.message);
    out.push_str(&render_progress_report(&failure.progress_report));
    out
}

/// Format a timestamp with Go's `time.RFC3339Nano` layout: fractional
/// seconds with trailing zeros removed, `Z` for a zero offset.
pub fn rfc3339_nano(ts: &DateTime<FixedOffset>) -> String {
    let mut out = ts.format("%Y-%m-%dT%H:%M:%S").to_string();
    let nanos = ts.timestamp_subsec_nanos() % 1_000_000_000;
    if nanos > 0 {
        let frac = format!("{nanos:09}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    if ts.offset().local_minus_utc() == 0 {
        out.push('Z');
    } else {
        out.push_str(&ts.format("%:z").to_string());
    }
    out
}

/// Largest char boundary of `s` at or below `index`.
pub(crate) fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
