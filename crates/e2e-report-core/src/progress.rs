//! Plain-text rendering of progress-report snapshots.
//!
//! Output follows the layout Ginkgo's default reporter uses with colour
//! disabled. Goroutine dumps are not part of the JSON we consume and are never
//! rendered.

use crate::types::{CodeLocation, ProgressReport};
use chrono::{DateTime, FixedOffset};
use std::fmt::Write;
use std::time::Duration;

/// Render one snapshot, including a trailing newline.
pub fn render_progress_report(report: &ProgressReport) -> String {
    let mut out = String::new();
    let now = report.timeline_location.time;

    if !report.message.is_empty() {
        out.push_str(&report.message);
        out.push('\n');
    }

    let mut texts: Vec<&str> = report
        .container_hierarchy_texts
        .iter()
        .map(String::as_str)
        .collect();
    if !report.leaf_node_text.is_empty() {
        texts.push(&report.leaf_node_text);
    }
    if !texts.is_empty() {
        let _ = writeln!(
            out,
            "{} (Spec Runtime: {})",
            texts.join(" "),
            elapsed(report.spec_start_time, now)
        );
        push_location(&mut out, 1, &report.leaf_node_location);
    }

    if let Some(node_type) = &report.current_node_type {
        let mut line = format!("In [{node_type}]");
        if !report.current_node_text.is_empty() && report.current_node_text != report.leaf_node_text {
            line.push(' ');
            line.push_str(&report.current_node_text);
        }
        let _ = writeln!(
            out,
            "  {line} (Node Runtime: {})",
            elapsed(report.current_node_start_time, now)
        );
        push_location(&mut out, 2, &report.current_node_location);
    }

    if !report.current_step_text.is_empty() {
        let _ = writeln!(
            out,
            "    At [By Step] {} (Step Runtime: {})",
            report.current_step_text,
            elapsed(report.current_step_start_time, now)
        );
        push_location(&mut out, 3, &report.current_step_location);
    }

    if !report.captured_ginkgo_writer_output.is_empty() {
        out.push('\n');
        out.push_str("  Begin Captured GinkgoWriter Output >>\n");
        push_indented(&mut out, 2, &report.captured_ginkgo_writer_output);
        out.push_str("  << End Captured GinkgoWriter Output\n");
    }

    if !report.additional_reports.is_empty() {
        out.push('\n');
        out.push_str("  Begin Additional Progress Reports >>\n");
        for (i, additional) in report.additional_reports.iter().enumerate() {
            if i > 0 {
                out.push_str("    ----\n");
            }
            push_indented(&mut out, 2, additional);
        }
        out.push_str("  << End Additional Progress Reports\n");
    }

    out
}

fn push_location(out: &mut String, depth: usize, location: &CodeLocation) {
    if !location.file_name.is_empty() {
        let _ = writeln!(out, "{}{location}", "  ".repeat(depth));
    }
}

fn push_indented(out: &mut String, depth: usize, text: &str) {
    let pad = "  ".repeat(depth);
    for line in text.trim_end_matches('\n').lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, "{pad}{line}");
        }
    }
}

fn elapsed(start: Option<DateTime<FixedOffset>>, now: Option<DateTime<FixedOffset>>) -> String {
    let d = match (start, now) {
        (Some(start), Some(now)) => (now - start).to_std().unwrap_or_default(),
        _ => Duration::ZERO,
    };
    format_duration(d)
}

/// Format a duration like Go's `time.Duration.String()` after rounding to
/// milliseconds: `0s`, `250ms`, `1.5s`, `2m3.004s`, `1h0m0s`.
pub fn format_duration(d: Duration) -> String {
    let total_ms = (d.as_nanos() + 500_000) / 1_000_000;
    if total_ms == 0 {
        return "0s".to_string();
    }
    if total_ms < 1000 {
        return format!("{total_ms}ms");
    }

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let millis = total_ms % 60_000;
    let secs = millis / 1000;
    let frac = millis % 1000;

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    if frac == 0 {
        let _ = write!(out, "{secs}s");
    } else {
        let frac = format!("{frac:03}");
        let _ = write!(out, "{secs}.{}s", frac.trim_end_matches('0'));
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
