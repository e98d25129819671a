//! e2e-report — post-processing for Ginkgo e2e run reports.
//!
//! Reads the JSON report Ginkgo writes with `--json-report` and turns it into
//! the artefacts CI consumes. The model and writers live in the
//! `e2e-report-core` and `e2e-report-export` crates; this crate wires them to
//! files and configuration.
//!
//! # Architecture
//!
//! ```text
//! report.json ──► core::types ──► export::junit     ──► junit.xml
//!                      │     └──► export::polarion  ──► polarion.xml
//!                      └────────► export::attachments ► rp_preproc/
//! ```
//!
//! Everything runs once, synchronously, at the end of a suite.

use anyhow::Context;
use e2e_report_core::config::Config;
use e2e_report_core::Report;
use std::path::{Path, PathBuf};

/// Read and decode a run-report file.
pub fn load_reports(path: &Path) -> anyhow::Result<Vec<Report>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading run report {}", path.display()))?;
    let reports = e2e_report_core::types::parse_reports(&json)
        .with_context(|| format!("decoding run report {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        reports = reports.len(),
        specs = reports.iter().map(|r| r.spec_reports.len()).sum::<usize>(),
        "run report loaded"
    );
    Ok(reports)
}

/// Output path for report `index` of `count`. A single report keeps `dst`;
/// several get `-<n>` (1-based) inserted before the extension.
pub fn numbered_output(dst: &Path, index: usize, count: usize) -> PathBuf {
    if count <= 1 {
        return dst.to_path_buf();
    }
    let stem = dst
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match dst.extension() {
        Some(ext) => format!("{stem}-{}.{}", index + 1, ext.to_string_lossy()),
        None => format!("{stem}-{}", index + 1),
    };
    dst.with_file_name(name)
}

/// Write one JUnit document per report.
pub fn run_junit(reports: &[Report], dst: &Path, config: &Config) -> anyhow::Result<()> {
    for (i, report) in reports.iter().enumerate() {
        let out = numbered_output(dst, i, reports.len());
        e2e_report_export::generate_junit_report_with_config(report, &out, &config.junit)
            .with_context(|| format!("generating junit report {}", out.display()))?;
    }
    Ok(())
}

/// Write one Polarion document per report.
pub fn run_polarion(reports: &[Report], dst: &Path, config: &Config) -> anyhow::Result<()> {
    if config.polarion.project_id.is_empty() {
        tracing::warn!("polarion project id is empty; case ids will have no project prefix");
    }
    for (i, report) in reports.iter().enumerate() {
        let out = numbered_output(dst, i, reports.len());
        e2e_report_export::generate_polarion_report_with_config(report, &out, &config.polarion)
            .with_context(|| format!("generating polarion report {}", out.display()))?;
    }
    Ok(())
}

/// Rebuild the Report Portal attachment tree from every report's failures.
///
/// All reports are processed even if some attachments fail; the first
/// failure is returned afterwards.
pub fn run_rp_preproc(reports: &[Report], config: &Config) -> anyhow::Result<()> {
    let parent = &config.attachments.parent_dir;
    let mut merged = Report::default();
    for report in reports {
        merged.spec_reports.extend(report.spec_reports.iter().cloned());
    }

    let summary = e2e_report_export::generate_rp_preproc_report(&merged, parent);
    let failed = summary.errors.len();
    match summary.errors.into_iter().next() {
        None => Ok(()),
        Some(first) => Err(anyhow::Error::new(first)).with_context(|| {
            format!(
                "{failed} attachment(s) under {} could not be written",
                parent.display()
            )
        }),
    }
}
