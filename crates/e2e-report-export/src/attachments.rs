//! Report Portal pre-processing tree.
//!
//! The `rp_preproc` uploader expects, for every failed test case, a directory
//! `rp_preproc/attachments/xunit/<classname>.<name>` holding its logs. Names
//! match the JUnit report so the uploader can pair them.

use e2e_report_core::naming::{classname_from_report, shortened_name};
use e2e_report_core::{Error, Report, SpecReport};
use std::fs;
use std::path::{Path, PathBuf};

pub const RP_PREPROC_DIR: &str = "rp_preproc";

/// Location of per-test attachment directories under [`RP_PREPROC_DIR`].
pub const XUNIT_ATTACHMENTS: &str = "attachments/xunit";

pub const GINKGO_WRITER_LOG: &str = "ginkgoWriter.log";
pub const STD_OUT_ERR_LOG: &str = "stdOutErr.log";
pub const FAILURE_MESSAGE_LOG: &str = "failureMessage.log";
pub const FAILURE_LOCATION_LOG: &str = "failureLocation.log";

/// Outcome of one attachment run.
#[derive(Debug, Default)]
pub struct AttachmentSummary {
    /// Every log file written, in generation order.
    pub written: Vec<PathBuf>,
    /// Failures encountered along the way; later specs were still processed.
    pub errors: Vec<Error>,
}

impl AttachmentSummary {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Directory that holds the attachments of `spec` under `root`
/// (`<parent>/rp_preproc`).
///
/// Path separators in the test-case name become `_` so every spec maps to a
/// single directory directly below `xunit`.
pub fn attachment_dir(root: &Path, spec: &SpecReport) -> PathBuf {
    let name = format!("{}.{}", classname_from_report(spec), shortened_name(spec));
    root.join(XUNIT_ATTACHMENTS).join(name.replace(['/', '\\'], "_"))
}

/// Rebuild `<parent_dir>/rp_preproc` from `report`.
///
/// Any previous tree is removed first. Only `It` specs with a recorded
/// failure get a directory, and empty logs are not written. A failure on one
/// spec is logged and collected without stopping the others.
pub fn generate_rp_preproc_report(report: &Report, parent_dir: &Path) -> AttachmentSummary {
    let root = parent_dir.join(RP_PREPROC_DIR);
    let mut summary = AttachmentSummary::default();

    if root.exists() {
        if let Err(e) = fs::remove_dir_all(&root) {
            tracing::error!(path = %root.display(), error = %e, "could not remove previous rp_preproc tree");
            summary.errors.push(Error::io("remove", &root, e));
        }
    }

    for spec in report.spec_reports.iter().filter(|s| s.is_it() && !s.failure.is_zero()) {
        let dir = attachment_dir(&root, spec);
        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::error!(path = %dir.display(), error = %e, "could not create attachment directory");
            summary.errors.push(Error::io("create", &dir, e));
            continue;
        }

        let logs: [(&str, &str); 4] = [
            (GINKGO_WRITER_LOG, spec.captured_ginkgo_writer_output.as_str()),
            (STD_OUT_ERR_LOG, spec.captured_std_out_err.as_str()),
            (FAILURE_MESSAGE_LOG, spec.failure_message()),
            (FAILURE_LOCATION_LOG, spec.failure_location().full_stack_trace.as_str()),
        ];
        for (file, content) in logs {
            match write_log(&dir.join(file), content) {
                Ok(Some(path)) => summary.written.push(path),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(error = %e, "could not write attachment");
                    summary.errors.push(e);
                }
            }
        }
    }

    tracing::info!(
        path = %root.display(),
        files = summary.written.len(),
        errors = summary.errors.len(),
        "rp_preproc attachments written"
    );
    summary
}

/// Write `content` to `path` unless it is empty. Returns the path written.
fn write_log(path: &Path, content: &str) -> Result<Option<PathBuf>, Error> {
    if content.is_empty() {
        return Ok(None);
    }
    fs::write(path, content).map_err(|e| Error::io("write", path, e))?;
    Ok(Some(path.to_path_buf()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
