//! Test builders — ergonomic constructors for `SpecReport` and `Report`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{DateTime, FixedOffset};
use e2e_report_core::types::TimelineLocation;
use e2e_report_core::{
    CodeLocation, Failure, NodeType, ProgressReport, Report, ReportEntry, SpecReport, SpecState,
};
use std::time::Duration;

/// Parse an RFC3339 timestamp. Panics on malformed input.
pub fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap_or_else(|e| panic!("bad timestamp {s:?}: {e}"))
}

pub fn loc(file: &str, line: i64) -> CodeLocation {
    CodeLocation {
        file_name: file.to_string(),
        line_number: line,
        full_stack_trace: String::new(),
    }
}

// ---------------------------------------------------------------------------
// SpecReportBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`SpecReport`] test fixtures. Defaults to a passed `It`.
///
/// # Example
///
/// ```rust
/// let spec = SpecReportBuilder::it("pushes the image")
///     .containers(&["[build-service-suite Build]", "when pushed"])
///     .state(SpecState::Failed)
///     .failure("expected 200, got 500", "build.go", 88)
///     .build();
/// ```
pub struct SpecReportBuilder {
    spec: SpecReport,
}

impl SpecReportBuilder {
    pub fn it(leaf: &str) -> Self {
        Self {
            spec: SpecReport {
                leaf_node_type: NodeType::It,
                leaf_node_text: leaf.to_string(),
                state: SpecState::Passed,
                ..Default::default()
            },
        }
    }

    /// A non-`It` node (e.g. `BeforeSuite`), which the writers skip.
    pub fn node(kind: &str) -> Self {
        let mut b = Self::it("");
        b.spec.leaf_node_type = NodeType::from(kind.to_string());
        b
    }

    pub fn containers(mut self, texts: &[&str]) -> Self {
        self.spec.container_hierarchy_texts = texts.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn container_labels(mut self, labels: &[&[&str]]) -> Self {
        self.spec.container_hierarchy_labels = labels
            .iter()
            .map(|ls| ls.iter().map(|s| s.to_string()).collect())
            .collect();
        self
    }

    pub fn leaf_labels(mut self, labels: &[&str]) -> Self {
        self.spec.leaf_node_labels = labels.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn file(mut self, file: &str, line: i64) -> Self {
        self.spec.leaf_node_location = loc(file, line);
        self
    }

    pub fn state(mut self, state: SpecState) -> Self {
        self.spec.state = state;
        self
    }

    pub fn run_time(mut self, d: Duration) -> Self {
        self.spec.run_time = d;
        self
    }

    pub fn failure(mut self, message: &str, file: &str, line: i64) -> Self {
        self.spec.failure = Failure {
            message: message.to_string(),
            location: CodeLocation {
                full_stack_trace: format!("goroutine 1 [running]:\n{file}:{line}"),
                ..loc(file, line)
            },
            ..Default::default()
        };
        self
    }

    pub fn panic(mut self, forwarded: &str) -> Self {
        self.spec.failure.forwarded_panic = forwarded.to_string();
        self
    }

    pub fn writer(mut self, output: &str) -> Self {
        self.spec.captured_ginkgo_writer_output = output.to_string();
        self
    }

    pub fn std_out_err(mut self, output: &str) -> Self {
        self.spec.captured_std_out_err = output.to_string();
        self
    }

    pub fn progress(mut self, report: ProgressReport) -> Self {
        self.spec.progress_reports.push(report);
        self
    }

    pub fn entry(mut self, name: &str, representation: &str, at: &str) -> Self {
        let mut entry = ReportEntry {
            name: name.to_string(),
            location: loc("entries.go", 10),
            time: Some(ts(at)),
            ..Default::default()
        };
        entry.value.representation = representation.to_string();
        self.spec.report_entries.push(entry);
        self
    }

    pub fn build(self) -> SpecReport {
        self.spec
    }
}

/// A progress snapshot carrying only a message, taken at `offset`.
pub fn snapshot(message: &str, offset: usize) -> ProgressReport {
    ProgressReport {
        message: message.to_string(),
        timeline_location: TimelineLocation {
            offset,
            ..Default::default()
        },
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// ReportBuilder
// ---------------------------------------------------------------------------

pub struct ReportBuilder {
    report: Report,
}

impl ReportBuilder {
    pub fn new(description: &str) -> Self {
        Self {
            report: Report {
                suite_path: "/work/e2e-tests/cmd".to_string(),
                suite_description: description.to_string(),
                suite_succeeded: true,
                start_time: Some(ts("2024-01-15T10:00:00Z")),
                ..Default::default()
            },
        }
    }

    pub fn spec(mut self, spec: SpecReport) -> Self {
        if spec.failed() {
            self.report.suite_succeeded = false;
        }
        self.report.spec_reports.push(spec);
        self
    }

    pub fn build(self) -> Report {
        self.report
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A passed `It` under the given containers.
pub fn passed(containers: &[&str], leaf: &str) -> SpecReport {
    SpecReportBuilder::it(leaf).containers(containers).build()
}

/// A failed `It` with writer output, stdout/stderr, message and location.
pub fn failed(containers: &[&str], leaf: &str) -> SpecReport {
    SpecReportBuilder::it(leaf)
        .containers(containers)
        .state(SpecState::Failed)
        .failure("Expected success", "e2e.go", 42)
        .writer("writer output\n")
        .std_out_err("stdout output\n")
        .build()
}

/// `n` specs spread over ten outer containers, every seventh one failed.
pub fn build_specs(n: usize) -> Vec<SpecReport> {
    (0..n)
        .map(|i| {
            let outer = format!("[suite-{} Component {}]", i % 10, i % 10);
            let leaf = format!("case {i} checks something reasonably descriptive");
            let b = SpecReportBuilder::it(&leaf)
                .containers(&[outer.as_str(), "when configured"])
                .file(&format!("/src/e2e-tests/tests/comp{}/case.go", i % 10), 10 + i as i64);
            if i % 7 == 0 {
                b.state(SpecState::Failed)
                    .failure("boom", "case.go", 20)
                    .writer("line one\nline two\n")
                    .build()
            } else {
                b.build()
            }
        })
        .collect()
}
