//! Core types for e2e-report-core.
//!
//! These mirror the JSON encoding Ginkgo v2 uses for `--json-report`: a
//! [`Report`] per suite run, holding one [`SpecReport`] per executed node.
//! Only the fields the writers consume are modelled; unknown keys are ignored.
//!
//! Go encodes `time.Duration` as integer nanoseconds and nil slices as `null`,
//! so both get dedicated deserializers below.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Aggregate result of one suite run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Report {
    pub suite_path: String,
    pub suite_description: String,
    #[serde(deserialize_with = "null_default")]
    pub suite_labels: Vec<String>,
    pub suite_succeeded: bool,
    pub suite_has_programmatic_focus: bool,
    #[serde(deserialize_with = "null_default")]
    pub special_suite_failure_reasons: Vec<String>,
    pub start_time: Option<DateTime<FixedOffset>>,
    pub end_time: Option<DateTime<FixedOffset>>,
    #[serde(deserialize_with = "go_duration")]
    pub run_time: Duration,
    pub suite_config: SuiteConfig,
    #[serde(deserialize_with = "null_default")]
    pub spec_reports: Vec<SpecReport>,
}

/// Run configuration captured by the test runner.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SuiteConfig {
    pub random_seed: i64,
    pub randomize_all_specs: bool,
    #[serde(deserialize_with = "null_default")]
    pub focus_strings: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub skip_strings: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub focus_files: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub skip_files: Vec<String>,
    pub label_filter: String,
    pub fail_on_pending: bool,
    pub fail_fast: bool,
    pub flake_attempts: i64,
    pub emit_spec_progress: bool,
    pub dry_run: bool,
    pub parallel_total: i64,
    pub output_interceptor_mode: String,
}

/// Result record for one executed node (an `It`, or a suite-level node such
/// as `BeforeSuite`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SpecReport {
    #[serde(deserialize_with = "null_default")]
    pub container_hierarchy_texts: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub container_hierarchy_locations: Vec<CodeLocation>,
    #[serde(deserialize_with = "null_labels")]
    pub container_hierarchy_labels: Vec<Vec<String>>,
    pub leaf_node_type: NodeType,
    pub leaf_node_location: CodeLocation,
    pub leaf_node_text: String,
    #[serde(deserialize_with = "null_default")]
    pub leaf_node_labels: Vec<String>,
    pub state: SpecState,
    pub start_time: Option<DateTime<FixedOffset>>,
    pub end_time: Option<DateTime<FixedOffset>>,
    #[serde(deserialize_with = "go_duration")]
    pub run_time: Duration,
    pub parallel_process: i64,
    pub num_attempts: i64,
    pub failure: Failure,
    pub captured_ginkgo_writer_output: String,
    pub captured_std_out_err: String,
    #[serde(deserialize_with = "null_default")]
    pub report_entries: Vec<ReportEntry>,
    #[serde(deserialize_with = "null_default")]
    pub progress_reports: Vec<ProgressReport>,
}

impl SpecReport {
    /// Container texts followed by the leaf text (when non-empty).
    pub fn texts(&self) -> Vec<&str> {
        let mut texts: Vec<&str> = self
            .container_hierarchy_texts
            .iter()
            .map(String::as_str)
            .collect();
        if !self.leaf_node_text.is_empty() {
            texts.push(&self.leaf_node_text);
        }
        texts
    }

    /// Space-joined hierarchy text, outermost container first.
    pub fn full_text(&self) -> String {
        self.texts().join(" ")
    }

    /// All labels in the hierarchy, outer containers first, then the leaf's.
    /// Duplicates keep their first position.
    pub fn labels(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let all = self
            .container_hierarchy_labels
            .iter()
            .flatten()
            .chain(self.leaf_node_labels.iter());
        for label in all {
            if !out.contains(label) {
                out.push(label.clone());
            }
        }
        out
    }

    /// [`full_text`](Self::full_text) with the labels appended as
    /// `" [l1, l2]"` when there are any.
    pub fn display_name(&self) -> String {
        let labels = self.labels();
        let text = self.full_text();
        if labels.is_empty() {
            text
        } else {
            format!("{text} [{}]", labels.join(", "))
        }
    }

    /// Labels attached to the outermost container.
    pub fn outer_labels(&self) -> &[String] {
        self.container_hierarchy_labels
            .first()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_it(&self) -> bool {
        self.leaf_node_type.is_it()
    }

    pub fn failed(&self) -> bool {
        self.state.is_failure()
    }

    pub fn failure_message(&self) -> &str {
        &self.failure.message
    }

    pub fn failure_location(&self) -> &CodeLocation {
        &self.failure.location
    }
}

/// Terminal state of a spec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecState {
    Pending,
    Skipped,
    Passed,
    Failed,
    Aborted,
    Panicked,
    Interrupted,
    #[serde(rename = "timedout")]
    TimedOut,
    /// Also used for state strings this build does not know.
    #[default]
    #[serde(other)]
    Invalid,
}

impl SpecState {
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            SpecState::Failed
                | SpecState::Aborted
                | SpecState::Panicked
                | SpecState::Interrupted
                | SpecState::TimedOut
        )
    }

    /// Parse the lowercase form Ginkgo writes (also accepted by the config
    /// layer for `omit_timelines_for`).
    pub fn parse(s: &str) -> Option<SpecState> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(SpecState::Pending),
            "skipped" => Some(SpecState::Skipped),
            "passed" => Some(SpecState::Passed),
            "failed" => Some(SpecState::Failed),
            "aborted" => Some(SpecState::Aborted),
            "panicked" => Some(SpecState::Panicked),
            "interrupted" => Some(SpecState::Interrupted),
            "timedout" => Some(SpecState::TimedOut),
            _ => None,
        }
    }
}

impl std::fmt::Display for SpecState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecState::Invalid => write!(f, "INVALID SPEC STATE"),
            SpecState::Pending => write!(f, "pending"),
            SpecState::Skipped => write!(f, "skipped"),
            SpecState::Passed => write!(f, "passed"),
            SpecState::Failed => write!(f, "failed"),
            SpecState::Aborted => write!(f, "aborted"),
            SpecState::Panicked => write!(f, "panicked"),
            SpecState::Interrupted => write!(f, "interrupted"),
            SpecState::TimedOut => write!(f, "timedout"),
        }
    }
}

/// Ginkgo node type of a leaf. Only `It` is interpreted; everything else is
/// carried through as its name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum NodeType {
    It,
    Other(String),
    #[default]
    Invalid,
}

impl NodeType {
    pub fn is_it(&self) -> bool {
        matches!(self, NodeType::It)
    }
}

impl From<String> for NodeType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "It" => NodeType::It,
            "" | "INVALID NODE TYPE" => NodeType::Invalid,
            _ => NodeType::Other(s),
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeType::It => write!(f, "It"),
            NodeType::Other(name) => write!(f, "{name}"),
            NodeType::Invalid => write!(f, "INVALID NODE TYPE"),
        }
    }
}

/// A source position, with an optional captured stack trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CodeLocation {
    pub file_name: String,
    pub line_number: i64,
    pub full_stack_trace: String,
}

impl CodeLocation {
    pub fn is_zero(&self) -> bool {
        self.file_name.is_empty() && self.line_number == 0 && self.full_stack_trace.is_empty()
    }
}

impl std::fmt::Display for CodeLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file_name, self.line_number)
    }
}

/// Failure detail attached to a spec that did not pass.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Failure {
    pub message: String,
    pub location: CodeLocation,
    pub forwarded_panic: String,
    pub failure_node_type: Option<NodeType>,
    pub progress_report: ProgressReport,
}

impl Failure {
    pub fn is_zero(&self) -> bool {
        self.message.is_empty() && self.location.is_zero()
    }
}

/// Where in the writer transcript a timeline event happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TimelineLocation {
    /// Byte offset into `CapturedGinkgoWriterOutput`.
    pub offset: usize,
    pub order: i64,
    pub time: Option<DateTime<FixedOffset>>,
}

/// Point-in-time snapshot of a running spec.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ProgressReport {
    pub message: String,
    #[serde(deserialize_with = "null_default")]
    pub container_hierarchy_texts: Vec<String>,
    pub leaf_node_text: String,
    pub leaf_node_location: CodeLocation,
    pub spec_start_time: Option<DateTime<FixedOffset>>,
    pub current_node_type: Option<NodeType>,
    pub current_node_text: String,
    pub current_node_location: CodeLocation,
    pub current_node_start_time: Option<DateTime<FixedOffset>>,
    pub current_step_text: String,
    pub current_step_location: CodeLocation,
    pub current_step_start_time: Option<DateTime<FixedOffset>>,
    #[serde(deserialize_with = "null_default")]
    pub additional_reports: Vec<String>,
    pub captured_ginkgo_writer_output: String,
    pub timeline_location: TimelineLocation,
}

impl ProgressReport {
    pub fn is_empty(&self) -> bool {
        *self == ProgressReport::default()
    }
}

/// A user-attached report entry (`AddReportEntry` in the suite).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReportEntry {
    pub name: String,
    pub location: CodeLocation,
    pub time: Option<DateTime<FixedOffset>>,
    pub value: ReportEntryValue,
}

impl ReportEntry {
    pub fn string_representation(&self) -> &str {
        &self.value.representation
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReportEntryValue {
    pub representation: String,
    #[serde(rename = "AsJSON")]
    pub as_json: String,
}

/// Decode a run-report document. Ginkgo writes a JSON array of reports; a
/// bare report object is accepted as well.
pub fn parse_reports(json: &str) -> crate::Result<Vec<Report>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ReportFile {
        Many(Vec<Report>),
        One(Box<Report>),
    }

    match serde_json::from_str(json)? {
        ReportFile::Many(reports) => Ok(reports),
        ReportFile::One(report) => Ok(vec![*report]),
    }
}

// ---------------------------------------------------------------------------
// Go encoding helpers
// ---------------------------------------------------------------------------

fn null_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

fn null_labels<'de, D>(d: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<Vec<String>>>> = Option::deserialize(d)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

fn go_duration<'de, D>(d: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let nanos = Option::<i64>::deserialize(d)?.unwrap_or(0);
    Ok(Duration::from_nanos(nanos.max(0) as u64))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
