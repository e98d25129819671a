//! JUnit XML report for a Ginkgo run.
//!
//! Derived from Ginkgo's own JUnit reporter, with two changes: test-case
//! names go through [`shortened_name`] so they are usable as directory names
//! downstream, and classnames come from the suite label of the outermost
//! container instead of the suite description.
//!
//! Only `It` leaves become test cases. `Aborted` specs are written as a
//! failure element but counted as errors, as Ginkgo's own reporter does.

use crate::xml::{clean, write_document};
use e2e_report_core::config::JunitConfig;
use e2e_report_core::naming::{classname_from_report, shortened_name};
use e2e_report_core::output::{interrupt_description, system_err, system_out};
use e2e_report_core::{Report, Result, SpecReport, SpecState};
use serde::Serialize;
use std::path::Path;

/// Start-time layout for the suite `timestamp` attribute.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// What Go prints for an unset `time.Time` in [`TIMESTAMP_FORMAT`].
const ZERO_TIMESTAMP: &str = "0001-01-01T00:00:00";

// ---------------------------------------------------------------------------
// Document model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JUnitTestSuites {
    #[serde(rename = "@tests")]
    pub tests: u64,
    #[serde(rename = "@disabled")]
    pub disabled: u64,
    #[serde(rename = "@errors")]
    pub errors: u64,
    #[serde(rename = "@failures")]
    pub failures: u64,
    #[serde(rename = "@time")]
    pub time: f64,
    #[serde(rename = "testsuite")]
    pub test_suites: Vec<JUnitTestSuite>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JUnitTestSuite {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@package")]
    pub package: String,
    #[serde(rename = "@tests")]
    pub tests: u64,
    #[serde(rename = "@disabled")]
    pub disabled: u64,
    #[serde(rename = "@skipped")]
    pub skipped: u64,
    #[serde(rename = "@errors")]
    pub errors: u64,
    #[serde(rename = "@failures")]
    pub failures: u64,
    #[serde(rename = "@time")]
    pub time: f64,
    #[serde(rename = "@timestamp")]
    pub timestamp: String,
    pub properties: JUnitProperties,
    #[serde(rename = "testcase")]
    pub test_cases: Vec<JUnitTestCase>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JUnitProperties {
    #[serde(rename = "property")]
    pub properties: Vec<JUnitProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JUnitProperty {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@value")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JUnitTestCase {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@classname")]
    pub classname: String,
    #[serde(rename = "@status")]
    pub status: String,
    #[serde(rename = "@time")]
    pub time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<JUnitSkipped>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JUnitError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<JUnitFailure>,
    #[serde(rename = "system-out", skip_serializing_if = "String::is_empty")]
    pub system_out: String,
    #[serde(rename = "system-err", skip_serializing_if = "String::is_empty")]
    pub system_err: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JUnitSkipped {
    #[serde(rename = "@message")]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JUnitError {
    #[serde(rename = "@message")]
    pub message: String,
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "$text")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JUnitFailure {
    #[serde(rename = "@message")]
    pub message: String,
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "$text")]
    pub description: String,
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Write the JUnit report for `report` to `dst` with default settings.
pub fn generate_junit_report(report: &Report, dst: &Path) -> Result<()> {
    generate_junit_report_with_config(report, dst, &JunitConfig::default())
}

/// Write the JUnit report for `report` to `dst`.
///
/// Fails if the file cannot be created or written, or if encoding fails.
pub fn generate_junit_report_with_config(
    report: &Report,
    dst: &Path,
    config: &JunitConfig,
) -> Result<()> {
    let doc = build_junit_report(report, config);
    write_document(dst, "testsuites", &doc)?;
    tracing::info!(
        path = %dst.display(),
        tests = doc.tests,
        failures = doc.failures,
        errors = doc.errors,
        "junit report written"
    );
    Ok(())
}

/// Assemble the JUnit document tree without writing it.
pub fn build_junit_report(report: &Report, config: &JunitConfig) -> JUnitTestSuites {
    let mut suite = JUnitTestSuite {
        name: clean(&report.suite_description),
        package: clean(&report.suite_path),
        time: report.run_time.as_secs_f64(),
        timestamp: report
            .start_time
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| ZERO_TIMESTAMP.to_string()),
        properties: suite_properties(report),
        ..Default::default()
    };

    for spec in report.spec_reports.iter().filter(|s| s.is_it()) {
        let test = test_case(spec, config, &mut suite);
        tracing::debug!(name = %test.name, state = %spec.state, "junit test case");
        suite.tests += 1;
        suite.test_cases.push(test);
    }

    tracing::debug!(
        suite = %suite.name,
        tests = suite.tests,
        skipped = suite.skipped,
        disabled = suite.disabled,
        "junit suite assembled"
    );

    JUnitTestSuites {
        tests: suite.tests,
        disabled: suite.disabled + suite.skipped,
        errors: suite.errors,
        failures: suite.failures,
        time: suite.time,
        test_suites: vec![suite],
    }
}

/// Map one spec to a test case, bumping the matching suite counter.
fn test_case(spec: &SpecReport, config: &JunitConfig, suite: &mut JUnitTestSuite) -> JUnitTestCase {
    let mut test = JUnitTestCase {
        name: clean(&shortened_name(spec)),
        classname: clean(&classname_from_report(spec)),
        status: spec.state.to_string(),
        time: spec.run_time.as_secs_f64(),
        ..Default::default()
    };
    if !config.omits_timeline(spec.state) {
        test.system_err = clean(&system_err(spec));
    }
    if !config.omit_captured_output {
        test.system_out = clean(&system_out(spec));
    }

    let failure = &spec.failure;
    match spec.state {
        SpecState::Skipped => {
            let mut message = "skipped".to_string();
            if !failure.message.is_empty() {
                message.push_str(" - ");
                message.push_str(&failure.message);
            }
            test.skipped = Some(JUnitSkipped { message: clean(&message) });
            suite.skipped += 1;
        }
        SpecState::Pending => {
            test.skipped = Some(JUnitSkipped { message: "pending".to_string() });
            suite.disabled += 1;
        }
        SpecState::Failed => {
            test.failure = Some(failure_element(spec, "failed"));
            suite.failures += 1;
        }
        SpecState::TimedOut => {
            test.failure = Some(failure_element(spec, "timedout"));
            suite.failures += 1;
        }
        SpecState::Interrupted => {
            test.error = Some(JUnitError {
                message: "interrupted".to_string(),
                kind: "interrupted".to_string(),
                description: clean(&interrupt_description(failure)),
            });
            suite.errors += 1;
        }
        SpecState::Aborted => {
            test.failure = Some(failure_element(spec, "aborted"));
            suite.errors += 1;
        }
        SpecState::Panicked => {
            test.error = Some(JUnitError {
                message: clean(&failure.forwarded_panic),
                kind: "panicked".to_string(),
                description: location_description(spec),
            });
            suite.errors += 1;
        }
        SpecState::Passed | SpecState::Invalid => {}
    }
    test
}

fn failure_element(spec: &SpecReport, kind: &str) -> JUnitFailure {
    JUnitFailure {
        message: clean(&spec.failure.message),
        kind: kind.to_string(),
        description: location_description(spec),
    }
}

fn location_description(spec: &SpecReport) -> String {
    let location = &spec.failure.location;
    clean(&format!("{location}\n{}", location.full_stack_trace))
}

/// Suite-level properties, in the fixed order report consumers expect.
pub fn suite_properties(report: &Report) -> JUnitProperties {
    let config = &report.suite_config;
    let props: [(&str, String); 18] = [
        ("SuiteSucceeded", report.suite_succeeded.to_string()),
        ("SuiteHasProgrammaticFocus", report.suite_has_programmatic_focus.to_string()),
        ("SpecialSuiteFailureReason", report.special_suite_failure_reasons.join(",")),
        ("SuiteLabels", format!("[{}]", report.suite_labels.join(","))),
        ("RandomSeed", config.random_seed.to_string()),
        ("RandomizeAllSpecs", config.randomize_all_specs.to_string()),
        ("LabelFilter", config.label_filter.clone()),
        ("FocusStrings", config.focus_strings.join(",")),
        ("SkipStrings", config.skip_strings.join(",")),
        ("FocusFiles", config.focus_files.join(";")),
        ("SkipFiles", config.skip_files.join(";")),
        ("FailOnPending", config.fail_on_pending.to_string()),
        ("FailFast", config.fail_fast.to_string()),
        ("FlakeAttempts", config.flake_attempts.to_string()),
        ("EmitSpecProgress", config.emit_spec_progress.to_string()),
        ("DryRun", config.dry_run.to_string()),
        ("ParallelTotal", config.parallel_total.to_string()),
        ("OutputInterceptorMode", config.output_interceptor_mode.clone()),
    ];
    JUnitProperties {
        properties: props
            .into_iter()
            .map(|(name, value)| JUnitProperty {
                name: name.to_string(),
                value: clean(&value),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
