//! Polarion test-case import document.
//!
//! Every outermost container becomes one Polarion test case; each `It` under
//! it becomes a step. Case metadata is read from bracketed tags in the
//! container title, e.g.
//! `[build-service-suite Build] [test_id:42] [crit:high] [rfe_id:7]`.
//!
//! Cases are written in the order their first spec appears in the run, so
//! the output is stable across runs of the same suite.

use crate::xml::{clean, write_document};
use e2e_report_core::config::PolarionConfig;
use e2e_report_core::{Report, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Marker that precedes the repository-relative path of a test source file.
pub const TEST_SOURCE_MARKER: &str = "/e2e-tests/tests/";

const EXPECTED_RESULT: &str = "Succeeded";

// ---------------------------------------------------------------------------
// Document model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestCases {
    #[serde(rename = "@project-id")]
    pub project_id: String,
    pub properties: PolarionProperties,
    #[serde(rename = "testcase")]
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PolarionProperties {
    #[serde(rename = "property")]
    pub properties: Vec<PolarionProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PolarionProperty {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@value")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestCase {
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: Text,
    pub description: Text,
    #[serde(rename = "custom-fields")]
    pub custom_fields: CustomFields,
    #[serde(rename = "linked-work-items")]
    pub linked_work_items: LinkedWorkItems,
    #[serde(rename = "test-steps", skip_serializing_if = "Option::is_none")]
    pub test_steps: Option<TestSteps>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Text {
    #[serde(rename = "$text")]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomFields {
    #[serde(rename = "custom-field")]
    pub fields: Vec<CustomField>,
}

impl CustomFields {
    fn add(&mut self, id: &str, content: &str) {
        self.fields.push(CustomField {
            content: clean(content),
            id: id.to_string(),
        });
    }

    /// Content of the first field with `id`.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.content.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomField {
    #[serde(rename = "@content")]
    pub content: String,
    #[serde(rename = "@id")]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkedWorkItems {
    #[serde(rename = "linked-work-item")]
    pub items: Vec<LinkedWorkItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkedWorkItem {
    #[serde(rename = "@workitem-id")]
    pub id: String,
    #[serde(rename = "@role-id")]
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestSteps {
    #[serde(rename = "test-step")]
    pub steps: Vec<TestStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestStep {
    #[serde(rename = "test-step-column")]
    pub columns: Vec<TestStepColumn>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestStepColumn {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "$text")]
    pub content: String,
}

impl TestStep {
    fn new(content: &str) -> Self {
        Self {
            columns: vec![
                TestStepColumn { id: "step".to_string(), content: clean(content) },
                TestStepColumn { id: "expectedResult".to_string(), content: EXPECTED_RESULT.to_string() },
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Title tags
// ---------------------------------------------------------------------------

/// Metadata parsed from the bracketed tags of a case title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleTags {
    pub case_id: Option<String>,
    pub rfe_id: Option<String>,
    pub criticality: String,
    pub posneg: String,
    pub level: String,
    pub component: String,
}

impl TitleTags {
    /// Parse `title`. `component` is the fallback used when no `component:`
    /// tag is present; IDs are prefixed with `project_id`.
    pub fn parse(title: &str, component: &str, project_id: &str) -> Self {
        let mut tags = TitleTags {
            case_id: None,
            rfe_id: None,
            criticality: "medium".to_string(),
            posneg: "positive".to_string(),
            level: "component".to_string(),
            component: component.to_string(),
        };

        let normalized = title.replace([']', '['], ",");
        for attr in normalized.split(',').map(|a| a.trim_matches(' ')) {
            if let Some(v) = tag_value(attr, "test_id:") {
                tags.case_id = Some(format!("{project_id}-{v}"));
            } else if let Some(v) = tag_value(attr, "rfe_id:") {
                tags.rfe_id = Some(format!("{project_id}-{v}"));
            } else if let Some(v) = tag_value(attr, "crit:") {
                tags.criticality = v.to_string();
            } else if let Some(v) = tag_value(attr, "posneg:") {
                tags.posneg = v.to_string();
            } else if let Some(v) = tag_value(attr, "level:") {
                tags.level = v.to_string();
            } else if let Some(v) = tag_value(attr, "component:") {
                tags.component = v.to_string();
            }
        }
        tags
    }
}

/// First space-separated word after `key`, if `attr` contains `key`.
fn tag_value<'a>(attr: &'a str, key: &str) -> Option<&'a str> {
    let (_, after) = attr.split_once(key)?;
    let after = after.split(key).next().unwrap_or(after);
    after.trim_matches(' ').split(' ').next()
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// The part of `filename` starting at the last [`TEST_SOURCE_MARKER`], or
/// `None` when the file does not live under the e2e tests tree.
pub fn test_source_from_filename(filename: &str) -> Option<&str> {
    filename
        .rfind(TEST_SOURCE_MARKER)
        .map(|n| &filename[n..])
}

/// The directory directly under `tests/`, which names the component under
/// test (`/e2e-tests/tests/<component>/...`).
pub fn component_from_filename(filename: &str) -> Option<&str> {
    test_source_from_filename(filename)?.split('/').nth(3)
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Write the Polarion document for `report` to `dst` (dry-run off).
pub fn generate_polarion_report(report: &Report, dst: &Path, project_id: &str) -> Result<()> {
    let config = PolarionConfig {
        project_id: project_id.to_string(),
        dry_run: false,
    };
    generate_polarion_report_with_config(report, dst, &config)
}

pub fn generate_polarion_report_with_config(
    report: &Report,
    dst: &Path,
    config: &PolarionConfig,
) -> Result<()> {
    let doc = build_polarion_report(report, config);
    write_document(dst, "testcases", &doc)?;
    tracing::info!(
        path = %dst.display(),
        cases = doc.test_cases.len(),
        project = %config.project_id,
        "polarion report written"
    );
    Ok(())
}

struct CaseGroup<'a> {
    title: &'a str,
    filename: &'a str,
    labels: String,
    steps: Vec<String>,
}

/// Assemble the Polarion document tree without writing it.
pub fn build_polarion_report(report: &Report, config: &PolarionConfig) -> TestCases {
    let mut doc = TestCases {
        project_id: config.project_id.clone(),
        properties: PolarionProperties {
            properties: vec![
                property("lookup-method", "custom"),
                property("custom-lookup-method-field-id", "customId"),
                property("dry-run", &config.dry_run.to_string()),
            ],
        },
        test_cases: Vec::new(),
    };

    let mut groups: Vec<CaseGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for spec in report.spec_reports.iter().filter(|s| s.is_it()) {
        let Some((title, inner)) = spec.container_hierarchy_texts.split_first() else {
            tracing::warn!(leaf = %spec.leaf_node_text, "spec has no container; not exported to polarion");
            continue;
        };
        let step: String = inner
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(spec.leaf_node_text.as_str()))
            .collect();

        match index.get(title.as_str()) {
            Some(&i) => groups[i].steps.push(step),
            None => {
                index.insert(title, groups.len());
                groups.push(CaseGroup {
                    title,
                    filename: &spec.leaf_node_location.file_name,
                    labels: spec.outer_labels().join(","),
                    steps: vec![step],
                });
            }
        }
    }

    for group in groups {
        doc.test_cases.push(test_case(group, &config.project_id));
    }
    doc
}

fn test_case(group: CaseGroup<'_>, project_id: &str) -> TestCase {
    let source = test_source_from_filename(group.filename);
    if source.is_none() {
        tracing::warn!(
            file = %group.filename,
            marker = TEST_SOURCE_MARKER,
            "test source outside the e2e tests tree; automation script and component left empty"
        );
    }

    let mut case = TestCase {
        title: Text { content: clean(group.title) },
        description: Text { content: clean(group.title) },
        ..Default::default()
    };

    let fields = &mut case.custom_fields;
    fields.add("caseautomation", "automated");
    fields.add("testtype", "functional");
    fields.add("automation_script", source.unwrap_or_default());
    fields.add("tags", &group.labels);

    if !group.steps.is_empty() {
        // Steps are prepended as they are discovered.
        let steps = group.steps.iter().rev().map(|s| TestStep::new(s)).collect();
        case.test_steps = Some(TestSteps { steps });
    }

    let fallback = component_from_filename(group.filename).unwrap_or_default();
    let tags = TitleTags::parse(group.title, fallback, project_id);

    let fields = &mut case.custom_fields;
    fields.add("customId", tags.case_id.as_deref().unwrap_or_default());
    fields.add("caseimportance", &tags.criticality);
    fields.add("caseposneg", &tags.posneg);
    fields.add("caselevel", &tags.level);
    if let Some(rfe) = tags.rfe_id {
        case.linked_work_items.items.push(LinkedWorkItem {
            id: clean(&rfe),
            role: "verifies".to_string(),
        });
    }
    if !tags.component.is_empty() {
        case.custom_fields.add("casecomponent", &tags.component);
    }
    case.id = tags.case_id.map(|id| clean(&id));
    case
}

fn property(name: &str, value: &str) -> PolarionProperty {
    PolarionProperty {
        name: name.to_string(),
        value: value.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
