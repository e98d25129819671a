//! e2e-report-export — artefact writers for e2e-report.
//!
//! Each writer takes a decoded [`e2e_report_core::Report`] and produces one
//! artefact on disk: a JUnit XML report, a Polarion test-case import, or the
//! Report Portal attachment tree for failed specs.

pub mod attachments;
pub mod junit;
pub mod polarion;
pub mod xml;

pub use attachments::{generate_rp_preproc_report, AttachmentSummary};
pub use junit::{generate_junit_report, generate_junit_report_with_config};
pub use polarion::{generate_polarion_report, generate_polarion_report_with_config};
