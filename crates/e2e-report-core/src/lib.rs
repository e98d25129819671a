//! e2e-report-core — run-report model and text rules for e2e-report.
//!
//! This crate holds everything that is a pure function of a finished Ginkgo
//! run report, plus the shared configuration and error types.
//!
//! # Architecture
//!
//! ```text
//! report.json ──► types ──► naming ──┐
//!                   │                ├──► e2e-report-export (JUnit, Polarion, rp_preproc)
//!                   └────► output ───┘
//!                           │
//!                        progress
//! ```
//!
//! `logs` is independent: it trims raw pod logs to a cutoff timestamp.

pub mod config;
pub mod error;
pub mod logs;
pub mod naming;
pub mod output;
pub mod progress;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    CodeLocation, Failure, NodeType, ProgressReport, Report, ReportEntry, SpecReport, SpecState,
    SuiteConfig,
};
