//! Compliance Report Schema
//!
//! Defines the compliance report document written by the system under test
//! and the sections the normalizer understands.

mod report;

pub use report::{
    ComplianceReport, NonCompliantEntry, ProfileReport, ReportError, Section, Summary,
};
