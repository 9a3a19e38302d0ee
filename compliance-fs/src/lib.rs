//! Filesystem abstraction for compliance checks.
//!
//! This crate provides:
//! - Filesystem trait for reads and atomic writes
//! - NormalizedReportWriter for persisting normalized profile reports

pub mod filesystem;

pub use filesystem::{
    normalized_filename, Filesystem, FsError, MockFilesystem, NormalizedReportWriter,
    RealFilesystem,
};
