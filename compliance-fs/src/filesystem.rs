//! Filesystem abstraction for compliance checks.
//!
//! Reads report, exception, and expectation files, and writes normalized
//! profile reports as pretty-printed JSON.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use compliance_schema::{ProfileReport, ReportError};
use thiserror::Error;

/// Errors from filesystem operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("path error: {0}")]
    Path(String),

    #[error("encode error: {0}")]
    Encode(#[from] ReportError),
}

/// Trait for filesystem operations.
/// Abstracted for testing with mock implementations.
pub trait Filesystem: Send + Sync {
    /// Write data atomically to a path (write to temp, then rename).
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), FsError>;

    /// Read file contents as a string.
    fn read_file(&self, path: &Path) -> Result<String, FsError>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create directory and parents if needed.
    fn create_dir_all(&self, path: &Path) -> Result<(), FsError>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFilesystem;

impl Filesystem for RealFilesystem {
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, data)?;

        // Rename is atomic on most filesystems
        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<String, FsError> {
        Ok(fs::read_to_string(path)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        fs::create_dir_all(path)?;
        Ok(())
    }
}

/// Mock filesystem for testing.
/// Cloning creates a new handle to the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MockFilesystem {
    files: Arc<RwLock<HashMap<PathBuf, Vec<u8>>>>,
    dirs: Arc<RwLock<HashSet<PathBuf>>>,
}

impl MockFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all files in the mock filesystem.
    pub fn files(&self) -> HashMap<PathBuf, Vec<u8>> {
        self.files.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Get content of a specific file.
    pub fn get_file(&self, path: &Path) -> Option<Vec<u8>> {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Add a file directly (for test setup).
    pub fn add_file(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), data.into());
    }
}

impl Filesystem for MockFilesystem {
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        self.add_file(path, data);
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<String, FsError> {
        match self.get_file(path) {
            Some(data) => {
                String::from_utf8(data).map_err(|e| FsError::Path(format!("invalid utf8: {}", e)))
            }
            None => Err(FsError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            ))),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
            || self
                .dirs
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        self.dirs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf());
        Ok(())
    }
}

/// File name for a normalized profile report.
///
/// Profile names like `nist_800_53:rev4` carry characters that are awkward
/// in file names. Every byte outside `[A-Za-z0-9_.-]` is written as `%XX`,
/// so distinct profiles never share a file.
pub fn normalized_filename(profile: &str) -> String {
    let mut stem = String::with_capacity(profile.len());
    for byte in profile.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'.') {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("%{:02X}", byte));
        }
    }
    format!("{}.normalized.json", stem)
}

/// Writes normalized profile reports into an output directory.
pub struct NormalizedReportWriter<F: Filesystem> {
    fs: F,
    output_dir: PathBuf,
}

impl<F: Filesystem> NormalizedReportWriter<F> {
    pub fn new(fs: F, output_dir: PathBuf) -> Self {
        Self { fs, output_dir }
    }

    /// Get the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write one profile's normalized report, returning its path.
    pub fn write(&self, profile: &str, report: &ProfileReport) -> Result<PathBuf, FsError> {
        self.fs.create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join(normalized_filename(profile));
        let mut json = report.to_json_pretty()?;
        json.push('\n');
        self.fs.write_atomic(&path, json.as_bytes())?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // ===========================================
    // Test Category D — Filesystem / Writer
    // ===========================================

    // --- Normalized file naming ---

    #[test]
    fn test_normalized_filename_plain_profile() {
        assert_eq!(normalized_filename("disa_stig"), "disa_stig.normalized.json");
    }

    #[test]
    fn test_normalized_filename_escapes_separators() {
        assert_eq!(
            normalized_filename("nist_800_53:rev4"),
            "nist_800_53%3Arev4.normalized.json"
        );
        assert_eq!(normalized_filename("a/b c"), "a%2Fb%20c.normalized.json");
        assert_eq!(normalized_filename("100%"), "100%25.normalized.json");
        assert_eq!(normalized_filename("cis:é"), "cis%3A%C3%A9.normalized.json");
    }

    #[test]
    fn test_normalized_filename_distinct_profiles_never_collide() {
        let profiles = ["nist:rev4", "nist_rev4", "nist/rev4", "nist%3Arev4", "nist%rev4"];
        let names: HashSet<String> = profiles.iter().map(|p| normalized_filename(p)).collect();
        assert_eq!(names.len(), profiles.len());
    }

    // --- Mock filesystem ---

    #[test]
    fn test_mock_write_atomic() {
        let fs = MockFilesystem::new();
        let path = PathBuf::from("/out/report.json");
        fs.write_atomic(&path, b"{}").unwrap();
        assert_eq!(fs.get_file(&path), Some(b"{}".to_vec()));
    }

    #[test]
    fn test_mock_write_atomic_overwrites() {
        let fs = MockFilesystem::new();
        let path = PathBuf::from("/out/report.json");
        fs.write_atomic(&path, b"first").unwrap();
        fs.write_atomic(&path, b"second").unwrap();
        assert_eq!(fs.read_file(&path).unwrap(), "second");
    }

    #[test]
    fn test_mock_read_file_not_found() {
        let fs = MockFilesystem::new();
        let result = fs.read_file(Path::new("/missing.json"));
        match result {
            Err(FsError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_mock_read_file_invalid_utf8() {
        let fs = MockFilesystem::new();
        fs.add_file("/bad.json", vec![0xff, 0xfe]);
        assert!(matches!(fs.read_file(Path::new("/bad.json")), Err(FsError::Path(_))));
    }

    #[test]
    fn test_mock_exists() {
        let fs = MockFilesystem::new();
        assert!(!fs.exists(Path::new("/dir")));
        fs.create_dir_all(Path::new("/dir")).unwrap();
        assert!(fs.exists(Path::new("/dir")));

        fs.add_file("/dir/report.json", "{}");
        assert!(fs.exists(Path::new("/dir/report.json")));
    }

    #[test]
    fn test_mock_clone_shares_state() {
        let fs = MockFilesystem::new();
        let handle = fs.clone();
        handle.add_file("/shared.json", "{}");
        assert_eq!(fs.files().len(), 1);
    }

    #[test]
    fn test_filesystem_trait_object() {
        let fs: Box<dyn Filesystem> = Box::new(MockFilesystem::new());
        fs.write_atomic(Path::new("/x.json"), b"1").unwrap();
        assert_eq!(fs.read_file(Path::new("/x.json")).unwrap(), "1");
    }

    // --- Normalized report writer ---

    #[test]
    fn test_writer_creates_dir_and_file() {
        let fs = MockFilesystem::new();
        let writer = NormalizedReportWriter::new(fs.clone(), PathBuf::from("/out"));

        let path = writer
            .write("nist_800_53:rev4", &ProfileReport::new(99.0))
            .unwrap();

        assert_eq!(path, PathBuf::from("/out/nist_800_53%3Arev4.normalized.json"));
        assert!(fs.exists(Path::new("/out")));
        let written = fs.read_file(&path).unwrap();
        assert!(written.ends_with('\n'));
        let decoded = ProfileReport::from_json(&written).unwrap();
        assert_eq!(decoded, ProfileReport::new(99.0));
    }

    #[test]
    fn test_writer_output_dir() {
        let writer = NormalizedReportWriter::new(MockFilesystem::new(), PathBuf::from("/out"));
        assert_eq!(writer.output_dir(), Path::new("/out"));
    }

    // --- Real filesystem ---

    #[test]
    fn test_real_fs_write_atomic_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        RealFilesystem.write_atomic(&path, b"{\"a\":1}").unwrap();
        assert_eq!(RealFilesystem.read_file(&path).unwrap(), "{\"a\":1}");
        assert!(!dir.path().join("report.tmp").exists());
    }

    #[test]
    fn test_real_fs_failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        // A non-empty directory cannot be replaced by a file.
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();

        let result = RealFilesystem.write_atomic(&path, b"{}");

        assert!(matches!(result, Err(FsError::Io(_))));
        assert!(!dir.path().join("report.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_real_fs_create_dir_all_and_exists() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/c");

        assert!(!RealFilesystem.exists(&nested));
        RealFilesystem.create_dir_all(&nested).unwrap();
        assert!(RealFilesystem.exists(&nested));
    }

    #[test]
    fn test_real_fs_writer_roundtrip() {
        let dir = tempdir().unwrap();
        let writer = NormalizedReportWriter::new(RealFilesystem, dir.path().join("normalized"));

        let report = ProfileReport::new(100.0).with_documented_missing_resources(["Class[Foo]"]);
        let path = writer.write("disa_stig", &report).unwrap();

        let decoded = ProfileReport::from_json(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(decoded, report);
    }
}
