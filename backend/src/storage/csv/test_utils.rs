//! Test utilities for CSV storage tests.
//!
//! RAII-based cleanup: test data is removed even if a test panics.

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::CsvConnection;

/// Test environment that removes its data directory on drop
pub struct TestEnvironment {
    /// Kept alive until drop so the directory is not removed early
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        if std::env::var("BABY_TRACKER_DEBUG_TESTS").is_ok() {
            println!("🧹 Cleaning up test environment: {:?}", self.base_path);
        }
    }
}
