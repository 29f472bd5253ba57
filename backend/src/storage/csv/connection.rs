use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use super::event_repository::CsvEventRepository;
use crate::storage::traits::Connection;

/// Header row of every `events.csv`
pub const EVENTS_CSV_HEADER: &str =
    "id,baby_id,event_type,occurred_at,end_date,feeding_type,amount,duration,diaper_type,note\n";

const BABY_DIRECTORY_PREFIX: &str = "baby_";

/// CsvConnection manages file paths and ensures CSV files exist for each baby
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    /// Held for the whole read-modify-write cycle of a file rewrite
    write_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            info!("📁 Creating data directory: {}", base_path.display());
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Directory holding one baby's data
    pub fn get_baby_directory(&self, baby_id: i64) -> PathBuf {
        self.base_directory
            .join(format!("{}{}", BABY_DIRECTORY_PREFIX, baby_id))
    }

    pub fn get_events_file_path(&self, baby_id: i64) -> PathBuf {
        self.get_baby_directory(baby_id).join("events.csv")
    }

    /// Ensure the events CSV exists with a header row
    pub fn ensure_events_file_exists(&self, baby_id: i64) -> Result<()> {
        let baby_dir = self.get_baby_directory(baby_id);
        if !baby_dir.exists() {
            fs::create_dir_all(&baby_dir)?;
        }

        let file_path = baby_dir.join("events.csv");
        if !file_path.exists() {
            fs::write(&file_path, EVENTS_CSV_HEADER)?;
        }

        Ok(())
    }

    /// Every baby that has a data directory
    pub fn list_baby_ids(&self) -> Result<Vec<i64>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.base_directory)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            if let Some(id) = name
                .to_str()
                .and_then(|n| n.strip_prefix(BABY_DIRECTORY_PREFIX))
                .and_then(|n| n.parse::<i64>().ok())
            {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    pub(crate) fn write_lock(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.write_lock)
    }
}

impl Connection for CsvConnection {
    type EventRepository = CsvEventRepository;

    fn create_event_repository(&self) -> Self::EventRepository {
        CsvEventRepository::new(self.clone())
    }
}
