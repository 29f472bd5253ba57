use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use csv::{ByteRecord, ReaderBuilder, WriterBuilder};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use tracing::{info, warn};

use super::connection::{CsvConnection, EVENTS_CSV_HEADER};
use crate::domain::models::event::{Event, EventRecord};
use crate::storage::traits::EventStorage;

/// CSV-based event repository, one `events.csv` per baby
#[derive(Clone)]
pub struct CsvEventRepository {
    connection: CsvConnection,
}

/// One row of `events.csv`. Rows that do not load as events are kept
/// byte-for-byte so a rewrite of the file never drops them.
enum StoredRow {
    Event(Event),
    Unreadable(ByteRecord),
}

impl StoredRow {
    /// Event id, taken from the first column for unreadable rows
    fn id(&self) -> Option<i64> {
        match self {
            StoredRow::Event(event) => Some(event.id),
            StoredRow::Unreadable(raw) => raw
                .get(0)
                .and_then(|field| std::str::from_utf8(field).ok())
                .and_then(|field| field.trim().parse().ok()),
        }
    }
}

impl CsvEventRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read every row of a baby's file. Rows that fail to parse or validate
    /// are logged and kept raw; an I/O failure aborts the read.
    fn read_rows(&self, baby_id: i64) -> Result<Vec<StoredRow>> {
        let file_path = self.connection.get_events_file_path(baby_id);
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&file_path)?);
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.byte_headers()?.clone();

        let mut rows = Vec::new();
        for (index, result) in csv_reader.byte_records().enumerate() {
            let raw = result?;
            let loaded = raw
                .deserialize::<EventRecord>(Some(&headers))
                .map_err(|e| e.to_string())
                .and_then(|record| record.into_event().map_err(|e| e.to_string()));

            match loaded {
                Ok(event) => rows.push(StoredRow::Event(event)),
                Err(reason) => {
                    warn!(
                        "Ignoring unreadable row {} in {} (kept on disk): {}",
                        index + 1,
                        file_path.display(),
                        reason
                    );
                    rows.push(StoredRow::Unreadable(raw));
                }
            }
        }

        Ok(rows)
    }

    fn read_events(&self, baby_id: i64) -> Result<Vec<Event>> {
        Ok(self
            .read_rows(baby_id)?
            .into_iter()
            .filter_map(|row| match row {
                StoredRow::Event(event) => Some(event),
                StoredRow::Unreadable(_) => None,
            })
            .collect())
    }

    /// Rewrite a baby's CSV file through a temporary file and rename
    fn write_rows(&self, baby_id: i64, rows: &[StoredRow]) -> Result<()> {
        self.connection.ensure_events_file_exists(baby_id)?;
        let file_path = self.connection.get_events_file_path(baby_id);
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(EVENTS_CSV_HEADER.as_bytes())?;

            let mut csv_writer = WriterBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_writer(writer);
            for row in rows {
                match row {
                    StoredRow::Event(event) => csv_writer.serialize(EventRecord::from(event))?,
                    StoredRow::Unreadable(raw) => csv_writer.write_byte_record(raw)?,
                }
            }
            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

#[async_trait]
impl EventStorage for CsvEventRepository {
    async fn store_event(&self, event: &Event) -> Result<()> {
        let lock = self.connection.write_lock();
        let _guard = lock.lock().await;

        let mut rows = self.read_rows(event.baby_id)?;
        if rows.iter().any(|row| row.id() == Some(event.id)) {
            bail!("Event {} already exists for baby {}", event.id, event.baby_id);
        }
        rows.push(StoredRow::Event(event.clone()));
        self.write_rows(event.baby_id, &rows)?;

        info!("💾 Stored {} event {} for baby {}", event.event_type(), event.id, event.baby_id);
        Ok(())
    }

    async fn get_event(&self, baby_id: i64, event_id: i64) -> Result<Option<Event>> {
        let events = self.read_events(baby_id)?;
        Ok(events.into_iter().find(|e| e.id == event_id))
    }

    async fn list_events(
        &self,
        baby_id: i64,
        start: Option<DateTime<FixedOffset>>,
        end: Option<DateTime<FixedOffset>>,
    ) -> Result<Vec<Event>> {
        let mut events = self.read_events(baby_id)?;
        events.retain(|e| {
            start.map_or(true, |start| e.occurred_at >= start) && end.map_or(true, |end| e.occurred_at <= end)
        });
        events.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at).then(b.id.cmp(&a.id)));
        Ok(events)
    }

    async fn delete_event(&self, baby_id: i64, event_id: i64) -> Result<bool> {
        let lock = self.connection.write_lock();
        let _guard = lock.lock().await;

        let mut rows = self.read_rows(baby_id)?;
        let before = rows.len();
        rows.retain(|row| !matches!(row, StoredRow::Event(event) if event.id == event_id));
        if rows.len() == before {
            return Ok(false);
        }

        self.write_rows(baby_id, &rows)?;
        info!("🗑️ Deleted event {} for baby {}", event_id, baby_id);
        Ok(true)
    }

    /// Counts ids on unreadable rows too, so a repaired row never collides
    async fn next_event_id(&self) -> Result<i64> {
        let mut max_id = 0;
        for baby_id in self.connection.list_baby_ids()? {
            if let Some(id) = self.read_rows(baby_id)?.iter().filter_map(StoredRow::id).max() {
                max_id = max_id.max(id);
            }
        }
        Ok(max_id + 1)
    }
}
