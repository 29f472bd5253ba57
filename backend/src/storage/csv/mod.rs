//! CSV file storage: one directory per baby under a base data directory.

pub mod connection;
pub mod event_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use event_repository::CsvEventRepository;
