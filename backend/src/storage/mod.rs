//! # Storage Module
//!
//! Persistence for logged events. The domain layer only sees the
//! [`EventStorage`] trait; the CSV backend is the implementation wired in
//! by default.
//!
//! ## Layout on disk
//!
//! ```text
//! <data directory>/
//!     config.yaml          (optional)
//!     baby_1/events.csv
//!     baby_2/events.csv
//! ```

pub mod csv;
pub mod traits;

pub use self::csv::{CsvConnection, CsvEventRepository};
pub use traits::{Connection, EventStorage};
