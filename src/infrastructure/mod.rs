//! I/O-performing adapters. Everything here is a concrete boundary the
//! domain/application layers only ever see through a trait or a plain value.

pub mod journal;

pub use journal::{EventJournal, JournalConfig};
