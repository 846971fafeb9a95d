use thiserror::Error;

/// Errors that can occur while persisting to the event journal. These never
/// cross the public `append`/`read_from` boundary (§4.4, §7) — they are
/// logged and collapsed to a `bool`/empty result there — but are kept as a
/// typed enum internally so the failure mode is never ambiguous.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("failed to create journal directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open journal file {path}: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write journal entry to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised validating a configuration struct before use (§7).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("journal path must not be empty")]
    EmptyJournalPath,

    #[error("max_new_orders_per_scan must be >= 1, got {0}")]
    InvalidCapacity(i32),
}
