//! JSONL event journal (§4.4): durable, append-only, single-writer-safe.
//! Grounded directly on `EventJournalJsonl.cpp` — constructor scan-and-
//! recover, mutex-serialized append/read, field-level tolerance on replay.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;
use tracing::warn;

use crate::domain::errors::{ConfigError, JournalError};
use crate::domain::journal_event::{JournalEvent, JournalEventType};

/// Construction-time configuration for [`EventJournal`]. Validated once at
/// construction, never on the hot path (§7).
#[derive(Debug, Clone)]
pub struct JournalConfig {
    pub path: PathBuf,
}

impl JournalConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyJournalPath);
        }
        Ok(())
    }
}

struct JournalState {
    last_seq: u64,
}

/// Single-file JSONL event journal. Safe for one writer; readers from other
/// processes see a prefix of committed lines (§5).
pub struct EventJournal {
    path: PathBuf,
    state: Mutex<JournalState>,
}

impl EventJournal {
    /// Validates `config`, then scans the file once (if it exists) to seed
    /// `last_seq` with the highest `seq` found. Malformed lines are ignored.
    pub fn open(config: &JournalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let last_seq = scan_last_seq(&config.path);
        Ok(Self {
            path: config.path.clone(),
            state: Mutex::new(JournalState { last_seq }),
        })
    }

    /// Assigns `seq = last_seq + 1`, appends one JSON line, flushes, then
    /// commits `last_seq`. Returns `false` on I/O failure without advancing
    /// `last_seq`; the failure is logged at `warn` with the failing path.
    pub fn append(&self, event: &JournalEvent) -> bool {
        let mut state = self.state.lock().expect("journal mutex poisoned");
        match self.append_locked(event, state.last_seq) {
            Ok(seq) => {
                state.last_seq = seq;
                true
            }
            Err(err) => {
                warn!(error = %err, path = %self.path.display(), "journal append failed");
                false
            }
        }
    }

    fn append_locked(&self, event: &JournalEvent, last_seq: u64) -> Result<u64, JournalError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| JournalError::CreateDir {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| JournalError::OpenFile {
                path: self.path.display().to_string(),
                source,
            })?;

        let next_seq = last_seq + 1;
        let line = serde_json::json!({
            "seq": next_seq,
            "ts_ms": event.ts_ms,
            "type": event.event_type.as_str(),
            "market": event.market,
            "entity_id": event.entity_id,
            "payload": event.payload,
        });

        writeln!(file, "{line}").map_err(|source| JournalError::Write {
            path: self.path.display().to_string(),
            source,
        })?;
        file.flush().map_err(|source| JournalError::Write {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(next_seq)
    }

    /// Re-scans the file, returning events with `seq >= seq_inclusive` in
    /// file order. Malformed lines are skipped; field-level defaults apply
    /// per §4.4.
    pub fn read_from(&self, seq_inclusive: u64) -> Vec<JournalEvent> {
        let _state = self.state.lock().expect("journal mutex poisoned");
        let Ok(file) = File::open(&self.path) else {
            return Vec::new();
        };

        BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter(|line| !line.is_empty())
            .filter_map(|line| parse_event(&line))
            .filter(|event| event.seq >= seq_inclusive)
            .collect()
    }

    pub fn last_seq(&self) -> u64 {
        self.state.lock().expect("journal mutex poisoned").last_seq
    }
}

fn scan_last_seq(path: &Path) -> u64 {
    let Ok(file) = File::open(path) else {
        return 0;
    };
    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter(|line| !line.is_empty())
        .filter_map(|line| serde_json::from_str::<Value>(&line).ok())
        .filter_map(|value| parse_seq(&value))
        .max()
        .unwrap_or(0)
}

fn parse_seq(value: &Value) -> Option<u64> {
    value.get("seq").and_then(Value::as_u64).or(Some(0))
}

fn parse_event(line: &str) -> Option<JournalEvent> {
    let value: Value = serde_json::from_str(line).ok()?;
    let seq = value.get("seq")?.as_u64()?;

    let ts_ms = value.get("ts_ms").and_then(Value::as_i64).unwrap_or(0);
    let event_type = value
        .get("type")
        .and_then(Value::as_str)
        .map(JournalEventType::from_token)
        .unwrap_or_default();
    let market = value
        .get("market")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let entity_id = value
        .get("entity_id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let payload = value.get("payload").cloned().unwrap_or_else(|| serde_json::json!({}));

    Some(JournalEvent {
        seq,
        ts_ms,
        event_type,
        market,
        entity_id,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn event(market: &str) -> JournalEvent {
        JournalEvent::new(1000, JournalEventType::OrderSubmitted, market, "order-1", serde_json::json!({}))
    }

    #[test]
    fn config_rejects_empty_path() {
        let config = JournalConfig::new("");
        assert_eq!(config.validate(), Err(ConfigError::EmptyJournalPath));
    }

    #[test]
    fn s6_journal_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.jsonl");
        let config = JournalConfig::new(&path);
        let journal = EventJournal::open(&config).unwrap();

        assert!(journal.append(&event("KRW-BTC")));
        assert!(journal.append(&event("KRW-ETH")));
        assert_eq!(journal.last_seq(), 2);

        let reopened = EventJournal::open(&config).unwrap();
        assert_eq!(reopened.last_seq(), 2);

        let from_two = reopened.read_from(2);
        assert_eq!(from_two.len(), 1);
        assert_eq!(from_two[0].market, "KRW-ETH");

        let from_one = reopened.read_from(1);
        assert_eq!(from_one.len(), 2);
        assert_eq!(from_one[0].seq, 1);
        assert_eq!(from_one[1].seq, 2);
    }

    #[test]
    fn monotonic_seq_across_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.jsonl");
        let config = JournalConfig::new(&path);
        let journal = EventJournal::open(&config).unwrap();

        for i in 1..=5u64 {
            assert!(journal.append(&event("KRW-BTC")));
            assert_eq!(journal.last_seq(), i);
        }
    }

    #[test]
    fn malformed_trailing_line_is_ignored_on_recovery() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.jsonl");
        let config = JournalConfig::new(&path);
        let journal = EventJournal::open(&config).unwrap();
        assert!(journal.append(&event("KRW-BTC")));

        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "{{not valid json").unwrap();
        drop(file);

        let reopened = EventJournal::open(&config).unwrap();
        assert_eq!(reopened.last_seq(), 1);
        assert!(reopened.append(&event("KRW-ETH")));
        assert_eq!(reopened.last_seq(), 2);
    }

    #[test]
    fn field_defaults_apply_when_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.jsonl");
        let mut file = File::create(&path).unwrap();
        writeln!(file, r#"{{"seq":1,"type":"ORDER_SUBMITTED"}}"#).unwrap();
        drop(file);

        let config = JournalConfig::new(&path);
        let journal = EventJournal::open(&config).unwrap();
        let events = journal.read_from(1);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].ts_ms, 0);
        assert_eq!(events[0].market, "");
        assert_eq!(events[0].entity_id, "");
        assert_eq!(events[0].payload, serde_json::json!({}));
    }
}
