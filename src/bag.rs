use crate::error::CheckerError;
use rusqlite::{Connection, OpenFlags};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// One physically present topic, as reported by the bag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicFact {
    pub name: String,
    pub message_count: u64,
}

/// Read-only snapshot of a bag's metadata for one check.
///
/// Topic names are unique; iteration order is the stable order the storage
/// backend reports them in and carries no other meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct BagFacts {
    pub duration_seconds: f64,
    pub topics: Vec<TopicFact>,
}

/// Storage backend, selected by the bag file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFormat {
    Sqlite3,
    Mcap,
}

impl StorageFormat {
    pub fn from_path(path: &Path) -> Result<Self, CheckerError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("db3") => Ok(StorageFormat::Sqlite3),
            Some("mcap") => Ok(StorageFormat::Mcap),
            _ => Err(CheckerError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Read duration and per-topic message counts from a bag file.
pub fn read_metadata(path: &Path) -> Result<BagFacts, CheckerError> {
    match StorageFormat::from_path(path)? {
        StorageFormat::Sqlite3 => read_sqlite(path),
        StorageFormat::Mcap => read_mcap(path),
    }
}

/// rosbag2 sqlite3 storage: `topics(id, name, ...)` and
/// `messages(id, topic_id, timestamp, data)`, timestamps in nanoseconds.
fn read_sqlite(path: &Path) -> Result<BagFacts, CheckerError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let mut stmt = conn.prepare(
        "SELECT topics.name, COUNT(messages.id)
         FROM topics
         LEFT JOIN messages ON messages.topic_id = topics.id
         GROUP BY topics.id
         ORDER BY topics.id",
    )?;
    let topics = stmt
        .query_map([], |row| {
            Ok(TopicFact {
                name: row.get(0)?,
                message_count: row.get::<_, i64>(1)? as u64,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let (min_ts, max_ts): (Option<i64>, Option<i64>) = conn.query_row(
        "SELECT MIN(timestamp), MAX(timestamp) FROM messages",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    let duration_seconds = match (min_ts, max_ts) {
        (Some(first), Some(last)) => (last - first) as f64 / 1e9,
        _ => 0.0,
    };

    Ok(BagFacts {
        duration_seconds,
        topics,
    })
}

/// MCAP storage: prefer the summary section's statistics record; fall back
/// to a full message scan for files written without a summary.
fn read_mcap(path: &Path) -> Result<BagFacts, CheckerError> {
    let contents = fs::read(path)?;

    if let Some(summary) = mcap::read::Summary::read(&contents)? {
        if let Some(stats) = &summary.stats {
            let mut channel_ids: Vec<u16> = summary.channels.keys().copied().collect();
            channel_ids.sort_unstable();

            let mut topics: Vec<TopicFact> = Vec::new();
            for id in channel_ids {
                let channel = &summary.channels[&id];
                let count = stats.channel_message_counts.get(&id).copied().unwrap_or(0);
                // MCAP allows several channels on one topic; counts aggregate
                match topics.iter_mut().find(|t| t.name == channel.topic) {
                    Some(existing) => existing.message_count += count,
                    None => topics.push(TopicFact {
                        name: channel.topic.clone(),
                        message_count: count,
                    }),
                }
            }

            let duration_seconds = if stats.message_count == 0 {
                0.0
            } else {
                stats.message_end_time.saturating_sub(stats.message_start_time) as f64 / 1e9
            };

            return Ok(BagFacts {
                duration_seconds,
                topics,
            });
        }
    }

    scan_mcap(&contents)
}

fn scan_mcap(contents: &[u8]) -> Result<BagFacts, CheckerError> {
    let mut topics: Vec<TopicFact> = Vec::new();
    let mut first_ts: Option<u64> = None;
    let mut last_ts: Option<u64> = None;

    for message in mcap::read::MessageStream::new(contents)? {
        let message = message?;
        match topics.iter_mut().find(|t| t.name == message.channel.topic) {
            Some(existing) => existing.message_count += 1,
            None => topics.push(TopicFact {
                name: message.channel.topic.clone(),
                message_count: 1,
            }),
        }
        first_ts = Some(first_ts.map_or(message.log_time, |t| t.min(message.log_time)));
        last_ts = Some(last_ts.map_or(message.log_time, |t| t.max(message.log_time)));
    }

    let duration_seconds = match (first_ts, last_ts) {
        (Some(first), Some(last)) => (last - first) as f64 / 1e9,
        _ => 0.0,
    };

    Ok(BagFacts {
        duration_seconds,
        topics,
    })
}
