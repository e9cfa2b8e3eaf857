use std::fmt;

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};
use sqlx::FromRow;
use uuid::Uuid;

const SQL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TimestampError {
    #[error("invalid ISO-8601 timestamp: {0}")]
    InvalidIso(String),

    #[error("invalid timestamp (expected YYYY-MM-DD HH:MM:SS): {0}")]
    InvalidSql(String),
}

/// Entry timestamp, tagged by the encoding it arrived in.
///
/// Rows written by older clients carry either `2025-10-28T11:16:21` or
/// `2025-10-28 11:16:21`. Both normalize to the same `NaiveDateTime`; the
/// variant remembers how to render the value back. ISO text is kept verbatim,
/// so fractional seconds and offsets survive a round trip. The hour is taken as
/// encoded, with no timezone conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Timestamp {
    Iso { at: NaiveDateTime, raw: String },
    Sql(NaiveDateTime),
    /// Stored text that parses in neither form. Kept so the row still lists.
    Malformed(String),
}

impl Timestamp {
    /// Parse either supported form. A literal `T` selects the ISO branch.
    pub fn parse(raw: &str) -> Result<Self, TimestampError> {
        if raw.contains('T') {
            parse_iso(raw)
                .map(|at| Timestamp::Iso {
                    at,
                    raw: raw.to_string(),
                })
                .ok_or_else(|| TimestampError::InvalidIso(raw.to_string()))
        } else {
            NaiveDateTime::parse_from_str(raw, SQL_FORMAT)
                .map(Timestamp::Sql)
                .map_err(|_| TimestampError::InvalidSql(raw.to_string()))
        }
    }

    /// Used when reading rows back: never fails, malformed text is preserved.
    pub fn from_stored(raw: String) -> Self {
        match Self::parse(&raw) {
            Ok(ts) => ts,
            Err(_) => Timestamp::Malformed(raw),
        }
    }

    pub fn instant(&self) -> Option<NaiveDateTime> {
        match self {
            Timestamp::Iso { at, .. } | Timestamp::Sql(at) => Some(*at),
            Timestamp::Malformed(_) => None,
        }
    }

    /// Monday = 0 .. Sunday = 6
    pub fn weekday_index(&self) -> Option<usize> {
        self.instant()
            .map(|at| at.weekday().num_days_from_monday() as usize)
    }

    pub fn hour(&self) -> Option<u32> {
        self.instant().map(|at| at.hour())
    }

    /// Key that orders both encodings chronologically as text.
    #[cfg(test)]
    pub fn sort_key(&self) -> String {
        self.to_string().replacen('T', " ", 1)
    }
}

fn parse_iso(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|at| at.naive_local())
        })
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Iso { raw, .. } => f.write_str(raw),
            Timestamp::Sql(at) => write!(f, "{}", at.format(SQL_FORMAT)),
            Timestamp::Malformed(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One recorded emotion-analysis event.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub id: Uuid,
    pub user_id: String,
    pub timestamp: Timestamp,
    pub journal_text: Option<String>,
    pub text_emotion: Option<String>,
    pub text_confidence: Option<f64>,
    pub audio_emotion: Option<String>,
    pub audio_confidence: Option<f64>,
    pub final_emotion: Option<String>,
    pub mood_score: Option<i32>,
}

#[derive(Debug, Clone, FromRow)]
pub struct EntryRow {
    pub id: Uuid,
    pub user_id: String,
    pub recorded_at: String,
    pub journal_text: Option<String>,
    pub text_emotion: Option<String>,
    pub text_confidence: Option<f64>,
    pub audio_emotion: Option<String>,
    pub audio_confidence: Option<f64>,
    pub final_emotion: Option<String>,
    pub mood_score: Option<i32>,
}

impl From<EntryRow> for Entry {
    fn from(row: EntryRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            timestamp: Timestamp::from_stored(row.recorded_at),
            journal_text: row.journal_text,
            text_emotion: row.text_emotion,
            text_confidence: row.text_confidence,
            audio_emotion: row.audio_emotion,
            audio_confidence: row.audio_confidence,
            final_emotion: row.final_emotion,
            mood_score: row.mood_score,
        }
    }
}

/// Insert payload; the store assigns nothing but the creation time.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub id: Uuid,
    pub user_id: String,
    pub timestamp: Timestamp,
    pub journal_text: Option<String>,
    pub text_emotion: Option<String>,
    pub text_confidence: Option<f64>,
    pub audio_emotion: Option<String>,
    pub audio_confidence: Option<f64>,
    pub final_emotion: Option<String>,
    pub mood_score: Option<i32>,
}

impl From<NewEntry> for Entry {
    fn from(new: NewEntry) -> Self {
        Self {
            id: new.id,
            user_id: new.user_id,
            timestamp: new.timestamp,
            journal_text: new.journal_text,
            text_emotion: new.text_emotion,
            text_confidence: new.text_confidence,
            audio_emotion: new.audio_emotion,
            audio_confidence: new.audio_confidence,
            final_emotion: new.final_emotion,
            mood_score: new.mood_score,
        }
    }
}
