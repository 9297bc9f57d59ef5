//! Roster lookup: fetch the guest list, normalize it, find a name.
//!
//! The roster is re-fetched for every query so spreadsheet edits show up
//! immediately. Nothing is cached between calls.

pub mod source;

use std::sync::Arc;

pub use source::{HttpRosterSource, RosterSource};

/// Header label of the guest name column.
pub const NAME_COLUMN: &str = "姓名";
/// Header label of the table number column.
pub const TABLE_COLUMN: &str = "桌號";

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("roster request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("roster source returned HTTP {0}")]
    HttpStatus(u16),

    #[error("roster csv malformed at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("roster is missing required column `{0}`")]
    MissingColumn(String),
}

/// Coarse failure class, for logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RosterErrorKind {
    Network,
    Parse,
    Schema,
}

impl RosterError {
    pub fn kind(&self) -> RosterErrorKind {
        match self {
            Self::Network(_) | Self::HttpStatus(_) => RosterErrorKind::Network,
            Self::Parse { .. } => RosterErrorKind::Parse,
            Self::MissingColumn(_) => RosterErrorKind::Schema,
        }
    }
}

/// One normalized roster row. Both fields are trimmed text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub table_number: String,
}

/// Request-scoped roster, in source row order.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// Parse CSV text (first record is the header) into typed entries.
    pub fn parse(csv_text: &str) -> Result<Self, RosterError> {
        let csv_text = csv_text.strip_prefix('\u{feff}').unwrap_or(csv_text);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_text.as_bytes());

        let header = reader.headers().map_err(parse_error)?.clone();
        if header.iter().all(str::is_empty) {
            return Err(RosterError::Parse {
                line: 1,
                reason: "missing header row".to_string(),
            });
        }
        let width = header.len();
        let name_idx = column_index(&header, NAME_COLUMN)?;
        let table_idx = column_index(&header, TABLE_COLUMN)?;

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record.map_err(parse_error)?;
            if record.len() > width {
                return Err(RosterError::Parse {
                    line: record_line(&record),
                    reason: format!("expected {width} fields, saw {}", record.len()),
                });
            }
            entries.push(RosterEntry {
                name: cell(&record, name_idx),
                table_number: cell(&record, table_idx),
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Exact, case-sensitive match on the trimmed name. First row wins.
    pub fn find(&self, query: &str) -> Option<&RosterEntry> {
        let target = query.trim();
        if target.is_empty() {
            return None;
        }
        self.entries.iter().find(|e| e.name == target)
    }
}

// Header labels must match exactly; ` 姓名` is a different column.
fn column_index(header: &csv::StringRecord, label: &str) -> Result<usize, RosterError> {
    header
        .iter()
        .position(|h| h == label)
        .ok_or_else(|| RosterError::MissingColumn(label.to_string()))
}

// Short rows are padded: a missing cell reads as empty text.
fn cell(record: &csv::StringRecord, idx: usize) -> String {
    record
        .get(idx)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn record_line(record: &csv::StringRecord) -> usize {
    record.position().map(|p| p.line() as usize).unwrap_or(0)
}

fn parse_error(e: csv::Error) -> RosterError {
    RosterError::Parse {
        line: e.position().map(|p| p.line() as usize).unwrap_or(0),
        reason: e.to_string(),
    }
}

/// Outcome of a single lookup.
#[derive(Debug)]
pub enum LookupResult {
    Found(String),
    NotFound,
    FetchError(RosterError),
}

/// Looks names up against a freshly fetched roster.
#[derive(Clone)]
pub struct RosterLookup {
    source: Arc<dyn RosterSource>,
}

impl RosterLookup {
    pub fn new(source: Arc<dyn RosterSource>) -> Self {
        Self { source }
    }

    pub async fn lookup(&self, query: &str) -> LookupResult {
        match self.load().await {
            Ok(roster) => match roster.find(query) {
                Some(entry) => LookupResult::Found(entry.table_number.clone()),
                None => LookupResult::NotFound,
            },
            Err(e) => {
                tracing::warn!(kind = ?e.kind(), error = %e, "failed to load roster");
                LookupResult::FetchError(e)
            }
        }
    }

    async fn load(&self) -> Result<Roster, RosterError> {
        let text = self.source.fetch_csv().await?;
        Roster::parse(&text)
    }
}
