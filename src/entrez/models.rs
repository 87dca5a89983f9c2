//! Public data types returned by the client

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::{EntrezError, Result};

/// Opaque History server session returned by a `usehistory=y` search
///
/// The pair references a result set stored server-side; the client treats it
/// as an immutable value and never invalidates it. Sessions expire on the
/// server after roughly an hour of inactivity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySession {
    pub web_env: String,
    pub query_key: String,
}

impl HistorySession {
    pub fn new(web_env: impl Into<String>, query_key: impl Into<String>) -> Self {
        Self {
            web_env: web_env.into(),
            query_key: query_key.into(),
        }
    }
}

/// Set of valid Entrez database names, retrieved live from EInfo
///
/// Used only for membership checks; callers re-fetch it per validation
/// rather than caching it across calls.
#[derive(Debug, Clone)]
pub struct ValidationCatalog {
    databases: HashSet<String>,
}

impl ValidationCatalog {
    pub fn new<I, S>(databases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            databases: databases
                .into_iter()
                .map(|db| db.into().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn contains_database(&self, name: &str) -> bool {
        self.databases.contains(&name.to_ascii_lowercase())
    }

    /// Membership check that fails with an error naming the database
    pub fn ensure_database(&self, name: &str) -> Result<()> {
        if self.contains_database(name) {
            Ok(())
        } else {
            Err(EntrezError::InvalidParameter {
                parameter: "db",
                value: name.to_string(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.databases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }
}

/// Metadata for a single Entrez database from EInfo
#[derive(Debug, Clone)]
pub struct DatabaseInfo {
    pub name: String,
    pub menu_name: Option<String>,
    pub description: Option<String>,
    pub record_count: Option<u64>,
    pub last_update: Option<String>,
    pub fields: Vec<FieldInfo>,
}

impl DatabaseInfo {
    /// Case-insensitive field-name membership check
    pub fn has_field(&self, name: &str) -> bool {
        self.fields
            .iter()
            .any(|field| field.name.eq_ignore_ascii_case(name))
    }

    /// Validate a `datetype` value against this database's indexed fields
    pub fn ensure_date_field(&self, name: &str) -> Result<()> {
        if self.has_field(name) {
            Ok(())
        } else {
            Err(EntrezError::InvalidParameter {
                parameter: "datetype",
                value: name.to_string(),
            })
        }
    }
}

/// One indexed field within a database
#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub name: String,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub is_date: bool,
    pub is_numerical: bool,
}

/// Result of one ESearch call
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Matching UIDs, up to `retmax`
    pub ids: Vec<String>,
    /// Total number of records matching the query server-side
    pub total_count: usize,
    /// Present when the search was run with `usehistory=y`
    pub web_env: Option<String>,
    pub query_key: Option<String>,
    /// How the server interpreted the query, when reported
    pub query_translation: Option<String>,
}

impl SearchOutcome {
    /// Session handle for follow-up fetches, if the server returned one
    pub fn history_session(&self) -> Option<HistorySession> {
        match (&self.web_env, &self.query_key) {
            (Some(web_env), Some(query_key)) => {
                Some(HistorySession::new(web_env.clone(), query_key.clone()))
            }
            _ => None,
        }
    }
}

/// Summary of a completed bulk retrieval
#[derive(Debug, Clone)]
pub struct BulkSummary {
    /// Total records the search reported
    pub total_count: usize,
    /// Number of pages fetched and written
    pub pages_fetched: usize,
    /// Bytes appended to the output file
    pub bytes_written: u64,
    /// Path the concatenated payloads were written to
    pub output: PathBuf,
}
