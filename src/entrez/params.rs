//! Closed parameter domains for E-utilities requests
//!
//! Each enumerated parameter on the wire is a tagged enum here, so an
//! out-of-domain value is impossible once parsing has succeeded. Parsing
//! failures name the offending parameter and value.

use std::fmt;
use std::str::FromStr;

use crate::error::{EntrezError, Result};

/// Response format (`retmode`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetMode {
    #[default]
    Xml,
    Json,
}

impl RetMode {
    pub fn as_api_param(&self) -> &'static str {
        match self {
            RetMode::Xml => "xml",
            RetMode::Json => "json",
        }
    }

    /// File extension used when persisting a response (`info.xml` / `info.json`)
    pub fn file_extension(&self) -> &'static str {
        self.as_api_param()
    }
}

impl FromStr for RetMode {
    type Err = EntrezError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(RetMode::Xml),
            "json" => Ok(RetMode::Json),
            _ => Err(EntrezError::UnsupportedFormat {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_param())
    }
}

/// ESearch record selector (`rettype`): full UID list or count only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetType {
    UiList,
    Count,
}

impl RetType {
    pub fn as_api_param(&self) -> &'static str {
        match self {
            RetType::UiList => "uilist",
            RetType::Count => "count",
        }
    }
}

impl FromStr for RetType {
    type Err = EntrezError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "uilist" => Ok(RetType::UiList),
            "count" => Ok(RetType::Count),
            _ => Err(EntrezError::InvalidParameter {
                parameter: "rettype",
                value: s.to_string(),
            }),
        }
    }
}

/// ESearch sort order (`sort`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Relevance,
    PublicationDate,
    Author,
    JournalName,
}

impl SortOrder {
    pub fn as_api_param(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::PublicationDate => "pub_date",
            SortOrder::Author => "author",
            SortOrder::JournalName => "journal_name",
        }
    }
}

impl FromStr for SortOrder {
    type Err = EntrezError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "relevance" => Ok(SortOrder::Relevance),
            "pub_date" | "pub date" | "publication_date" => Ok(SortOrder::PublicationDate),
            "author" => Ok(SortOrder::Author),
            "journal_name" | "journal" => Ok(SortOrder::JournalName),
            _ => Err(EntrezError::InvalidParameter {
                parameter: "sort",
                value: s.to_string(),
            }),
        }
    }
}

/// Sequence strand selector for EFetch (`strand`): 1 = plus, 2 = minus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Plus,
    Minus,
}

impl Strand {
    pub fn as_api_param(&self) -> &'static str {
        match self {
            Strand::Plus => "1",
            Strand::Minus => "2",
        }
    }
}

impl FromStr for Strand {
    type Err = EntrezError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "1" | "plus" => Ok(Strand::Plus),
            "2" | "minus" => Ok(Strand::Minus),
            _ => Err(EntrezError::InvalidParameter {
                parameter: "strand",
                value: s.to_string(),
            }),
        }
    }
}

/// Identifier type for EFetch (`idtype`)
///
/// `Uid` is the server default and emits no parameter; `Accession` emits
/// `idtype=acc` so sequence databases accept accession.version identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdType {
    Uid,
    Accession,
}

impl IdType {
    /// Wire token, or `None` for the server default
    pub fn as_api_param(&self) -> Option<&'static str> {
        match self {
            IdType::Uid => None,
            IdType::Accession => Some("acc"),
        }
    }
}

impl FromStr for IdType {
    type Err = EntrezError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "uid" | "numeric" => Ok(IdType::Uid),
            "acc" | "accession" => Ok(IdType::Accession),
            _ => Err(EntrezError::InvalidParameter {
                parameter: "idtype",
                value: s.to_string(),
            }),
        }
    }
}
