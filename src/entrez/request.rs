//! Request builders for the three E-utilities endpoint families
//!
//! All three endpoints share one query-string assembly path: parameters are
//! pushed in documented order and an unset optional is never emitted, so the
//! server applies its own default. Everything with a closed value domain is
//! already an enum from [`params`](super::params) by the time it gets here.
//!
//! Per NCBI convention the search term is passed through as given: callers
//! may substitute `+` for spaces and URL-encode special characters
//! themselves.

use crate::entrez::models::HistorySession;
use crate::entrez::params::{IdType, RetMode, RetType, SortOrder, Strand};
use crate::error::{EntrezError, Result};

/// Upper bound NCBI accepts for `retmax`; larger values are rejected, not clamped
pub const RETMAX_CEILING: usize = 10_000;

/// Ordered query-string assembly joined with `&`
#[derive(Debug, Default)]
pub(crate) struct QueryString {
    pairs: Vec<(&'static str, String)>,
}

impl QueryString {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.pairs.push((key, value.into()));
    }

    pub(crate) fn push_opt(&mut self, key: &'static str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    pub(crate) fn build(self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn check_retmax(retmax: Option<usize>) -> Result<()> {
    match retmax {
        Some(value) if value > RETMAX_CEILING => Err(EntrezError::InvalidParameter {
            parameter: "retmax",
            value: value.to_string(),
        }),
        _ => Ok(()),
    }
}

/// EInfo request: database catalog, or per-database metadata
#[derive(Debug, Clone, Default)]
pub struct InfoRequest {
    database: Option<String>,
    retmode: RetMode,
}

impl InfoRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope the request to one database; without this the server returns
    /// the full database catalog
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn retmode(mut self, retmode: RetMode) -> Self {
        self.retmode = retmode;
        self
    }

    pub(crate) fn retmode_value(&self) -> RetMode {
        self.retmode
    }

    pub fn build_query(&self) -> String {
        let mut query = QueryString::new();
        query.push_opt("db", self.database.as_deref().map(str::to_lowercase));
        query.push("retmode", self.retmode.as_api_param());
        query.build()
    }
}

/// ESearch request: text query against one database
#[derive(Debug, Clone)]
pub struct SearchRequest {
    database: String,
    term: String,
    web_env: Option<String>,
    query_key: Option<String>,
    retstart: Option<usize>,
    retmax: Option<usize>,
    use_history: bool,
    sort: Option<SortOrder>,
    datetype: Option<String>,
    mindate: Option<String>,
    maxdate: Option<String>,
    rettype: Option<RetType>,
}

impl SearchRequest {
    pub fn new(database: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            term: term.into(),
            web_env: None,
            query_key: None,
            retstart: None,
            retmax: None,
            use_history: false,
            sort: None,
            datetype: None,
            mindate: None,
            maxdate: None,
            rettype: None,
        }
    }

    /// Continue a prior search via its History server session
    pub fn session(mut self, session: &HistorySession) -> Self {
        self.web_env = Some(session.web_env.clone());
        self.query_key = Some(session.query_key.clone());
        self
    }

    pub fn retstart(mut self, retstart: usize) -> Self {
        self.retstart = Some(retstart);
        self
    }

    /// Number of UIDs to return; values above [`RETMAX_CEILING`] are rejected
    /// at build time
    pub fn retmax(mut self, retmax: usize) -> Self {
        self.retmax = Some(retmax);
        self
    }

    /// Post the result set to the History server (`usehistory=y`)
    pub fn use_history(mut self) -> Self {
        self.use_history = true;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Date field to filter on; validated against the database's indexed
    /// fields before the request is sent
    pub fn datetype(mut self, datetype: impl Into<String>) -> Self {
        self.datetype = Some(datetype.into());
        self
    }

    pub fn mindate(mut self, mindate: impl Into<String>) -> Self {
        self.mindate = Some(mindate.into());
        self
    }

    pub fn maxdate(mut self, maxdate: impl Into<String>) -> Self {
        self.maxdate = Some(maxdate.into());
        self
    }

    /// Record selector: full UID list (default) or count only
    pub fn rettype(mut self, rettype: RetType) -> Self {
        self.rettype = Some(rettype);
        self
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    pub(crate) fn datetype_value(&self) -> Option<&str> {
        self.datetype.as_deref()
    }

    pub fn build_query(&self) -> Result<String> {
        check_retmax(self.retmax)?;
        if self.term.trim().is_empty() {
            return Err(EntrezError::InvalidRequest(
                "search term must not be empty".to_string(),
            ));
        }

        let mut query = QueryString::new();
        query.push("db", self.database.to_lowercase());
        query.push("term", &self.term);
        query.push_opt("WebEnv", self.web_env.as_deref());
        query.push_opt("query_key", self.query_key.as_deref());
        query.push_opt("retstart", self.retstart.map(|v| v.to_string()));
        query.push_opt("retmax", self.retmax.map(|v| v.to_string()));
        query.push_opt("sort", self.sort.map(|s| s.as_api_param()));
        query.push_opt("datetype", self.datetype.as_deref());
        query.push_opt("mindate", self.mindate.as_deref());
        query.push_opt("maxdate", self.maxdate.as_deref());
        query.push_opt("rettype", self.rettype.map(|r| r.as_api_param()));
        if self.use_history {
            query.push("usehistory", "y");
        }
        Ok(query.build())
    }
}

/// EFetch request: full records for explicit UIDs or a History session
#[derive(Debug, Clone)]
pub struct FetchRequest {
    database: String,
    ids: Vec<String>,
    session: Option<HistorySession>,
    retstart: Option<usize>,
    retmax: Option<usize>,
    rettype: Option<String>,
    retmode: Option<RetMode>,
    strand: Option<Strand>,
    seq_start: Option<u64>,
    seq_stop: Option<u64>,
    idtype: Option<IdType>,
}

impl FetchRequest {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ids: Vec::new(),
            session: None,
            retstart: None,
            retmax: None,
            rettype: None,
            retmode: None,
            strand: None,
            seq_start: None,
            seq_stop: None,
            idtype: None,
        }
    }

    pub fn ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn session(mut self, session: &HistorySession) -> Self {
        self.session = Some(session.clone());
        self
    }

    pub fn retstart(mut self, retstart: usize) -> Self {
        self.retstart = Some(retstart);
        self
    }

    pub fn retmax(mut self, retmax: usize) -> Self {
        self.retmax = Some(retmax);
        self
    }

    /// Record format, database specific (e.g. `fasta`, `gb`, `abstract`)
    pub fn rettype(mut self, rettype: impl Into<String>) -> Self {
        self.rettype = Some(rettype.into());
        self
    }

    pub fn retmode(mut self, retmode: RetMode) -> Self {
        self.retmode = Some(retmode);
        self
    }

    pub fn strand(mut self, strand: Strand) -> Self {
        self.strand = Some(strand);
        self
    }

    /// First sequence position to retrieve; the server is the source of
    /// truth for the index domain
    pub fn seq_start(mut self, seq_start: u64) -> Self {
        self.seq_start = Some(seq_start);
        self
    }

    pub fn seq_stop(mut self, seq_stop: u64) -> Self {
        self.seq_stop = Some(seq_stop);
        self
    }

    pub fn idtype(mut self, idtype: IdType) -> Self {
        self.idtype = Some(idtype);
        self
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    pub fn build_query(&self) -> Result<String> {
        check_retmax(self.retmax)?;
        match (&self.session, self.ids.is_empty()) {
            (None, true) => {
                return Err(EntrezError::InvalidRequest(
                    "fetch requires either ids or a history session".to_string(),
                ));
            }
            (Some(_), false) => {
                return Err(EntrezError::InvalidRequest(
                    "fetch accepts ids or a history session, not both".to_string(),
                ));
            }
            _ => {}
        }

        let mut query = QueryString::new();
        query.push("db", self.database.to_lowercase());
        if let Some(session) = &self.session {
            query.push("WebEnv", urlencoding::encode(&session.web_env));
            query.push("query_key", urlencoding::encode(&session.query_key));
        } else {
            query.push("id", self.ids.join(","));
        }
        query.push_opt("retstart", self.retstart.map(|v| v.to_string()));
        query.push_opt("retmax", self.retmax.map(|v| v.to_string()));
        query.push_opt("rettype", self.rettype.as_deref());
        query.push_opt("retmode", self.retmode.map(|m| m.as_api_param()));
        query.push_opt("strand", self.strand.map(|s| s.as_api_param()));
        query.push_opt("seq_start", self.seq_start.map(|v| v.to_string()));
        query.push_opt("seq_stop", self.seq_stop.map(|v| v.to_string()));
        query.push_opt("idtype", self.idtype.and_then(|t| t.as_api_param()));
        Ok(query.build())
    }
}
