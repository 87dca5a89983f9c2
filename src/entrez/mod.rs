//! Entrez E-utilities client
//!
//! The client functionality is split across focused modules under [`client`]:
//! - `client/mod.rs` - Core client struct, constructors, and transport
//! - `client/einfo` - Database catalog and per-database metadata (EInfo)
//! - `client/esearch` - Text queries returning UIDs (ESearch)
//! - `client/efetch` - Full-record retrieval (EFetch)
//! - `client/bulk` - History-server bulk retrieval orchestration

pub mod client;
pub mod models;
pub mod params;
pub mod request;
pub(crate) mod responses;

// Re-export public types
pub use client::{EntrezClient, BULK_PAGE_SIZE};
pub use models::{
    BulkSummary, DatabaseInfo, FieldInfo, HistorySession, SearchOutcome, ValidationCatalog,
};
pub use params::{IdType, RetMode, RetType, SortOrder, Strand};
pub use request::{FetchRequest, InfoRequest, SearchRequest, RETMAX_CEILING};
