//! # Entrez Client
//!
//! A Rust client library for the NCBI Entrez E-utilities REST API.
//! This crate builds validated query URLs for the EInfo, ESearch, and EFetch
//! endpoint families, performs the HTTP requests, and hands response bodies
//! back to the caller (or persists them to files) without imposing a data
//! model on them.
//!
//! ## Features
//!
//! - **Validated request building**: closed parameter domains are enums;
//!   database and date-field names are checked against the live EInfo catalog
//!   before any request goes out
//! - **Bulk retrieval**: history-server pagination with bounded retry and
//!   cooperative cancellation
//! - **NCBI compliance**: token-bucket rate limiting at the documented
//!   requests-per-second ceilings
//! - **Typed errors**: absence of data is never ambiguous with failure
//!
//! ## Quick Start
//!
//! ### Searching a database
//!
//! ```no_run
//! use entrez_client::{EntrezClient, SearchRequest, SortOrder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EntrezClient::new();
//!
//!     let outcome = client
//!         .search(
//!             &SearchRequest::new("pubmed", "science[journal]+AND+breast+cancer")
//!                 .sort(SortOrder::PublicationDate)
//!                 .retmax(50),
//!         )
//!         .await?;
//!
//!     println!("{} total matches", outcome.total_count);
//!     for uid in &outcome.ids {
//!         println!("UID: {uid}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Downloading everything matching a query
//!
//! ```no_run
//! use std::path::Path;
//! use entrez_client::EntrezClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EntrezClient::new();
//!
//!     let summary = client
//!         .fetch_all_to_file(
//!             "nucleotide",
//!             "chimpanzee[orgn]+AND+biomol+mrna[prop]",
//!             Path::new("data/raw/chimp.xml"),
//!         )
//!         .await?;
//!
//!     println!(
//!         "{} records written to {}",
//!         summary.total_count,
//!         summary.output.display()
//!     );
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod entrez;
pub mod error;
pub mod rate_limit;
pub mod retry;

// Re-export main types for convenience
pub use config::{ClientConfig, ServiceEndpoints, DEFAULT_BASE_URL};
pub use entrez::{
    BulkSummary, DatabaseInfo, EntrezClient, FetchRequest, FieldInfo, HistorySession, IdType,
    InfoRequest, RetMode, RetType, SearchOutcome, SearchRequest, SortOrder, Strand,
    ValidationCatalog, BULK_PAGE_SIZE, RETMAX_CEILING,
};
pub use error::{EntrezError, Result};
pub use rate_limit::RateLimiter;
pub use retry::RetryConfig;
