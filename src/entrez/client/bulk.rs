//! Bulk retrieval: download every record matching a query via the History server

use std::path::Path;

use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::entrez::models::BulkSummary;
use crate::entrez::request::{FetchRequest, SearchRequest};
use crate::error::{EntrezError, Result};

use super::EntrezClient;

/// Records requested per EFetch page
pub const BULK_PAGE_SIZE: usize = 500;

impl EntrezClient {
    /// Download all records matching a query into one file
    ///
    /// Runs an ESearch with `usehistory=y` to obtain a session handle and the
    /// total result count, then pages through EFetch at increasing offsets,
    /// appending each payload to `output` in arrival order.
    ///
    /// Each page goes through the client's bounded retry policy; a page that
    /// still fails afterwards aborts the whole run with
    /// [`EntrezError::BulkFetchFailed`] carrying the failing offset, and no
    /// further pages are requested.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use entrez_client::EntrezClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = EntrezClient::new();
    ///     let summary = client
    ///         .fetch_all_to_file(
    ///             "nucleotide",
    ///             "chimpanzee[orgn]+AND+biomol+mrna[prop]",
    ///             Path::new("data/raw/chimp.xml"),
    ///         )
    ///         .await?;
    ///
    ///     println!("{} records in {} pages", summary.total_count, summary.pages_fetched);
    ///     Ok(())
    /// }
    /// ```
    pub async fn fetch_all_to_file(
        &self,
        database: &str,
        term: &str,
        output: &Path,
    ) -> Result<BulkSummary> {
        self.fetch_all_to_file_with_cancellation(database, term, output, &CancellationToken::new())
            .await
    }

    /// Like [`fetch_all_to_file`](Self::fetch_all_to_file), checking `cancel`
    /// between pages so long downloads can be aborted cleanly
    #[instrument(skip(self, cancel), fields(database = %database, output = %output.display()))]
    pub async fn fetch_all_to_file_with_cancellation(
        &self,
        database: &str,
        term: &str,
        output: &Path,
        cancel: &CancellationToken,
    ) -> Result<BulkSummary> {
        // retmax=0: only the count and the history session are needed here
        let search = SearchRequest::new(database, term).use_history().retmax(0);
        let outcome = self.search(&search).await?;
        let total_count = outcome.total_count;

        debug!(total_count, "Bulk search registered on history server");

        let mut file = tokio::fs::File::create(output).await?;
        let mut pages_fetched = 0usize;
        let mut bytes_written = 0u64;

        if total_count > 0 {
            let session = outcome
                .history_session()
                .ok_or_else(|| EntrezError::ApiError {
                    status: 200,
                    message: "ESearch did not return a history session".to_string(),
                })?;

            let mut offset = 0usize;
            while offset < total_count {
                if cancel.is_cancelled() {
                    warn!(offset, "Bulk fetch cancelled");
                    return Err(EntrezError::BulkFetchCancelled { offset });
                }

                let query = FetchRequest::new(database)
                    .session(&session)
                    .retstart(offset)
                    .retmax(BULK_PAGE_SIZE)
                    .build_query()?;

                let page = match self.fetch_unchecked(&query).await {
                    Ok(page) => page,
                    Err(source) => {
                        warn!(offset, error = %source, "Bulk fetch page failed, aborting");
                        return Err(EntrezError::BulkFetchFailed {
                            offset,
                            source: Box::new(source),
                        });
                    }
                };

                file.write_all(page.as_bytes()).await?;
                bytes_written += page.len() as u64;
                pages_fetched += 1;
                offset += BULK_PAGE_SIZE;

                debug!(offset, pages_fetched, "Bulk fetch page written");
            }
        }

        file.flush().await?;

        info!(
            total_count,
            pages_fetched, bytes_written, "Bulk fetch completed"
        );

        Ok(BulkSummary {
            total_count,
            pages_fetched,
            bytes_written,
            output: output.to_path_buf(),
        })
    }
}
