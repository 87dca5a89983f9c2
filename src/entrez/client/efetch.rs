//! EFetch operations: full-record retrieval for UIDs or a history session

use tracing::{debug, info, instrument};

use crate::entrez::request::FetchRequest;
use crate::error::Result;

use super::EntrezClient;

impl EntrezClient {
    /// Retrieve full records for a set of identifiers or a prior session
    ///
    /// The database name is checked against the live catalog before the
    /// request is sent. The body is returned unparsed; record structure is
    /// database and `rettype` specific and left to the caller.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use entrez_client::{EntrezClient, FetchRequest};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = EntrezClient::new();
    ///     let records = client
    ///         .fetch(&FetchRequest::new("nuccore").ids(["NC_000913.3"]).rettype("fasta"))
    ///         .await?;
    ///
    ///     println!("{} bytes retrieved", records.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, request), fields(database = %request.database_name()))]
    pub async fn fetch(&self, request: &FetchRequest) -> Result<String> {
        let query = request.build_query()?;

        let catalog = self.validation_catalog().await?;
        catalog.ensure_database(request.database_name())?;

        self.fetch_unchecked(&query).await
    }

    /// Run an already-validated efetch query string
    pub(crate) async fn fetch_unchecked(&self, query: &str) -> Result<String> {
        let url = self.efetch_url(query);

        debug!("Making EFetch API request");
        let response = self.make_request(&url).await?;
        let body = response.text().await?;

        info!(bytes = body.len(), "Fetch completed");
        Ok(body)
    }
}
