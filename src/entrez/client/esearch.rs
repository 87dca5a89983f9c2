//! ESearch operations: text queries returning matching UIDs

use tracing::{debug, info, instrument};

use crate::entrez::models::SearchOutcome;
use crate::entrez::request::SearchRequest;
use crate::entrez::responses::ESearchResponse;
use crate::error::{EntrezError, Result};

use super::EntrezClient;

impl EntrezClient {
    /// Submit a text query against a database
    ///
    /// Before any esearch request goes out, the database name is checked
    /// against the live catalog and, when a `datetype` is set, the field name
    /// is checked against the database's indexed fields (case-insensitively).
    /// Both checks are advisory: they exist to fail fast with a clear error
    /// instead of an opaque remote failure.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use entrez_client::{EntrezClient, SearchRequest};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = EntrezClient::new();
    ///     let outcome = client
    ///         .search(&SearchRequest::new("pubmed", "breast+cancer+AND+2008[pdat]").retmax(50))
    ///         .await?;
    ///
    ///     println!("{} of {} UIDs returned", outcome.ids.len(), outcome.total_count);
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, request), fields(database = %request.database_name()))]
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        // Build first so local validation failures never cost a network call
        let query = request.build_query()?;

        let catalog = self.validation_catalog().await?;
        catalog.ensure_database(request.database_name())?;

        if let Some(datetype) = request.datetype_value() {
            let db_info = self.database_info(request.database_name()).await?;
            db_info.ensure_date_field(datetype)?;
        }

        self.search_unchecked(&query).await
    }

    /// Run an already-validated esearch query string
    pub(crate) async fn search_unchecked(&self, query: &str) -> Result<SearchOutcome> {
        // retmode=json is a transport concern: the client needs the envelope
        // to extract ids, count, and the history session
        let url = self.esearch_url(&format!("{query}&retmode=json"));

        debug!("Making ESearch API request");
        let response = self.make_request(&url).await?;
        let envelope: ESearchResponse = response.json().await?;
        let data = envelope.esearchresult;

        // NCBI sometimes returns 200 OK with an in-band ERROR field
        if let Some(error) = &data.error {
            return Err(EntrezError::ApiError {
                status: 200,
                message: format!("NCBI ESearch API error: {error}"),
            });
        }

        let total_count: usize = data
            .count
            .as_ref()
            .and_then(|c| c.parse().ok())
            .unwrap_or(0);

        info!(
            total_count = total_count,
            returned_count = data.idlist.len(),
            has_webenv = data.webenv.is_some(),
            "Search completed"
        );

        Ok(SearchOutcome {
            ids: data.idlist,
            total_count,
            web_env: data.webenv,
            query_key: data.querykey,
            query_translation: data.querytranslation,
        })
    }
}
