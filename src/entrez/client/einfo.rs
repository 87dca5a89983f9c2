//! EInfo operations: database catalog, per-database metadata, saved reports

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::entrez::models::{DatabaseInfo, FieldInfo, ValidationCatalog};
use crate::entrez::params::RetMode;
use crate::entrez::request::InfoRequest;
use crate::entrez::responses::EInfoResponse;
use crate::error::{EntrezError, Result};

use super::EntrezClient;

impl EntrezClient {
    /// Execute an EInfo request and return the body unparsed
    ///
    /// The caller decides whether to persist or parse the payload.
    #[instrument(skip(self, request))]
    pub async fn info_raw(&self, request: &InfoRequest) -> Result<String> {
        let url = self.einfo_url(&request.build_query());
        debug!("Making EInfo API request");
        let response = self.make_request(&url).await?;
        Ok(response.text().await?)
    }

    /// Get the names of all valid Entrez databases
    ///
    /// # Example
    ///
    /// ```no_run
    /// use entrez_client::EntrezClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = EntrezClient::new();
    ///     let databases = client.database_list().await?;
    ///     println!("{} databases available", databases.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self))]
    pub async fn database_list(&self) -> Result<Vec<String>> {
        let request = InfoRequest::new().retmode(RetMode::Json);
        let url = self.einfo_url(&request.build_query());

        debug!("Making EInfo API request for database list");
        let response = self.make_request(&url).await?;
        let envelope: EInfoResponse = response.json().await?;

        if let Some(error) = envelope.einforesult.error {
            return Err(EntrezError::ApiError {
                status: 200,
                message: format!("NCBI EInfo API error: {error}"),
            });
        }

        let db_list = envelope.einforesult.dblist.unwrap_or_default();
        info!(databases_found = db_list.len(), "Database list retrieved");
        Ok(db_list)
    }

    /// Build a fresh validation catalog from the live database list
    ///
    /// The catalog is intentionally not cached; each validation observes the
    /// service's current state.
    pub async fn validation_catalog(&self) -> Result<ValidationCatalog> {
        Ok(ValidationCatalog::new(self.database_list().await?))
    }

    /// Get metadata for a single database, including its indexed fields
    ///
    /// # Example
    ///
    /// ```no_run
    /// use entrez_client::EntrezClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = EntrezClient::new();
    ///     let db_info = client.database_info("pubmed").await?;
    ///     println!("{}: {} fields", db_info.name, db_info.fields.len());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(database = %database))]
    pub async fn database_info(&self, database: &str) -> Result<DatabaseInfo> {
        if database.trim().is_empty() {
            return Err(EntrezError::InvalidParameter {
                parameter: "db",
                value: database.to_string(),
            });
        }

        let request = InfoRequest::new().database(database).retmode(RetMode::Json);
        let url = self.einfo_url(&request.build_query());

        debug!("Making EInfo API request for database details");
        let response = self.make_request(&url).await?;
        let envelope: EInfoResponse = response.json().await?;

        if let Some(error) = envelope.einforesult.error {
            return Err(EntrezError::ApiError {
                status: 200,
                message: format!("NCBI EInfo API error: {error}"),
            });
        }

        let db_info = envelope
            .einforesult
            .dbinfo
            .and_then(|list| list.into_iter().next())
            .ok_or_else(|| EntrezError::ApiError {
                status: 404,
                message: format!("Database '{database}' not found or no information available"),
            })?;

        let fields = db_info
            .fieldlist
            .unwrap_or_default()
            .into_iter()
            .map(|field| FieldInfo {
                name: field.name,
                full_name: field.fullname,
                description: field.description,
                is_date: field.isdate.as_deref() == Some("Y"),
                is_numerical: field.isnumerical.as_deref() == Some("Y"),
            })
            .collect::<Vec<_>>();

        let database_info = DatabaseInfo {
            name: db_info.dbname,
            menu_name: db_info.menuname,
            description: db_info.description,
            record_count: db_info.count.and_then(|s| s.parse().ok()),
            last_update: db_info.lastupdate,
            fields,
        };

        info!(
            fields_count = database_info.fields.len(),
            "Database information retrieved"
        );
        Ok(database_info)
    }

    /// Fetch an EInfo report and save it as `info.xml` or `info.json`
    ///
    /// JSON is pretty-printed before writing; XML is written verbatim.
    /// The target directory must already exist and be writable.
    ///
    /// # Returns
    ///
    /// The path of the written file.
    #[instrument(skip(self), fields(retmode = %retmode))]
    pub async fn save_info(
        &self,
        database: Option<&str>,
        retmode: RetMode,
        directory: &Path,
    ) -> Result<PathBuf> {
        if !directory.is_dir() {
            return Err(EntrezError::InvalidOutputDirectory {
                path: directory.to_path_buf(),
                message: "not an existing directory".to_string(),
            });
        }

        let mut request = InfoRequest::new().retmode(retmode);
        if let Some(database) = database {
            request = request.database(database);
        }

        let body = self.info_raw(&request).await?;

        let contents = match request.retmode_value() {
            RetMode::Json => {
                let value: serde_json::Value = serde_json::from_str(&body)?;
                serde_json::to_string_pretty(&value)?
            }
            RetMode::Xml => body,
        };

        let full_path = directory.join(format!("info.{}", retmode.file_extension()));
        tokio::fs::write(&full_path, contents).await.map_err(|e| {
            EntrezError::InvalidOutputDirectory {
                path: directory.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        info!(path = %full_path.display(), "EInfo response saved");
        Ok(full_path)
    }
}
