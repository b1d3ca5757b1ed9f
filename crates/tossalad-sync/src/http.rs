//! REST store client for the hosted analysis database.
//!
//! Speaks the PostgREST dialect: one `GET` on `companies` with the
//! document and result tables embedded through the select parameter.

use async_trait::async_trait;
use tossalad_core::Company;
use tossalad_store::{RecordStore, StoreError};
use tracing::info;

/// Embedded select: documents with their results, plus results keyed only
/// by company.
const COMPANY_SELECT: &str = "*,documents(*,analysis_results(*)),analysis_results(*)";

/// Store accessor for the hosted database's REST endpoint.
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    /// Create a client for the given project URL.
    ///
    /// `base_url` should be like `https://xyz.supabase.co` (a trailing slash
    /// is dropped). `api_key` is sent as both `apikey` and bearer token.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn companies_url(&self) -> String {
        format!(
            "{}/rest/v1/companies?select={}&order=name.asc",
            self.base_url, COMPANY_SELECT
        )
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn fetch_all_companies(&self) -> Result<Vec<Company>, StoreError> {
        let url = self.companies_url();

        info!(url = %url, "fetching companies with documents and results");
        let resp = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| StoreError::Fetch(e.into()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| StoreError::Fetch(e.into()))?;
        let companies: Vec<Company> = serde_json::from_slice(&bytes)?;
        info!(count = companies.len(), "fetched companies");
        Ok(companies)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
