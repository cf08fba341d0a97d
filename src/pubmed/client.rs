use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::error::{PubMedError, Result};
use crate::pubmed::models::{ArticleInfo, SearchResult};
use crate::pubmed::parser;
use crate::pubmed::query::{SearchParams, build_esearch_url};

/// Client for the PubMed E-utilities endpoints (ESearch, EFetch)
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
}

impl PubMedClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(&Config::new())
    }

    /// Create a new client from a [`Config`]
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_fetch::{Config, PubMedClient};
    ///
    /// let config = Config::new().with_user_agent("my-tool/1.0");
    /// let client = PubMedClient::with_config(&config);
    /// ```
    pub fn with_config(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.effective_user_agent())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.effective_eutils_base_url().to_string(),
        }
    }

    /// Search PubMed for a term, returning matching PMIDs with count
    /// information
    ///
    /// # Arguments
    ///
    /// * `term` - Search term (must be non-empty)
    /// * `retmax` - Maximum number of results (default 20 when `None`)
    ///
    /// # Errors
    ///
    /// * [`PubMedError::InvalidQuery`] - empty term, rejected before any
    ///   network call
    /// * [`PubMedError::ApiError`] - upstream returned a non-success status
    /// * [`PubMedError::XmlError`] - upstream body was not parseable XML
    pub async fn search(&self, term: &str, retmax: Option<u32>) -> Result<SearchResult> {
        let params = SearchParams {
            retmax,
            ..Default::default()
        };
        self.search_with_params(term, &params).await
    }

    /// Search PubMed with the full ESearch parameter set
    #[instrument(skip(self, params), fields(term = %term))]
    pub async fn search_with_params(
        &self,
        term: &str,
        params: &SearchParams,
    ) -> Result<SearchResult> {
        if term.trim().is_empty() {
            warn!("Empty search term provided");
            return Err(PubMedError::InvalidQuery(
                "search term must not be empty".to_string(),
            ));
        }

        let url = build_esearch_url(&self.base_url, term, params);

        debug!("Making ESearch API request");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "ESearch request failed");
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown error").into());
            return Err(PubMedError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let xml_text = response.text().await?;
        let result = parser::parse_esearch_response(&xml_text)?;

        info!(
            total = result.total,
            results_returned = result.id_list.len(),
            "Search completed"
        );

        Ok(result)
    }

    /// Fetch simplified article metadata by PMID
    ///
    /// # Errors
    ///
    /// * [`PubMedError::InvalidPmid`] - PMID is empty or not all digits,
    ///   rejected before any network call
    /// * [`PubMedError::ArticleNotFound`] - upstream returned an empty
    ///   article set
    /// * [`PubMedError::ApiError`] - upstream returned a non-success status
    #[instrument(skip(self), fields(pmid = %pmid))]
    pub async fn fetch_article_info(&self, pmid: &str) -> Result<ArticleInfo> {
        if pmid.trim().is_empty() || !pmid.chars().all(|c| c.is_ascii_digit()) {
            warn!("Invalid PMID format provided");
            return Err(PubMedError::InvalidPmid {
                pmid: pmid.to_string(),
            });
        }

        let url = format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml",
            self.base_url, pmid
        );

        debug!("Making EFetch API request");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "EFetch request failed");
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown error").into());
            return Err(PubMedError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let xml_text = response.text().await?;
        let info = parser::parse_article_xml(&xml_text, pmid)?;

        info!(
            title = %info.title,
            authors_count = info.authors.len(),
            "Fetched article metadata"
        );

        Ok(info)
    }
}

impl Default for PubMedClient {
    fn default() -> Self {
        Self::new()
    }
}
