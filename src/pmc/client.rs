use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::{PubMedError, Result};

/// Client for downloading article PDFs from PMC (PubMed Central)
#[derive(Clone)]
pub struct PmcClient {
    client: Client,
    base_url: String,
}

impl PmcClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(&Config::new())
    }

    /// Create a new client from a [`Config`]
    pub fn with_config(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.effective_user_agent())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.effective_pmc_base_url().to_string(),
        }
    }

    /// Normalize a PMC ID to its canonical `PMC`-prefixed form
    pub fn normalize_pmcid(&self, pmcid: &str) -> String {
        let trimmed = pmcid.trim();
        if trimmed.starts_with("PMC") {
            trimmed.to_string()
        } else {
            format!("PMC{}", trimmed)
        }
    }

    /// Download the PDF full text for a PMC ID
    ///
    /// Issues a single GET to `{base}/{PMCID}/pdf/`; any non-success status
    /// aborts the call with the upstream status and body.
    ///
    /// # Errors
    ///
    /// * [`PubMedError::InvalidPmid`] - malformed PMC ID, rejected before
    ///   any network call
    /// * [`PubMedError::ApiError`] - upstream returned a non-success status
    #[instrument(skip(self), fields(pmc_id = %pmc_id))]
    pub async fn fetch_pdf(&self, pmc_id: &str) -> Result<Vec<u8>> {
        let normalized = self.normalize_pmcid(pmc_id);

        let digits = normalized.trim_start_matches("PMC");
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            warn!("Invalid PMC ID format provided");
            return Err(PubMedError::InvalidPmid {
                pmid: pmc_id.to_string(),
            });
        }

        let url = format!("{}/{}/pdf/", self.base_url, normalized);

        debug!("Downloading PDF from PMC");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "PDF request failed");
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown error").into());
            return Err(PubMedError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        debug!(size = bytes.len(), "Downloaded PDF");

        Ok(bytes.to_vec())
    }
}

impl Default for PmcClient {
    fn default() -> Self {
        Self::new()
    }
}
