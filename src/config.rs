//! Service configuration.
//!
//! A [`Config`] is constructed once at process start (from defaults or the
//! environment) and passed by reference into the components that need it.
//! Base URLs are overridable so tests can point the clients at a mock server.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default NCBI E-utilities base URL
pub const DEFAULT_EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Default PMC article base URL (PDF downloads live under `{base}/{PMCID}/pdf/`)
pub const DEFAULT_PMC_BASE_URL: &str = "https://www.ncbi.nlm.nih.gov/pmc/articles";

/// Default HTTP port for the API server
pub const DEFAULT_PORT: u16 = 8977;

/// Configuration for the fetch service and its upstream clients
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory where downloaded PDFs are written
    pub download_dir: PathBuf,
    /// Override for the E-utilities base URL (None = NCBI production)
    pub eutils_base_url: Option<String>,
    /// Override for the PMC base URL (None = NCBI production)
    pub pmc_base_url: Option<String>,
    /// Port the API server binds to
    pub port: u16,
    /// Timeout applied to upstream HTTP requests
    pub timeout: Duration,
    /// Override for the outbound User-Agent header
    pub user_agent: Option<String>,
}

impl Config {
    /// Create a configuration with defaults (temp-directory downloads,
    /// NCBI production endpoints)
    pub fn new() -> Self {
        Self {
            download_dir: env::temp_dir().join("pubmed-pdfs"),
            eutils_base_url: None,
            pmc_base_url: None,
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(30),
            user_agent: None,
        }
    }

    /// Create a configuration from defaults overridden by environment
    /// variables: `PUBMED_DOWNLOAD_DIR`, `PUBMED_EUTILS_BASE_URL`,
    /// `PUBMED_PMC_BASE_URL`, `PUBMED_PORT`
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(dir) = env::var("PUBMED_DOWNLOAD_DIR") {
            if !dir.trim().is_empty() {
                config.download_dir = PathBuf::from(dir);
            }
        }
        if let Ok(url) = env::var("PUBMED_EUTILS_BASE_URL") {
            if !url.trim().is_empty() {
                config.eutils_base_url = Some(url);
            }
        }
        if let Ok(url) = env::var("PUBMED_PMC_BASE_URL") {
            if !url.trim().is_empty() {
                config.pmc_base_url = Some(url);
            }
        }
        if let Ok(port) = env::var("PUBMED_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }

        config
    }

    /// Set the download directory
    pub fn with_download_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Set a custom E-utilities base URL (used by tests with a mock server)
    pub fn with_eutils_base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.eutils_base_url = Some(url.into());
        self
    }

    /// Set a custom PMC base URL (used by tests with a mock server)
    pub fn with_pmc_base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.pmc_base_url = Some(url.into());
        self
    }

    /// Set the server port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the upstream request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header value
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// The E-utilities base URL in effect
    pub fn effective_eutils_base_url(&self) -> &str {
        self.eutils_base_url
            .as_deref()
            .unwrap_or(DEFAULT_EUTILS_BASE_URL)
    }

    /// The PMC base URL in effect
    pub fn effective_pmc_base_url(&self) -> &str {
        self.pmc_base_url.as_deref().unwrap_or(DEFAULT_PMC_BASE_URL)
    }

    /// The User-Agent header in effect
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("pubmed-fetch/{}", env!("CARGO_PKG_VERSION")))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
