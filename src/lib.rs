//! # PubMed Fetch API
//!
//! A small HTTP service proxying the NCBI PubMed E-utilities APIs:
//! searching articles by term, fetching simplified article metadata, and
//! downloading PDF full text from PMC (PubMed Central).
//!
//! The library exposes the building blocks directly:
//!
//! - [`pubmed::build_esearch_url`] / [`pubmed::SearchParams`] - typed
//!   construction of ESearch query URLs
//! - [`pubmed::parse_esearch_response`] / [`pubmed::parse_article_xml`] -
//!   translation of the upstream XML into plain records
//! - [`PubMedClient`] / [`PmcClient`] - upstream HTTP clients
//! - [`PdfStorage`] - persistence of downloaded PDFs
//! - [`server::build_router`] - the axum router wiring it all together
//!
//! ## Quick Start
//!
//! ```no_run
//! use pubmed_fetch::{Config, PubMedClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let client = PubMedClient::with_config(&config);
//!
//!     let result = client.search("woody plant AND sucrose", Some(10)).await?;
//!     println!("Found {} articles", result.total);
//!
//!     for pmid in &result.id_list {
//!         let info = client.fetch_article_info(pmid).await?;
//!         println!("{}: {}", pmid, info.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod pmc;
pub mod pubmed;
pub mod server;

// Re-export main types for convenience
pub use config::Config;
pub use error::{PubMedError, Result};
pub use pmc::{PdfStorage, PmcClient};
pub use pubmed::{ArticleInfo, PubMedClient, SearchParams, SearchResult};
