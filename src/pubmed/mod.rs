//! PubMed E-utilities integration: search URL construction, XML response
//! translation, and the upstream HTTP client.

pub mod client;
pub mod models;
pub mod parser;
pub mod query;

pub use client::PubMedClient;
pub use models::{ArticleInfo, SearchResult};
pub use parser::{parse_article_xml, parse_esearch_response};
pub use query::{DateType, RetMode, RetType, SearchParams, SortOrder, build_esearch_url};
