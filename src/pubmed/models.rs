use serde::{Deserialize, Serialize};

/// Result of a PubMed search: the matching PMIDs plus count information
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchResult {
    /// Total number of articles matching the query
    pub total: u64,
    /// Number of PMIDs returned in this page
    pub page_size: u64,
    /// Matching PMIDs in the order upstream returned them
    pub id_list: Vec<String>,
}

/// Simplified article metadata extracted from an EFetch response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ArticleInfo {
    /// Canonical PubMed URL for the article
    pub url: String,
    /// Article title, or "No title available"
    pub title: String,
    /// Abstract text, or "No abstract available"
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Author names as "LastName ForeName"
    pub authors: Vec<String>,
    /// Revision date as "YYYY-MM-DD", or empty when upstream has none
    pub date_revised: String,
    /// Author-supplied keywords
    pub keywords: Vec<String>,
    /// PMC identifier, when the record has an associated full-text deposit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pmc_id: Option<String>,
}
