//! ESearch URL construction.
//!
//! Builds the query string for the E-utilities `esearch.fcgi` endpoint from
//! a typed parameter set. Pure string work: no network access, deterministic
//! for identical inputs.

use tracing::warn;

/// Default number of results per search (PubMed caps at 10000)
pub const DEFAULT_RETMAX: u32 = 20;

/// Retrieval type for ESearch results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetType {
    /// Return the list of UIDs
    UiList,
    /// Return only the match count
    Count,
}

impl RetType {
    /// Convert to the E-utilities query parameter value
    pub fn as_api_param(&self) -> &'static str {
        match self {
            RetType::UiList => "uilist",
            RetType::Count => "count",
        }
    }
}

/// Retrieval mode (response format) for ESearch results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetMode {
    Xml,
    Json,
}

impl RetMode {
    /// Convert to the E-utilities query parameter value
    pub fn as_api_param(&self) -> &'static str {
        match self {
            RetMode::Xml => "xml",
            RetMode::Json => "json",
        }
    }
}

/// Sort order for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PublicationDate,
    Author,
    JournalName,
    Relevance,
}

impl SortOrder {
    /// Convert to the E-utilities query parameter value
    pub fn as_api_param(&self) -> &'static str {
        match self {
            SortOrder::PublicationDate => "pub_date",
            SortOrder::Author => "Author",
            SortOrder::JournalName => "JournalName",
            SortOrder::Relevance => "relevance",
        }
    }
}

/// Date field used for date filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateType {
    /// Modification date
    Modification,
    /// Publication date
    Publication,
    /// Entrez entry date
    Entry,
}

impl DateType {
    /// Convert to the E-utilities query parameter value
    pub fn as_api_param(&self) -> &'static str {
        match self {
            DateType::Modification => "mdat",
            DateType::Publication => "pdat",
            DateType::Entry => "edat",
        }
    }
}

/// Optional ESearch parameters. Unset fields are omitted from the URL.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Index of the first UID to retrieve
    pub retstart: Option<u32>,
    /// Maximum number of UIDs to retrieve (defaults to [`DEFAULT_RETMAX`])
    pub retmax: Option<u32>,
    /// Retrieval type
    pub rettype: Option<RetType>,
    /// Retrieval mode (defaults to XML)
    pub retmode: Option<RetMode>,
    /// Sort order for UIDs
    pub sort: Option<SortOrder>,
    /// Restrict the search to a specific field (e.g. "title")
    pub field: Option<String>,
    /// Date field for reldate/mindate/maxdate filtering
    pub datetype: Option<DateType>,
    /// Restrict to items within the last N days
    pub reldate: Option<u32>,
    /// Start of date range (YYYY/MM/DD, YYYY/MM, or YYYY); requires maxdate
    pub mindate: Option<String>,
    /// End of date range (same formats); requires mindate
    pub maxdate: Option<String>,
}

/// Percent-encode a query parameter value, with `+` for spaces as the
/// E-utilities endpoints expect
fn encode_param(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

/// Build the full ESearch URL for a term and parameter set.
///
/// Always emits `db=pubmed`, the term, `retmode` (default `xml`) and
/// `retmax` (default 20). Optional parameters are appended only when set.
/// `mindate` and `maxdate` are a linked pair: if only one is given, both
/// are dropped and a warning is logged.
///
/// # Example
///
/// ```
/// use pubmed_fetch::pubmed::{build_esearch_url, SearchParams};
///
/// let url = build_esearch_url(
///     "https://eutils.ncbi.nlm.nih.gov/entrez/eutils",
///     "woody plant AND sucrose",
///     &SearchParams::default(),
/// );
/// assert!(url.contains("term=woody+plant+AND+sucrose"));
/// assert!(url.contains("retmax=20"));
/// ```
pub fn build_esearch_url(base_url: &str, term: &str, params: &SearchParams) -> String {
    let mut url = format!(
        "{}/esearch.fcgi?db=pubmed&term={}&retmode={}&retmax={}",
        base_url,
        encode_param(term),
        params.retmode.unwrap_or(RetMode::Xml).as_api_param(),
        params.retmax.unwrap_or(DEFAULT_RETMAX),
    );

    if let Some(retstart) = params.retstart {
        url.push_str(&format!("&retstart={}", retstart));
    }
    if let Some(rettype) = params.rettype {
        url.push_str(&format!("&rettype={}", rettype.as_api_param()));
    }
    if let Some(sort) = params.sort {
        url.push_str(&format!("&sort={}", sort.as_api_param()));
    }
    if let Some(field) = &params.field {
        url.push_str(&format!("&field={}", encode_param(field)));
    }
    if let Some(datetype) = params.datetype {
        url.push_str(&format!("&datetype={}", datetype.as_api_param()));
    }
    if let Some(reldate) = params.reldate {
        url.push_str(&format!("&reldate={}", reldate));
    }

    match (&params.mindate, &params.maxdate) {
        (Some(mindate), Some(maxdate)) => {
            url.push_str(&format!(
                "&mindate={}&maxdate={}",
                encode_param(mindate),
                encode_param(maxdate)
            ));
        }
        (Some(_), None) | (None, Some(_)) => {
            warn!("Both mindate and maxdate must be provided for date range filtering");
        }
        (None, None) => {}
    }

    url
}
