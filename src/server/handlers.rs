//! Request handlers for the three API operations.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::PubMedError;
use crate::pubmed::models::{ArticleInfo, SearchResult};
use crate::server::SharedState;

/// JSON body returned for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for PubMedError {
    fn into_response(self) -> Response {
        let status = match &self {
            PubMedError::InvalidQuery(_) | PubMedError::InvalidPmid { .. } => {
                StatusCode::BAD_REQUEST
            }
            PubMedError::ArticleNotFound { .. } => StatusCode::NOT_FOUND,
            PubMedError::RequestError(_)
            | PubMedError::ApiError { .. }
            | PubMedError::XmlError(_) => StatusCode::BAD_GATEWAY,
            PubMedError::IoError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQueryParams {
    pub term: Option<String>,
    pub retmax: Option<u32>,
}

/// GET /search - search PubMed for articles matching the given term
pub async fn search_pubmed(
    State(state): State<SharedState>,
    Query(params): Query<SearchQueryParams>,
) -> Result<Json<SearchResult>, PubMedError> {
    let term = params.term.as_deref().unwrap_or("");
    if term.trim().is_empty() {
        return Err(PubMedError::InvalidQuery(
            "missing required query parameter: term".to_string(),
        ));
    }

    let result = state.pubmed.search(term, params.retmax).await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct InfoQueryParams {
    pub pmid: Option<String>,
}

/// GET /einfo - fetch simplified article metadata for a PMID
pub async fn einfo_pubmed(
    State(state): State<SharedState>,
    Query(params): Query<InfoQueryParams>,
) -> Result<Json<ArticleInfo>, PubMedError> {
    let pmid = params.pmid.as_deref().unwrap_or("");
    if pmid.trim().is_empty() {
        return Err(PubMedError::InvalidQuery(
            "missing required query parameter: pmid".to_string(),
        ));
    }

    let info = state.pubmed.fetch_article_info(pmid).await?;
    Ok(Json(info))
}

#[derive(Debug, Deserialize)]
pub struct DownloadQueryParams {
    pub pmc_id: Option<String>,
}

/// JSON body returned by a successful download: the saved file's location
#[derive(Debug, Serialize, Deserialize)]
pub struct DownloadResponse {
    pub file_path: String,
}

/// GET /download - download a PDF from PMC and save it to the configured
/// directory, returning the saved path
pub async fn download_pdf(
    State(state): State<SharedState>,
    Query(params): Query<DownloadQueryParams>,
) -> Result<Json<DownloadResponse>, PubMedError> {
    let pmc_id = params.pmc_id.as_deref().unwrap_or("");
    if pmc_id.trim().is_empty() {
        return Err(PubMedError::InvalidQuery(
            "missing required query parameter: pmc_id".to_string(),
        ));
    }

    let normalized = state.pmc.normalize_pmcid(pmc_id);
    let bytes = state.pmc.fetch_pdf(&normalized).await?;
    let path = state.storage.save_pdf(&normalized, bytes).await?;

    Ok(Json(DownloadResponse {
        file_path: path.display().to_string(),
    }))
}
