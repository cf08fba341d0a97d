//! Integration tests for the upstream clients against a mocked NCBI server.
//!
//! These verify that request URLs are built correctly, that upstream
//! responses are translated into records, and that upstream failures
//! surface with their status and body.

use pubmed_fetch::{Config, PmcClient, PubMedClient, PubMedError, SearchParams};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper: XML response from ESearch
fn esearch_xml_response(count: u64, retmax: u64, pmids: &[&str]) -> String {
    let ids: Vec<String> = pmids.iter().map(|id| format!("<Id>{}</Id>", id)).collect();
    format!(
        "<eSearchResult><Count>{}</Count><RetMax>{}</RetMax><IdList>{}</IdList></eSearchResult>",
        count,
        retmax,
        ids.join("")
    )
}

/// Helper: XML response from EFetch for a single article
fn efetch_xml_response(title: &str, pmc_id: Option<&str>) -> String {
    let pmc = pmc_id
        .map(|id| format!(r#"<ArticleId IdType="pmc">{}</ArticleId>"#, id))
        .unwrap_or_default();
    format!(
        r#"<PubmedArticleSet>
            <PubmedArticle>
                <MedlineCitation>
                    <DateRevised>
                        <Year>2024</Year>
                        <Month>01</Month>
                        <Day>31</Day>
                    </DateRevised>
                    <Article>
                        <ArticleTitle>{}</ArticleTitle>
                        <Abstract>
                            <AbstractText>An abstract.</AbstractText>
                        </Abstract>
                        <AuthorList>
                            <Author>
                                <LastName>Doe</LastName>
                                <ForeName>John</ForeName>
                            </Author>
                        </AuthorList>
                    </Article>
                    <KeywordList>
                        <Keyword>testing</Keyword>
                    </KeywordList>
                </MedlineCitation>
                <PubmedData>
                    <ArticleIdList>{}</ArticleIdList>
                </PubmedData>
            </PubmedArticle>
        </PubmedArticleSet>"#,
        title, pmc
    )
}

/// Helper: create a PubMedClient pointing at the mock server
fn create_test_client(base_url: &str) -> PubMedClient {
    let config = Config::new().with_eutils_base_url(base_url);
    PubMedClient::with_config(&config)
}

/// Helper: create a PmcClient pointing at the mock server
fn create_test_pmc_client(base_url: &str) -> PmcClient {
    let config = Config::new().with_pmc_base_url(base_url);
    PmcClient::with_config(&config)
}

#[tokio::test]
#[traced_test]
async fn test_search_parses_esearch_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("term", "asthma"))
        .and(query_param("retmode", "xml"))
        .and(query_param("retmax", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(esearch_xml_response(10, 10, &["12345", "67890"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let result = client.search("asthma", Some(10)).await.unwrap();
    assert_eq!(result.total, 10);
    assert_eq!(result.page_size, 10);
    assert_eq!(result.id_list, vec!["12345", "67890"]);
}

#[tokio::test]
async fn test_search_roundtrip_retmax_echoed_as_page_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmax", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(esearch_xml_response(5, 3, &["1", "2", "3"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let result = client.search("anything", Some(3)).await.unwrap();
    assert_eq!(result.page_size, 3);
}

#[tokio::test]
async fn test_search_with_params_passes_sort() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("sort", "pub_date"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(esearch_xml_response(1, 1, &["111"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let params = SearchParams {
        sort: Some(pubmed_fetch::pubmed::SortOrder::PublicationDate),
        ..Default::default()
    };

    let result = client.search_with_params("asthma", &params).await.unwrap();
    assert_eq!(result.id_list, vec!["111"]);
}

#[tokio::test]
async fn test_search_upstream_error_surfaces_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let err = client.search("test", None).await.unwrap_err();
    match err {
        PubMedError::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("upstream exploded"));
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_search_malformed_xml_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<eSearchResult><Count"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let err = client.search("test", None).await.unwrap_err();
    assert!(matches!(err, PubMedError::XmlError(_)));
}

#[tokio::test]
async fn test_search_empty_term_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let err = client.search("   ", None).await.unwrap_err();
    assert!(matches!(err, PubMedError::InvalidQuery(_)));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_article_info() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("id", "31978945"))
        .and(query_param("retmode", "xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(efetch_xml_response("A test article.", Some("PMC7906746"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let info = client.fetch_article_info("31978945").await.unwrap();
    assert_eq!(info.url, "https://pubmed.ncbi.nlm.nih.gov/31978945/");
    assert_eq!(info.title, "A test article.");
    assert_eq!(info.abstract_text, "An abstract.");
    assert_eq!(info.authors, vec!["Doe John"]);
    assert_eq!(info.date_revised, "2024-01-31");
    assert_eq!(info.keywords, vec!["testing"]);
    assert_eq!(info.pmc_id, Some("PMC7906746".to_string()));
}

#[tokio::test]
async fn test_fetch_article_info_empty_set_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<PubmedArticleSet></PubmedArticleSet>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let err = client.fetch_article_info("99999999").await.unwrap_err();
    assert!(matches!(err, PubMedError::ArticleNotFound { .. }));
}

#[tokio::test]
async fn test_fetch_article_info_invalid_pmid_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let err = client.fetch_article_info("not-a-pmid").await.unwrap_err();
    assert!(matches!(err, PubMedError::InvalidPmid { .. }));
}

#[tokio::test]
async fn test_fetch_pdf() {
    let mock_server = MockServer::start().await;
    let pdf_bytes = b"%PDF-1.4 fake pdf content";

    Mock::given(method("GET"))
        .and(path("/PMC7906746/pdf/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(pdf_bytes.to_vec()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_pmc_client(&mock_server.uri());

    let bytes = client.fetch_pdf("PMC7906746").await.unwrap();
    assert_eq!(bytes, pdf_bytes);
}

#[tokio::test]
async fn test_fetch_pdf_normalizes_bare_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/PMC11901808/pdf/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_pmc_client(&mock_server.uri());

    let bytes = client.fetch_pdf("11901808").await.unwrap();
    assert_eq!(bytes, b"%PDF");
}

#[tokio::test]
async fn test_fetch_pdf_upstream_error_surfaces_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("No such article"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_pmc_client(&mock_server.uri());

    let err = client.fetch_pdf("PMC404404").await.unwrap_err();
    match err {
        PubMedError::ApiError { status, message } => {
            assert_eq!(status, 404);
            assert!(message.contains("No such article"));
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}
