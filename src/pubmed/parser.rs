//! Translation of E-utilities XML responses into plain records.
//!
//! Both translators are tolerant of sparse input: every output field has a
//! defined fallback, and only malformed XML is an error.

use std::io::BufReader;

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

use crate::error::{PubMedError, Result};
use crate::pubmed::models::{ArticleInfo, SearchResult};

/// Base URL for canonical article links in [`ArticleInfo::url`]
const ARTICLE_URL_BASE: &str = "https://pubmed.ncbi.nlm.nih.gov";

/// Sentinel title for records without an `ArticleTitle` element
pub const NO_TITLE: &str = "No title available";

/// Sentinel abstract for records without an `AbstractText` element
pub const NO_ABSTRACT: &str = "No abstract available";

/// Collapse runs of whitespace to single spaces and trim the ends
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse an ESearch XML response into a [`SearchResult`].
///
/// `total` and `page_size` come from `<Count>` and `<RetMax>` (first
/// occurrence each, matching the document-level fields), defaulting to 0
/// when absent or unparseable. `id_list` collects every `<IdList>/<Id>` in
/// document order; an empty list is not an error.
pub fn parse_esearch_response(xml: &str) -> Result<SearchResult> {
    let mut reader = Reader::from_reader(BufReader::new(xml.as_bytes()));
    reader.config_mut().trim_text(true);

    let mut total: Option<u64> = None;
    let mut page_size: Option<u64> = None;
    let mut id_list: Vec<String> = Vec::new();

    let mut buf = Vec::new();
    let mut in_count = false;
    let mut in_retmax = false;
    let mut in_id_list = false;
    let mut in_id = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                // Nested <Count> elements also appear under <TranslationStack>;
                // only the first (document-level) one is the total.
                b"Count" if !in_id_list => in_count = true,
                b"RetMax" => in_retmax = true,
                b"IdList" => in_id_list = true,
                b"Id" if in_id_list => in_id = true,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"Count" => in_count = false,
                b"RetMax" => in_retmax = false,
                b"IdList" => in_id_list = false,
                b"Id" => in_id = false,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| PubMedError::XmlError(format!("Failed to decode XML text: {}", e)))?
                    .into_owned();

                if in_count && total.is_none() {
                    total = Some(text.trim().parse().unwrap_or(0));
                } else if in_retmax && page_size.is_none() {
                    page_size = Some(text.trim().parse().unwrap_or(0));
                } else if in_id {
                    id_list.push(text.trim().to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(PubMedError::XmlError(format!("XML parsing error: {}", e)));
            }
            _ => {}
        }
        buf.clear();
    }

    debug!(
        total = total.unwrap_or(0),
        ids_parsed = id_list.len(),
        "Parsed ESearch response"
    );

    Ok(SearchResult {
        total: total.unwrap_or(0),
        page_size: page_size.unwrap_or(0),
        id_list,
    })
}

/// Parse an EFetch XML response into an [`ArticleInfo`].
///
/// Extraction policy:
/// - `title`/`abstract`: all nested text flattened and whitespace-collapsed,
///   with [`NO_TITLE`]/[`NO_ABSTRACT`] sentinels when empty or absent
/// - `date_revised`: `"{Year}-{Month}-{Day}"` from `<DateRevised>`; empty
///   when the element is absent or any sub-field is missing
/// - `authors`: `"LastName ForeName"` (trimmed) for every `<Author>` in
///   document order, wherever it appears
/// - `keywords`: every `<Keyword>` with non-empty text, in document order
/// - `pmc_id`: `<ArticleId IdType="pmc">` when present
///
/// Returns [`PubMedError::ArticleNotFound`] when the document contains no
/// `<PubmedArticle>` record at all (the upstream response for an unknown
/// PMID is an empty article set).
pub fn parse_article_xml(xml: &str, pmid: &str) -> Result<ArticleInfo> {
    let mut reader = Reader::from_reader(BufReader::new(xml.as_bytes()));
    reader.config_mut().trim_text(true);

    let mut saw_article = false;
    let mut title = String::new();
    let mut abstract_text = String::new();
    let mut authors: Vec<String> = Vec::new();
    let mut keywords: Vec<String> = Vec::new();
    let mut pmc_id: Option<String> = None;

    let mut buf = Vec::new();
    let mut in_article_title = false;
    let mut in_abstract_text = false;
    let mut in_author = false;
    let mut in_last_name = false;
    let mut in_fore_name = false;
    let mut in_keyword = false;
    let mut in_pmc_article_id = false;
    let mut current_author_last = String::new();
    let mut current_author_fore = String::new();
    let mut current_keyword = String::new();

    // DateRevised parsing state
    let mut saw_date_revised = false;
    let mut in_date_revised = false;
    let mut in_dr_year = false;
    let mut in_dr_month = false;
    let mut in_dr_day = false;
    let mut dr_year: Option<String> = None;
    let mut dr_month: Option<String> = None;
    let mut dr_day: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"PubmedArticle" => saw_article = true,
                b"ArticleTitle" => in_article_title = true,
                b"AbstractText" => in_abstract_text = true,
                b"Author" => {
                    in_author = true;
                    current_author_last.clear();
                    current_author_fore.clear();
                }
                b"LastName" if in_author => in_last_name = true,
                b"ForeName" if in_author => in_fore_name = true,
                b"Keyword" => {
                    in_keyword = true;
                    current_keyword.clear();
                }
                b"DateRevised" => {
                    saw_date_revised = true;
                    in_date_revised = true;
                }
                b"Year" if in_date_revised => in_dr_year = true,
                b"Month" if in_date_revised => in_dr_month = true,
                b"Day" if in_date_revised => in_dr_day = true,
                b"ArticleId" => {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"IdType" && attr.value.as_ref() == b"pmc" {
                            in_pmc_article_id = true;
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"ArticleTitle" => in_article_title = false,
                b"AbstractText" => in_abstract_text = false,
                b"Author" => {
                    if in_author {
                        let name = format!("{} {}", current_author_last, current_author_fore);
                        authors.push(name.trim().to_string());
                        in_author = false;
                    }
                }
                b"LastName" => in_last_name = false,
                b"ForeName" => in_fore_name = false,
                b"Keyword" => {
                    if in_keyword {
                        let keyword = normalize_whitespace(&current_keyword);
                        if !keyword.is_empty() {
                            keywords.push(keyword);
                        }
                        in_keyword = false;
                    }
                }
                b"DateRevised" => in_date_revised = false,
                b"Year" => in_dr_year = false,
                b"Month" => in_dr_month = false,
                b"Day" => in_dr_day = false,
                b"ArticleId" => in_pmc_article_id = false,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| PubMedError::XmlError(format!("Failed to decode XML text: {}", e)))?
                    .into_owned();

                if in_article_title {
                    if !title.is_empty() {
                        title.push(' ');
                    }
                    title.push_str(&text);
                } else if in_abstract_text {
                    if !abstract_text.is_empty() {
                        abstract_text.push(' ');
                    }
                    abstract_text.push_str(&text);
                } else if in_last_name && in_author {
                    current_author_last = text;
                } else if in_fore_name && in_author {
                    current_author_fore = text;
                } else if in_keyword {
                    if !current_keyword.is_empty() {
                        current_keyword.push(' ');
                    }
                    current_keyword.push_str(&text);
                } else if in_dr_year && in_date_revised {
                    dr_year = Some(text);
                } else if in_dr_month && in_date_revised {
                    dr_month = Some(text);
                } else if in_dr_day && in_date_revised {
                    dr_day = Some(text);
                } else if in_pmc_article_id {
                    pmc_id = Some(text.trim().to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(PubMedError::XmlError(format!("XML parsing error: {}", e)));
            }
            _ => {}
        }
        buf.clear();
    }

    if !saw_article {
        debug!("No PubmedArticle record in XML, article not found");
        return Err(PubMedError::ArticleNotFound {
            pmid: pmid.to_string(),
        });
    }

    let title = normalize_whitespace(&title);
    let abstract_text = normalize_whitespace(&abstract_text);

    // A partially specified revision date is dropped rather than emitted
    // with an embedded placeholder.
    let date_revised = match (saw_date_revised, dr_year, dr_month, dr_day) {
        (true, Some(year), Some(month), Some(day)) => format!("{}-{}-{}", year, month, day),
        _ => String::new(),
    };

    debug!(
        authors_parsed = authors.len(),
        keywords_count = keywords.len(),
        has_pmc_id = pmc_id.is_some(),
        "Completed EFetch XML parsing"
    );

    Ok(ArticleInfo {
        url: format!("{}/{}/", ARTICLE_URL_BASE, pmid),
        title: if title.is_empty() {
            NO_TITLE.to_string()
        } else {
            title
        },
        abstract_text: if abstract_text.is_empty() {
            NO_ABSTRACT.to_string()
        } else {
            abstract_text
        },
        authors,
        date_revised,
        keywords,
        pmc_id,
    })
}
