use scraper::Html;

use crate::domain::{CandidateFields, CandidateOutcome, Source};

use super::{
    extractor::{resolve_link, selector},
    ExtractError, Extractor, QueryParams,
};

/// Feebee is a comparison site: every `<li>` of its result list carries the
/// product as `data-*` attributes, including the merchant it links to.
pub struct FeebeeScraper {
    url: String,
}

impl FeebeeScraper {
    pub fn new(url: String) -> Self {
        FeebeeScraper { url }
    }
}

impl Extractor for FeebeeScraper {
    fn source(&self) -> Source {
        Source::Feebee
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    fn query(&self, keyword: &str, page: u32) -> QueryParams {
        vec![("q", keyword.to_string()), ("page", page.to_string())]
    }

    fn extract(&self, body: &str) -> Result<Vec<CandidateOutcome>, ExtractError> {
        let ol_selector = selector("ol");
        let li_selector = selector("li");
        let html_document = Html::parse_document(body);

        let Some(result_list) = html_document.select(&ol_selector).next() else {
            log::debug!("Feebee page has no result list");
            return Ok(vec![]);
        };

        let outcomes = result_list
            .select(&li_selector)
            .map(|item| {
                let attr = |name: &str| item.value().attr(name).map(|v| v.to_string());
                let fields = CandidateFields {
                    title: attr("data-title"),
                    price: attr("data-price"),
                    link: attr("data-url"),
                    store: attr("data-store"),
                };
                resolve_link(fields.into_outcome(Source::Feebee), &self.url)
            })
            .collect();

        Ok(outcomes)
    }
}
