use scraper::Html;

use crate::domain::{CandidateFields, CandidateOutcome, Source};

use super::{
    extractor::{child_attr, child_text, resolve_link, selector},
    ExtractError, Extractor, QueryParams,
};

pub struct EbayScraper {
    url: String,
}

impl EbayScraper {
    pub fn new(url: String) -> Self {
        EbayScraper { url }
    }
}

impl Extractor for EbayScraper {
    fn source(&self) -> Source {
        Source::Ebay
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    fn query(&self, keyword: &str, page: u32) -> QueryParams {
        vec![("_nkw", keyword.to_string()), ("_pgn", page.to_string())]
    }

    fn extract(&self, body: &str) -> Result<Vec<CandidateOutcome>, ExtractError> {
        let info_selector = selector("div.s-item__info.clearfix");
        let title_selector = selector("div.s-item__title");
        let price_selector = selector("span.s-item__price");
        let link_selector = selector("a.s-item__link");

        let html_document = Html::parse_document(body);

        let outcomes = html_document
            .select(&info_selector)
            .map(|info| {
                let fields = CandidateFields {
                    title: child_text(&info, &title_selector),
                    price: child_text(&info, &price_selector),
                    link: child_attr(&info, &link_selector, "href"),
                    store: None,
                };
                resolve_link(fields.into_outcome(Source::Ebay), &self.url)
            })
            .collect();

        Ok(outcomes)
    }
}
