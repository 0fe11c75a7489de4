use scraper::Html;

use crate::domain::{CandidateFields, CandidateOutcome, Source};

use super::{
    extractor::{child_attr, child_text, resolve_link, selector},
    ExtractError, Extractor, QueryParams,
};

pub struct AmazonScraper {
    url: String,
}

impl AmazonScraper {
    pub fn new(url: String) -> Self {
        AmazonScraper { url }
    }
}

impl Extractor for AmazonScraper {
    fn source(&self) -> Source {
        Source::Amazon
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    fn query(&self, keyword: &str, page: u32) -> QueryParams {
        vec![("k", keyword.to_string()), ("page", page.to_string())]
    }

    fn extract(&self, body: &str) -> Result<Vec<CandidateOutcome>, ExtractError> {
        let result_selector = selector(r#"div[data-component-type="s-search-result"]"#);
        let title_selector = selector("h2.a-size-mini");
        let price_selector = selector("span.a-price-whole");
        let link_selector = selector("a.a-link-normal.s-no-outline");

        let html_document = Html::parse_document(body);

        let outcomes = html_document
            .select(&result_selector)
            .map(|result| {
                let fields = CandidateFields {
                    title: child_text(&result, &title_selector),
                    price: child_text(&result, &price_selector),
                    link: child_attr(&result, &link_selector, "href"),
                    store: None,
                };
                resolve_link(fields.into_outcome(Source::Amazon), &self.url)
            })
            .collect();

        Ok(outcomes)
    }
}
