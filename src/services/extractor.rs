use std::sync::Arc;

use scraper::{ElementRef, Selector};
use url::Url;

use crate::{
    configuration::SourceSettings,
    domain::{CandidateOutcome, OmitReason, Source},
};

use super::{
    AmazonScraper, EbayScraper, ExtractError, FeebeeScraper, PchomeScraper, QueryParams,
};

/// Request shape and extraction rules of one catalog.
pub trait Extractor: Send + Sync + 'static {
    fn source(&self) -> Source;

    fn endpoint(&self) -> &str;

    fn query(&self, keyword: &str, page: u32) -> QueryParams;

    /// Turns one response body into per-candidate outcomes. Pure: the same body
    /// always yields the same outcomes.
    fn extract(&self, body: &str) -> Result<Vec<CandidateOutcome>, ExtractError>;
}

pub fn extractor_for(source: Source, sources: &SourceSettings) -> Arc<dyn Extractor> {
    match source {
        Source::Feebee => Arc::new(FeebeeScraper::new(sources.feebee.clone())),
        Source::Pchome => Arc::new(PchomeScraper::new(sources.pchome.clone())),
        Source::Amazon => Arc::new(AmazonScraper::new(sources.amazon.clone())),
        Source::Ebay => Arc::new(EbayScraper::new(sources.ebay.clone())),
    }
}

pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("hard-coded selector must parse")
}

pub(crate) fn child_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|child| child.text().collect::<String>())
}

pub(crate) fn child_attr(element: &ElementRef, selector: &Selector, attr: &str) -> Option<String> {
    element
        .select(selector)
        .next()
        .and_then(|child| child.value().attr(attr))
        .map(|v| v.to_string())
}

/// Resolves `href` against the page it was found on.
pub(crate) fn absolute_link(page_url: &str, href: &str) -> Result<String, OmitReason> {
    let href = href.trim();
    if href.is_empty() {
        return Err(OmitReason::EmptyField("link"));
    }

    let url = Url::parse(page_url)
        .and_then(|base| base.join(href))
        .map_err(|_| OmitReason::InvalidLink(href.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        _ => Err(OmitReason::InvalidLink(href.to_string())),
    }
}

/// Rewrites the link of an extracted listing into an absolute URL, omitting the
/// candidate when that is not possible.
pub(crate) fn resolve_link(outcome: CandidateOutcome, page_url: &str) -> CandidateOutcome {
    match outcome {
        CandidateOutcome::Extracted(mut listing) => match absolute_link(page_url, &listing.link) {
            Ok(link) => {
                listing.link = link;
                CandidateOutcome::Extracted(listing)
            }
            Err(reason) => CandidateOutcome::Omitted(reason),
        },
        omitted => omitted,
    }
}
