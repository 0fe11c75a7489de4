use tokio::time::{timeout_at, Instant};

use crate::domain::{CandidateOutcome, Listing};

use super::{CourtesyDelay, Extractor, Fetch, ScrapeError, TransportError};

/// The page whose request failed and ended a source's pagination.
#[derive(Debug)]
pub struct PageFailure {
    pub page: u32,
    pub error: TransportError,
}

/// Everything one source produced for a query, pages concatenated in order.
#[derive(Debug, Default)]
pub struct SourcePages {
    pub listings: Vec<Listing>,
    pub pages_fetched: u32,
    pub omitted: usize,
    pub halted: Option<PageFailure>,
}

/// Fetches pages `1..=page_count` of one catalog one after the other.
///
/// A transport failure ends pagination but keeps the pages already extracted.
/// Reaching `deadline` while waiting for a page counts as a timeout of that page.
/// A body that cannot be read at all fails the whole source.
pub async fn scrape_source<F: Fetch>(
    fetcher: &F,
    extractor: &dyn Extractor,
    keyword: &str,
    page_count: u32,
    delay: &CourtesyDelay,
    deadline: Instant,
) -> Result<SourcePages, ScrapeError> {
    let source = extractor.source();
    let mut pages = SourcePages::default();

    for page in 1..=page_count {
        let query = extractor.query(keyword, page);
        let fetched = timeout_at(deadline, async {
            if page > 1 {
                delay.wait().await;
            }
            fetcher.fetch(extractor.endpoint(), &query).await
        })
        .await
        .unwrap_or(Err(TransportError::Timeout));

        let body = match fetched {
            Ok(body) => body,
            Err(error) => {
                log::error!("{} error on page {}: {}", source, page, error);
                pages.halted = Some(PageFailure { page, error });
                break;
            }
        };

        let outcomes = extractor
            .extract(&body)
            .map_err(|error| ScrapeError::MalformedBody { page, error })?;
        pages.pages_fetched += 1;

        let mut extracted = 0;
        for outcome in outcomes {
            match outcome {
                CandidateOutcome::Extracted(listing) => {
                    extracted += 1;
                    pages.listings.push(listing);
                }
                CandidateOutcome::Omitted(reason) => {
                    log::debug!("{} page {}: skipped candidate, {}", source, page, reason);
                    pages.omitted += 1;
                }
            }
        }

        log::info!(
            "{} page {} for {:?}: {} listings",
            source,
            page,
            keyword,
            extracted
        );
    }

    Ok(pages)
}
