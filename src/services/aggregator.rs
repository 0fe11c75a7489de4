use std::{sync::Arc, time::Duration};

use serde::Serialize;
use tokio::{
    sync::mpsc::{self, UnboundedSender},
    time::{timeout_at, Instant},
};

use crate::{
    configuration::{ScraperSettings, SourceSettings},
    domain::{Listing, SearchRequest, Source},
};

use super::{
    extractor_for, scrape_source, CourtesyDelay, Extractor, Fetch, ScrapeError, SourcePages,
};

/// Extra time a worker gets past its deadline before it is aborted.
const ABORT_GRACE: Duration = Duration::from_secs(5);

/// What one source's worker sent back to the collector.
#[derive(Debug)]
pub struct SourceReport {
    pub source: Source,
    pub outcome: Result<SourcePages, ScrapeError>,
}

impl SourceReport {
    /// Reason this source's results are incomplete, if they are.
    pub fn failure(&self) -> Option<String> {
        match &self.outcome {
            Ok(pages) => pages
                .halted
                .as_ref()
                .map(|halted| format!("stopped at page {}: {}", halted.page, halted.error)),
            Err(e) => Some(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceFailure {
    pub source: Source,
    pub reason: String,
}

/// Listings of every source in the order the sources finished, plus one report
/// per source.
#[derive(Debug, Default)]
pub struct AggregatedResult {
    pub listings: Vec<Listing>,
    pub reports: Vec<SourceReport>,
}

impl AggregatedResult {
    pub fn failures(&self) -> Vec<SourceFailure> {
        self.reports
            .iter()
            .filter_map(|report| {
                report.failure().map(|reason| SourceFailure {
                    source: report.source,
                    reason,
                })
            })
            .collect()
    }
}

/// Fans a keyword out to every registered catalog and merges what comes back.
pub struct Aggregator<F: Fetch> {
    fetcher: Arc<F>,
    extractors: Vec<Arc<dyn Extractor>>,
    delay: CourtesyDelay,
    deadline: Duration,
}

impl<F: Fetch> Aggregator<F> {
    pub fn new(fetcher: F, sources: &SourceSettings, scraper: &ScraperSettings) -> Self {
        let extractors = Source::ALL
            .into_iter()
            .map(|source| extractor_for(source, sources))
            .collect();

        Aggregator::with_extractors(
            fetcher,
            extractors,
            CourtesyDelay::from_settings(scraper),
            scraper.source_deadline(),
        )
    }

    pub fn with_extractors(
        fetcher: F,
        extractors: Vec<Arc<dyn Extractor>>,
        delay: CourtesyDelay,
        deadline: Duration,
    ) -> Self {
        Aggregator {
            fetcher: Arc::new(fetcher),
            extractors,
            delay,
            deadline,
        }
    }

    /// Runs a user query. A blank keyword is not dispatched and yields `None`.
    pub async fn search(
        &self,
        keyword: &str,
        page_count: u32,
    ) -> Option<(SearchRequest, AggregatedResult)> {
        let Some(request) = SearchRequest::new(keyword, page_count) else {
            log::debug!("Ignoring blank keyword");
            return None;
        };

        let result = self.scrape_all(&request.keyword, request.page_count).await;
        Some((request, result))
    }

    /// Scrapes every source concurrently and waits for all of them.
    pub async fn scrape_all(&self, keyword: &str, page_count: u32) -> AggregatedResult {
        log::info!(
            "Searching {} sources for {:?} ({} pages)",
            self.extractors.len(),
            keyword,
            page_count
        );

        let (report_sender, mut report_receiver) = mpsc::unbounded_channel::<SourceReport>();

        for extractor in self.extractors.iter() {
            tokio::spawn(scrape_worker(
                self.fetcher.clone(),
                extractor.clone(),
                keyword.to_string(),
                page_count,
                self.delay,
                self.deadline,
                report_sender.clone(),
            ));
        }
        drop(report_sender);

        let mut result = AggregatedResult::default();

        while let Some(mut report) = report_receiver.recv().await {
            match &mut report.outcome {
                Ok(pages) => {
                    log::info!(
                        "{} finished: {} listings from {} pages",
                        report.source,
                        pages.listings.len(),
                        pages.pages_fetched
                    );
                    result.listings.append(&mut pages.listings);
                }
                Err(e) => {
                    log::error!("{} failed: {}", report.source, e);
                }
            }
            result.reports.push(report);
        }

        log::info!(
            "Search for {:?} done: {} listings, {} of {} sources degraded",
            keyword,
            result.listings.len(),
            result.failures().len(),
            result.reports.len()
        );

        result
    }
}

async fn scrape_worker<F: Fetch>(
    fetcher: Arc<F>,
    extractor: Arc<dyn Extractor>,
    keyword: String,
    page_count: u32,
    delay: CourtesyDelay,
    deadline: Duration,
    report_sender: UnboundedSender<SourceReport>,
) {
    let source = extractor.source();
    let stop_at = Instant::now() + deadline;

    // Run the scrape as its own task so a panic inside it is reported instead
    // of silently dropping this source's sender.
    let handle = tokio::spawn(async move {
        scrape_source(
            fetcher.as_ref(),
            extractor.as_ref(),
            &keyword,
            page_count,
            &delay,
            stop_at,
        )
        .await
    });
    let abort_handle = handle.abort_handle();

    // The scrape stops itself at `stop_at`; this only catches a worker stuck
    // outside of a page request.
    let outcome = match timeout_at(stop_at + ABORT_GRACE, handle).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(join_error)) => Err(ScrapeError::TaskFailed(join_error.to_string())),
        Err(_) => {
            abort_handle.abort();
            Err(ScrapeError::DeadlineExceeded(deadline))
        }
    };

    if let Err(e) = report_sender.send(SourceReport { source, outcome }) {
        log::error!("Collector gone before {} reported: {:?}", source, e.0.source);
    }
}
