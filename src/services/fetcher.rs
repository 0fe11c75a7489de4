use std::future::Future;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE},
    Client,
};

use crate::configuration::ScraperSettings;

use super::TransportError;

pub type QueryParams = Vec<(&'static str, String)>;

/// GET capability the scrapers are written against.
pub trait Fetch: Send + Sync + 'static {
    fn fetch(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// Shared reqwest client carrying the fixed browser identity headers.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &ScraperSettings) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&settings.accept_language)?,
        );

        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .timeout(settings.request_timeout())
            .build()?;

        Ok(HttpFetcher { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<String, TransportError> {
        let res = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(res.text().await?)
    }
}
