use serde::Deserialize;
use serde_json::Value;

use crate::domain::{CandidateFields, CandidateOutcome, Source};

use super::{ExtractError, Extractor, QueryParams};

const PRODUCT_URL: &str = "https://24h.pchome.com.tw/prod/";

/// PChome 24h exposes a JSON search API; products are linked by their `Id`.
pub struct PchomeScraper {
    url: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    prods: Option<Vec<Value>>,
}

impl PchomeScraper {
    pub fn new(url: String) -> Self {
        PchomeScraper { url }
    }
}

impl Extractor for PchomeScraper {
    fn source(&self) -> Source {
        Source::Pchome
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    fn query(&self, keyword: &str, page: u32) -> QueryParams {
        vec![
            ("q", keyword.to_string()),
            ("page", page.to_string()),
            ("sort", "sale/dc".to_string()),
        ]
    }

    fn extract(&self, body: &str) -> Result<Vec<CandidateOutcome>, ExtractError> {
        let response: SearchResponse = serde_json::from_str(body)?;

        let outcomes = response
            .prods
            .unwrap_or_default()
            .iter()
            .map(|product| {
                let fields = CandidateFields {
                    title: text_field(product, "name"),
                    price: text_field(product, "price"),
                    link: text_field(product, "Id")
                        .filter(|id| !id.trim().is_empty())
                        .map(|id| format!("{}{}", PRODUCT_URL, id.trim())),
                    store: None,
                };
                fields.into_outcome(Source::Pchome)
            })
            .collect();

        Ok(outcomes)
    }
}

/// Reads a string or numeric field as text; anything else counts as missing.
fn text_field(product: &Value, name: &str) -> Option<String> {
    match product.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
