use std::fmt;

use super::listing::{Listing, Source};

/// Why a candidate item on a result page did not become a listing.
#[derive(Debug, Clone, PartialEq)]
pub enum OmitReason {
    MissingField(&'static str),
    EmptyField(&'static str),
    InvalidLink(String),
}

impl fmt::Display for OmitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OmitReason::MissingField(field) => write!(f, "missing {}", field),
            OmitReason::EmptyField(field) => write!(f, "empty {}", field),
            OmitReason::InvalidLink(href) => write!(f, "invalid link {:?}", href),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutcome {
    Extracted(Listing),
    Omitted(OmitReason),
}

#[cfg(test)]
impl CandidateOutcome {
    pub fn listing(self) -> Option<Listing> {
        match self {
            CandidateOutcome::Extracted(listing) => Some(listing),
            CandidateOutcome::Omitted(_) => None,
        }
    }
}

/// Collects the raw field values of one candidate and enforces that title, price
/// and link are all present and non-blank.
pub struct CandidateFields {
    pub title: Option<String>,
    pub price: Option<String>,
    pub link: Option<String>,
    pub store: Option<String>,
}

impl CandidateFields {
    pub fn into_outcome(self, source: Source) -> CandidateOutcome {
        let title = match required("title", self.title) {
            Ok(v) => v,
            Err(reason) => return CandidateOutcome::Omitted(reason),
        };
        let price = match required("price", self.price) {
            Ok(v) => v,
            Err(reason) => return CandidateOutcome::Omitted(reason),
        };
        let link = match required("link", self.link) {
            Ok(v) => v,
            Err(reason) => return CandidateOutcome::Omitted(reason),
        };
        let store = self
            .store
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        CandidateOutcome::Extracted(Listing {
            title,
            price,
            link,
            source,
            store,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, OmitReason> {
    match value {
        None => Err(OmitReason::MissingField(field)),
        Some(v) => match v.trim() {
            "" => Err(OmitReason::EmptyField(field)),
            trimmed => Ok(trimmed.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: Option<&str>, price: Option<&str>, link: Option<&str>) -> CandidateFields {
        CandidateFields {
            title: title.map(String::from),
            price: price.map(String::from),
            link: link.map(String::from),
            store: None,
        }
    }

    #[test]
    fn complete_fields_are_trimmed_into_a_listing() {
        let outcome = fields(Some("  Cable "), Some(" 590 "), Some("https://a.b/c"))
            .into_outcome(Source::Amazon);

        assert_eq!(
            outcome,
            CandidateOutcome::Extracted(Listing {
                title: "Cable".to_string(),
                price: "590".to_string(),
                link: "https://a.b/c".to_string(),
                source: Source::Amazon,
                store: None,
            })
        );
    }

    #[test]
    fn first_missing_field_is_reported() {
        let outcome = fields(Some("Cable"), None, None).into_outcome(Source::Ebay);

        assert_eq!(
            outcome,
            CandidateOutcome::Omitted(OmitReason::MissingField("price"))
        );
    }

    #[test]
    fn blank_field_is_reported_as_empty() {
        let outcome = fields(Some("   "), Some("1"), Some("x")).into_outcome(Source::Ebay);

        assert_eq!(
            outcome,
            CandidateOutcome::Omitted(OmitReason::EmptyField("title"))
        );
    }

    #[test]
    fn blank_store_becomes_none() {
        let mut f = fields(Some("a"), Some("1"), Some("x"));
        f.store = Some(" ".to_string());

        let listing = f.into_outcome(Source::Feebee).listing().unwrap();
        assert_eq!(listing.store, None);
    }
}
