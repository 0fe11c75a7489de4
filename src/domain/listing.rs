use std::fmt;

use serde::Serialize;

/// The catalogs a query fans out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Source {
    Feebee,
    Pchome,
    Amazon,
    #[serde(rename = "E-bay")]
    Ebay,
}

impl Source {
    pub const ALL: [Source; 4] = [Source::Feebee, Source::Pchome, Source::Amazon, Source::Ebay];

    pub fn name(&self) -> &'static str {
        match self {
            Source::Feebee => "Feebee",
            Source::Pchome => "Pchome",
            Source::Amazon => "Amazon",
            Source::Ebay => "E-bay",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One product entry, normalized across catalogs. `price` is kept exactly as the
/// catalog renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub title: String,
    pub price: String,
    pub link: String,
    pub source: Source,
    /// Merchant name, only reported by comparison catalogs.
    pub store: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub keyword: String,
    pub page_count: u32,
}

impl SearchRequest {
    /// Returns `None` for a blank keyword; such a query is never dispatched.
    pub fn new(keyword: &str, page_count: u32) -> Option<Self> {
        let keyword = keyword.trim();
        match keyword.is_empty() {
            true => None,
            false => Some(SearchRequest {
                keyword: keyword.to_string(),
                page_count,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keyword_builds_no_request() {
        assert_eq!(SearchRequest::new("", 2), None);
        assert_eq!(SearchRequest::new("   \t", 2), None);
    }

    #[test]
    fn keyword_is_trimmed() {
        let request = SearchRequest::new("  USB-C cable ", 1).unwrap();

        assert_eq!(request.keyword, "USB-C cable");
        assert_eq!(request.page_count, 1);
    }

    #[test]
    fn source_serializes_with_display_name() {
        let json = serde_json::to_string(&Source::ALL).unwrap();

        assert_eq!(json, r#"["Feebee","Pchome","Amazon","E-bay"]"#);
        assert_eq!(Source::Ebay.to_string(), "E-bay");
    }
}
