pub mod aggregator;
pub mod amazon_scraper;
pub mod courtesy_delay;
pub mod ebay_scraper;
pub mod error;
pub mod extractor;
pub mod feebee_scraper;
pub mod fetcher;
pub mod pagination;
pub mod pchome_scraper;
#[cfg(test)]
pub mod testing;

pub use aggregator::*;
pub use amazon_scraper::*;
pub use courtesy_delay::*;
pub use ebay_scraper::*;
pub use error::*;
pub use extractor::{extractor_for, Extractor};
pub use feebee_scraper::*;
pub use fetcher::*;
pub use pagination::*;
pub use pchome_scraper::*;
