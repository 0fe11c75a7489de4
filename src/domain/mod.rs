pub mod candidate;
pub mod listing;

pub use candidate::*;
pub use listing::*;
