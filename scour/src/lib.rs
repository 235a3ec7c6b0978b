pub mod config;
pub mod errors;
pub mod filters;
pub mod hybrid;
pub mod index;
pub mod results;
pub mod scan;
pub mod walker;

pub use config::ScanConfig;
pub use errors::{ScanError, ScanResult};
pub use hybrid::{HybridController, SearchOutcome};
pub use index::InvertedIndex;
pub use results::{FileMatches, MatchRecord, ScanSummary};
pub use scan::scan;
