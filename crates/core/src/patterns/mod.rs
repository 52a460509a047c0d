//! Pattern labeling over principal variations

mod detector;
mod scan;
mod types;

pub use detector::PatternDetector;
pub use scan::{scan_pv, Motif};
pub use types::*;
