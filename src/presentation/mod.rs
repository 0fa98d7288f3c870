pub mod display;
pub mod output;

pub use display::{format_duration, new_progress, report_access_error, SearchSummary};
pub use output::write_results;
