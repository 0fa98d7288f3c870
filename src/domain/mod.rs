pub mod error;
pub mod matcher;
pub mod traverser;

pub use error::{AccessError, ErrorType, FindError};
pub use matcher::{is_match, mask_to_regex, MatchKind, NamePattern};
pub use traverser::{search, SearchOutcome, SearchRequest, Traverser, VisitOutcome, Visits, WalkOptions};
