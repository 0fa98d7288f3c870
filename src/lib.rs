// 三层架构模块
pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

// 重新导出主要类型
pub use domain::{is_match, search, AccessError, FindError, MatchKind, SearchOutcome, SearchRequest, VisitOutcome};
pub use application::{Args, Config};
pub use infrastructure::{ErrorLogger, Logger, LoggerTrait};
pub use presentation::{write_results, SearchSummary};
