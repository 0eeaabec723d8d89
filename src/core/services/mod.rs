pub mod analysis_service;
pub mod composite_service;
pub mod merge_service;

pub use analysis_service::{AccountReport, AnalysisReport, AnalysisService};
pub use composite_service::{
    trailing_average, AccountSeries, CompositeSeries, CompositeService, DEFAULT_TREND_WINDOW_DAYS,
};
pub use merge_service::{MergeOutcome, MergeService, OverlapPolicy};
