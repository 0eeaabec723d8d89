#![doc(test(attr(deny(warnings))))]

//! Bank Analyzer rebuilds daily balance histories from sparse account extracts,
//! merges partial extracts of the same account, and aligns several accounts on
//! one timeline with a summed line and a trailing trend.

pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::services::{
    AnalysisReport, AnalysisService, CompositeSeries, CompositeService, MergeOutcome,
    MergeService, OverlapPolicy,
};
pub use errors::{AnalyzerError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Bank Analyzer tracing initialized.");
    });
}
