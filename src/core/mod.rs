//! Batch services: merging extracts, aligning accounts, and running whole analyses.

pub mod services;
