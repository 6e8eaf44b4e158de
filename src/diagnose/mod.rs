// src/diagnose/mod.rs
//! Read-only troubleshooting before a migration
//!
//! Nothing in this module writes to the database.
mod sample;
mod variants;

pub use sample::{
    describe_keys, report_sample, report_samples, sample_row, KeyDescription, SampleRow,
    SampleState, TableSample,
};
pub use variants::{
    brute_force_variants, probe_variants, KeyVariant, VariantMatch, VariantOutcome, VariantProbe,
};
