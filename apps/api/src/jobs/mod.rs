// Job aggregation: source plumbing, normalization, merge and dedup.
// Sources are failure-isolated; the synthetic source guarantees non-empty results.

pub mod aggregator;
pub mod formatting;
pub mod models;
pub mod sources;
