// Query analysis: role/skill pattern matching, stop-word fallback, optional enhancement hook.
// Pure computation over swappable registries; no I/O happens here.

pub mod analyzer;
pub mod classifier;
pub mod rules;
pub mod text;
