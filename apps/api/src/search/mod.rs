// HTTP surface over the analysis and job aggregation pipeline.
// Handlers validate input and delegate; no business logic lives here.

pub mod handlers;
pub mod resume;
