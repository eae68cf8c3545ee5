//! Enhanced classification — optional, trait-based upgrade over the pattern analyzer.
//!
//! `TextAnalyzer` consults an `EnhancedClassifier` only when pattern matching lands
//! below the confidence threshold. With none configured, the stop-word heuristic
//! fills in. Carried as `Option<Arc<dyn EnhancedClassifier>>`.

use async_trait::async_trait;

use crate::analysis::analyzer::AnalysisResult;
use crate::errors::AppError;

/// A smarter classifier that can replace the stop-word fallback.
/// Implement this to plug in a model-backed classifier without touching callers.
#[async_trait]
pub trait EnhancedClassifier: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &str;

    async fn classify(&self, text: &str) -> Result<AnalysisResult, AppError>;
}
