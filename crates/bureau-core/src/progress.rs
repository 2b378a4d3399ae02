use serde::{Deserialize, Serialize};

use crate::document::ExtractionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total as f64
    }
}

/// Receives batch events as they happen. Called from the orchestrator's task only.
pub trait BatchObserver: Send + Sync {
    fn on_progress(&self, progress: Progress);
    fn on_error(&self, error: &ExtractionError);
}

pub struct NoopObserver;

impl BatchObserver for NoopObserver {
    fn on_progress(&self, _progress: Progress) {}
    fn on_error(&self, _error: &ExtractionError) {}
}

/// Reports batch events through `tracing`.
pub struct TracingObserver;

impl BatchObserver for TracingObserver {
    fn on_progress(&self, progress: Progress) {
        tracing::info!(
            completed = progress.completed,
            total = progress.total,
            fraction = progress.fraction(),
            "Batch progress"
        );
    }

    fn on_error(&self, error: &ExtractionError) {
        tracing::error!(
            file_name = %error.file_name,
            cause = %error.cause,
            "Document extraction failed"
        );
    }
}
