//! Notification sink for terminal save-workflow outcomes.
//!
//! The UI equivalent is a toast/alert surface. Calls are fire-and-forget;
//! the workflow never consults a return value.

/// Surfaces success/failure to the operator.
pub trait NotificationSink {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Sink that emits structured log events.
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn success(&self, message: &str) {
        tracing::info!(target: "loomwear::notify", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "loomwear::notify", "{message}");
    }
}
