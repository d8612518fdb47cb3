use std::sync::Arc;

/// Keeps the non-blocking writers' worker guards alive so buffered lines are flushed.
#[derive(Clone, Default)]
pub(crate) struct LoggerGuard {
    guards: Vec<Arc<dyn Send + Sync>>,
}

impl LoggerGuard {
    pub(crate) fn add_guard(&mut self, guard: impl Send + Sync + 'static) {
        self.guards.push(Arc::new(guard));
    }
}
