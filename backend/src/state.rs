use std::sync::Arc;

use buffer::TelemetryBuffer;

use crate::config::AppConfig;

/// Shared handler state. Cloned per request; the buffer itself is shared.
#[derive(Clone)]
pub struct AppState {
    pub buffer: Arc<TelemetryBuffer>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Creates the process-wide, initially empty buffer sized from config.
    pub fn new(config: AppConfig) -> Self {
        Self {
            buffer: Arc::new(TelemetryBuffer::with_capacity(config.buffer_capacity)),
            config: Arc::new(config),
        }
    }
}
