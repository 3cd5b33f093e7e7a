use tokio::time::Instant;
use tracing::{Span, info, info_span};

/// Span and clock for one service operation, closed by the service's
/// `complete_tracing_*` helpers.
#[derive(Debug)]
pub struct TracingContext {
    pub span: Span,
    pub start_time: Instant,
}

impl TracingContext {
    pub fn start(component: &'static str, operation_name: &str) -> Self {
        let span = info_span!("operation", component, operation = operation_name);
        span.in_scope(|| info!("Starting operation: {operation_name}"));

        Self {
            span,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}
