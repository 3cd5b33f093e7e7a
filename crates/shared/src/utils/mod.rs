mod logs;
mod metrics;
mod trace;

pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, Status};
pub use self::trace::TracingContext;
