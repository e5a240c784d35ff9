mod logs;
mod metrics;
mod otel;
mod random_string;
mod shutdown;

pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, Status};
pub use self::otel::{ServiceTracer, Telemetry, TracingContext};
pub use self::random_string::{generate_random_string, generate_ticket_code};
pub use self::shutdown::shutdown_signal;
