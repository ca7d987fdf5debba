pub mod telemetry;

pub use telemetry::{init_telemetry, otlp_endpoint_configured, TelemetryGuard};
