use opentelemetry::{global, trace::TracerProvider as _};
use opentelemetry_sdk::{
    propagation::TraceContextPropagator,
    trace::{Sampler, SdkTracerProvider},
    Resource,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the tracer provider alive; flushes pending spans on [`shutdown`](Self::shutdown).
pub struct TelemetryGuard {
    provider: SdkTracerProvider,
}

impl TelemetryGuard {
    pub fn shutdown(self) {
        if let Err(e) = self.provider.shutdown() {
            eprintln!("Failed to shut down tracer provider: {e}");
        }
    }
}

/// True when either of the standard OTLP endpoint variables is set and non-blank.
pub fn otlp_endpoint_configured() -> bool {
    ["OTEL_EXPORTER_OTLP_TRACES_ENDPOINT", "OTEL_EXPORTER_OTLP_ENDPOINT"]
        .iter()
        .any(|var| {
            std::env::var(var)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .is_some()
        })
}

/// Initialize tracing/logging and OpenTelemetry spans.
///
/// - Always emits structured JSON logs via `tracing_subscriber`.
/// - Bridges `log` records into `tracing`.
/// - Exports spans over OTLP when an OTLP endpoint is configured; otherwise a
///   local provider still generates trace/span IDs for log correlation.
pub fn init_telemetry(service_name: &str) -> Result<TelemetryGuard, Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // W3C trace-context (traceparent/tracestate).
    global::set_text_map_propagator(TraceContextPropagator::new());

    let resource = Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    let provider = if otlp_endpoint_configured() {
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .build()?;
        SdkTracerProvider::builder()
            .with_resource(resource)
            .with_batch_exporter(exporter)
            .build()
    } else {
        SdkTracerProvider::builder()
            .with_resource(resource)
            .with_sampler(Sampler::ParentBased(Box::new(Sampler::AlwaysOn)))
            .build()
    };

    let tracer = provider.tracer(service_name.to_string());
    global::set_tracer_provider(provider.clone());

    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    let formatting_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(otel_layer)
        .with(formatting_layer)
        .try_init()?;

    // Ignore errors if a logger was already set (e.g., tests).
    let _ = tracing_log::LogTracer::init();

    Ok(TelemetryGuard { provider })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_provider_installs_once_without_runtime() {
        std::env::remove_var("OTEL_EXPORTER_OTLP_TRACES_ENDPOINT");
        std::env::remove_var("OTEL_EXPORTER_OTLP_ENDPOINT");
        assert!(!otlp_endpoint_configured());

        let guard = init_telemetry("product-service-test").expect("first init");
        tracing::info!("telemetry initialized");

        assert!(init_telemetry("product-service-test").is_err());
        guard.shutdown();
    }
}
