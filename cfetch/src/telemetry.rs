//! Tracing subscriber and OpenTelemetry setup.
use std::io;

use miette::{IntoDiagnostic, WrapErr};
use opentelemetry::InstrumentationScope;
use opentelemetry::trace::TracerProvider;
use opentelemetry_resource_detectors::{
    HostResourceDetector, K8sResourceDetector, OsResourceDetector,
};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::resource::{EnvResourceDetector, ResourceDetector};
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, TracingConfig};

/// The filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "cfetch=info,cf_statement=info";

/// Returns a list of resource detectors to use to enrich OTel attributes.
fn otel_resource_detectors() -> Vec<Box<dyn ResourceDetector>> {
    vec![
        Box::new(EnvResourceDetector::default()),
        Box::new(OsResourceDetector),
        Box::new(HostResourceDetector::default()),
        Box::new(K8sResourceDetector),
    ]
}

/// Builds a tracer provider that exports spans over OTLP/HTTP.
fn otlp_tracer_provider() -> miette::Result<SdkTracerProvider> {
    let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .build()
        .into_diagnostic()
        .wrap_err("building otlp http exporter failed")?;
    let res_detectors = otel_resource_detectors();

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(otlp_exporter)
        .with_resource(
            Resource::builder_empty()
                .with_service_name(env!("CARGO_PKG_NAME"))
                .with_detectors(&res_detectors)
                .build(),
        )
        .build())
}

/// Installs the global tracing subscriber.
///
/// Log lines go to stderr so that stdout only carries the extracted problems. When OTLP export is
/// enabled, the returned provider must be shut down before exiting to flush pending spans.
///
/// # Errors
///
/// Returns an error if the exporter cannot be built or a global subscriber is already set.
pub fn try_init(tracing: &TracingConfig) -> miette::Result<Option<SdkTracerProvider>> {
    let provider = if tracing.enabled {
        Some(otlp_tracer_provider()?)
    } else {
        None
    };

    let telemetry_layer = provider.as_ref().map(|provider| {
        let scope = InstrumentationScope::builder(env!("CARGO_PKG_NAME"))
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_schema_url("https://opentelemetry.io/schema/1.0.0")
            .build();

        tracing_opentelemetry::layer().with_tracer(provider.tracer_with_scope(scope))
    });

    let (json_layer, text_layer) = match tracing.format {
        LogFormat::Json => (
            Some(tracing_subscriber::fmt::layer().json().with_writer(io::stderr)),
            None,
        ),
        LogFormat::Text => (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(telemetry_layer)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("could not init registry")?;

    debug!(otlp = tracing.enabled, format = ?tracing.format, "tracing initialized");

    Ok(provider)
}
