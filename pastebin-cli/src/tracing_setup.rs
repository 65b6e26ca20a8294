//! Log and trace output for the `pastebin` binary
//!
//! One subscriber: `RUST_LOG` filter (`info` by default, `debug` with
//! `--debug`), compact console output, and with the `telemetry` feature an
//! optional OTLP layer turned on by `--otel`. OTLP honours
//! `OTEL_EXPORTER_OTLP_ENDPOINT` and `OTEL_SERVICE_NAME`.

use anyhow::{anyhow, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Output switches taken from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    pub debug: bool,
    pub otel: bool,
}

impl LogOptions {
    fn default_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_level()))
    }
}

/// Flushes exported spans when dropped. Hold it for the life of `main`.
#[must_use]
pub struct LogGuard {
    #[cfg_attr(not(feature = "telemetry"), allow(dead_code))]
    exporting: bool,
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        #[cfg(feature = "telemetry")]
        if self.exporting {
            opentelemetry::global::shutdown_tracer_provider();
        }
    }
}

#[cfg(feature = "telemetry")]
mod otlp {
    use anyhow::{anyhow, Result};
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::{Tracer, TracerProvider};
    use tracing_opentelemetry::OpenTelemetryLayer;
    use tracing_subscriber::registry::LookupSpan;

    /// Batch-export spans to the OTLP collector.
    pub fn layer<S>() -> Result<OpenTelemetryLayer<S, Tracer>>
    where
        S: tracing::Subscriber + for<'span> LookupSpan<'span>,
    {
        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4317".to_string());
        let service = std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "pastebin".to_string());

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&endpoint)
            .build()
            .map_err(|e| anyhow!("OTLP exporter for {}: {}", endpoint, e))?;

        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
            .with_resource(opentelemetry_sdk::Resource::new(vec![KeyValue::new(
                "service.name",
                service,
            )]))
            .build();

        let tracer = provider.tracer("pastebin");
        let _ = opentelemetry::global::set_tracer_provider(provider);

        Ok(tracing_opentelemetry::layer().with_tracer(tracer))
    }
}

/// Install the global subscriber.
pub fn init(options: LogOptions) -> Result<LogGuard> {
    #[cfg(feature = "telemetry")]
    let export = if options.otel {
        Some(otlp::layer()?)
    } else {
        None
    };
    #[cfg(not(feature = "telemetry"))]
    let export: Option<tracing_subscriber::layer::Identity> = None;

    let exporting = export.is_some();

    tracing_subscriber::registry()
        .with(options.filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(options.debug)
                .compact(),
        )
        .with(export)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    if options.otel && !exporting {
        tracing::warn!("--otel ignored: built without the telemetry feature");
    }

    Ok(LogGuard { exporting })
}
