use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing::Subscriber;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
};

use crate::cache::{
    METRIC_CATEGORIES_HIT, METRIC_CATEGORIES_MISS, METRIC_INVALIDATION, METRIC_LISTING_HIT,
    METRIC_LISTING_MISS, METRIC_READ_RETRY,
};
use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

const COUNTERS: &[(&str, &str)] = &[
    (METRIC_LISTING_HIT, "Listing reads served from the query cache."),
    (METRIC_LISTING_MISS, "Listing reads that went to the catalog."),
    (METRIC_CATEGORIES_HIT, "Category reads served from the query cache."),
    (METRIC_CATEGORIES_MISS, "Category reads that went to the catalog."),
    (METRIC_INVALIDATION, "Listing invalidations after successful mutations."),
    (METRIC_READ_RETRY, "Catalog reads retried after a failure."),
];

/// Install the global tracing subscriber.
///
/// Logs go to stderr; stdout belongs to the dashboard frames and command output.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(stderr_layer(logging.format))
        .try_init()
        .map_err(|err| InfraError::Subscriber(err.to_string()))
}

fn stderr_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    }
}

pub fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        for &(name, description) in COUNTERS {
            describe_counter!(name, Unit::Count, description);
        }
    });
}
