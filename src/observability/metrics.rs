//! Prometheus metrics for the pantheon API
//!
//! Recording is always safe: without an installed exporter the `metrics`
//! macros are no-ops.

use std::fmt;
use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;

use crate::error::{ApiError, Result};

/// Enum representing all metric names used in the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // HTTP
    GraphqlRequests,
    GraphqlErrors,
    GraphqlRequestDuration,

    // Mutations
    GodsCreated,
    PantheonsCreated,

    // Collection sizes
    GodsStored,
    PantheonsStored,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::GraphqlRequests => "pantheon_graphql_requests_total",
            MetricName::GraphqlErrors => "pantheon_graphql_errors_total",
            MetricName::GraphqlRequestDuration => "pantheon_graphql_request_duration_seconds",
            MetricName::GodsCreated => "pantheon_gods_created_total",
            MetricName::PantheonsCreated => "pantheon_pantheons_created_total",
            MetricName::GodsStored => "pantheon_gods_stored",
            MetricName::PantheonsStored => "pantheon_pantheons_stored",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Install the Prometheus recorder and serve `/metrics` on `addr`.
///
/// Must be called from within a tokio runtime.
pub fn init(addr: &str) -> Result<()> {
    let socket: SocketAddr = addr.parse()?;
    PrometheusBuilder::new()
        .with_http_listener(socket)
        .install()
        .map_err(|e| ApiError::Config(format!("Failed to install Prometheus recorder: {}", e)))?;

    info!("Metrics exporter listening on http://{}/metrics", socket);
    Ok(())
}

pub mod graphql {
    use super::MetricName;

    /// Record one executed GraphQL operation
    pub fn request(operation: &'static str, secs: f64, had_errors: bool) {
        ::metrics::counter!(MetricName::GraphqlRequests.as_str(), "operation" => operation)
            .increment(1);
        ::metrics::histogram!(MetricName::GraphqlRequestDuration.as_str()).record(secs);
        if had_errors {
            ::metrics::counter!(MetricName::GraphqlErrors.as_str()).increment(1);
        }
    }
}

pub mod store {
    use super::MetricName;

    /// Report current collection sizes, e.g. the seeded data at startup
    pub fn collection_sizes(gods: usize, pantheons: usize) {
        ::metrics::gauge!(MetricName::GodsStored.as_str()).set(gods as f64);
        ::metrics::gauge!(MetricName::PantheonsStored.as_str()).set(pantheons as f64);
    }

    pub fn god_created(total: usize) {
        ::metrics::counter!(MetricName::GodsCreated.as_str()).increment(1);
        ::metrics::gauge!(MetricName::GodsStored.as_str()).set(total as f64);
    }

    pub fn pantheon_created(total: usize) {
        ::metrics::counter!(MetricName::PantheonsCreated.as_str()).increment(1);
        ::metrics::gauge!(MetricName::PantheonsStored.as_str()).set(total as f64);
    }
}
