//! Backend reachability checks
//!
//! Runs the health check and the core routes side by side and reports each
//! outcome separately. A failing route never aborts the probe.

use futures::future::{join_all, BoxFuture};
use futures::{FutureExt, TryFutureExt};
use std::fmt;
use std::future::Future;
use tracing::{info, warn};

use crate::data::CountryEndpoints;
use crate::error::Result;

/// Outcome of probing one route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// Display name of the route
    pub name: &'static str,
    /// Endpoint path that was requested
    pub endpoint: String,
    /// `Err` holds the error message
    pub outcome: std::result::Result<(), String>,
}

impl ProbeResult {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(()) => write!(f, "ok    {:<16} {}", self.name, self.endpoint),
            Err(e) => write!(f, "FAIL  {:<16} {}: {}", self.name, self.endpoint, e),
        }
    }
}

fn discard<'a, T>(
    fut: impl Future<Output = Result<T>> + Send + 'a,
) -> BoxFuture<'a, Result<()>> {
    fut.map_ok(|_| ()).boxed()
}

/// Probes the health route and the core data routes concurrently
///
/// Results come back in a fixed order: health check, summary, health data,
/// education, demographics, economy, country profile.
pub async fn probe_endpoints(endpoints: &CountryEndpoints) -> Vec<ProbeResult> {
    let client = endpoints.client();
    let checks: Vec<(&'static str, String, BoxFuture<'_, Result<()>>)> = vec![
        ("Health Check", "/health".to_string(), discard(client.health_check())),
        ("Summary", endpoints.path("summary"), discard(endpoints.summary())),
        ("Health Data", endpoints.path("health"), discard(endpoints.health())),
        ("Education Data", endpoints.path("education"), discard(endpoints.education())),
        ("Demographics", endpoints.path("demographics"), discard(endpoints.demographics())),
        ("Economic Data", endpoints.path("economy"), discard(endpoints.economy())),
        ("Country Profile", endpoints.path("profile"), discard(endpoints.profile())),
    ];

    let (labels, futures): (Vec<_>, Vec<_>) = checks
        .into_iter()
        .map(|(name, endpoint, fut)| ((name, endpoint), fut))
        .unzip();
    let outcomes = join_all(futures).await;

    labels
        .into_iter()
        .zip(outcomes)
        .map(|((name, endpoint), outcome)| {
            match &outcome {
                Ok(()) => info!(route = name, "Probe succeeded"),
                Err(e) => warn!(route = name, error = %e, "Probe failed"),
            }
            ProbeResult {
                name,
                endpoint,
                outcome: outcome.map_err(|e| e.to_string()),
            }
        })
        .collect()
}

/// Summary of a connection test
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionReport {
    /// Health route answered
    pub backend: bool,
    /// Summary route answered
    pub summary_api: bool,
    /// Health data route answered (only tried when summary fails)
    pub health_api: bool,
    /// Last error seen
    pub error: Option<String>,
}

/// Checks the backend, then the summary route, then the health data route
///
/// Stops at the first route that answers.
pub async fn check_connection(endpoints: &CountryEndpoints) -> ConnectionReport {
    if let Err(e) = endpoints.client().health_check().await {
        warn!(error = %e, "Connection test failed");
        return ConnectionReport {
            error: Some(e.to_string()),
            ..Default::default()
        };
    }

    let mut report = ConnectionReport {
        backend: true,
        ..Default::default()
    };

    match endpoints.summary().await {
        Ok(_) => report.summary_api = true,
        Err(summary_err) => {
            warn!(error = %summary_err, "Summary API not ready, trying health data");
            match endpoints.health().await {
                Ok(_) => report.health_api = true,
                Err(e) => report.error = Some(e.to_string()),
            }
        }
    }

    report
}
