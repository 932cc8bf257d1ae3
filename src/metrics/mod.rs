//! Process-wide counters for the contacts server.
//!
//! One [`Metrics`] is built in `main` and handed to both the API client and
//! the contact manager, so a single [`MetricsSummary`] covers upstream traffic
//! and rejected input. The summary is logged when the server shuts down.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Counters {
    http_requests: AtomicU64,
    http_errors: AtomicU64,
    http_duration_ms: AtomicU64,
    contacts_fetched: AtomicU64,
    validation_failures: AtomicU64,
}

/// Shared handle to the counters. Clones observe the same values.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counters: Arc<Counters>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one upstream request and its wall time.
    pub fn record_http_request(&self, duration: Duration) {
        let c = &self.counters;
        c.http_requests.fetch_add(1, Ordering::Relaxed);
        c.http_duration_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_http_error(&self) {
        self.counters.http_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Count contacts returned by the remote API.
    pub fn record_contacts_fetched(&self, count: usize) {
        self.counters
            .contacts_fetched
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Count input the contact manager refused before reaching storage.
    pub fn record_validation_failure(&self) {
        self.counters
            .validation_failures
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn http_requests_total(&self) -> u64 {
        self.counters.http_requests.load(Ordering::Relaxed)
    }

    pub fn http_errors_total(&self) -> u64 {
        self.counters.http_errors.load(Ordering::Relaxed)
    }

    pub fn contacts_fetched_total(&self) -> u64 {
        self.counters.contacts_fetched.load(Ordering::Relaxed)
    }

    pub fn validation_failures_total(&self) -> u64 {
        self.counters.validation_failures.load(Ordering::Relaxed)
    }

    /// Point-in-time copy of every counter.
    pub fn summary(&self) -> MetricsSummary {
        let requests = self.http_requests_total();
        let duration_ms = self.counters.http_duration_ms.load(Ordering::Relaxed);

        MetricsSummary {
            http_requests_total: requests,
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: if requests == 0 {
                0.0
            } else {
                duration_ms as f64 / requests as f64
            },
            contacts_fetched_total: self.contacts_fetched_total(),
            validation_failures_total: self.validation_failures_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub contacts_fetched_total: u64,
    pub validation_failures_total: u64,
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "http_requests={} http_errors={} http_avg_ms={:.1} contacts_fetched={} validation_failures={}",
            self.http_requests_total,
            self.http_errors_total,
            self.http_duration_avg_ms,
            self.contacts_fetched_total,
            self.validation_failures_total
        )
    }
}

/// Times one upstream request; consumed when the request finishes.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    pub fn complete(self) {
        self.metrics.record_http_request(self.start.elapsed());
    }

    pub fn complete_with_error(self) {
        self.metrics.record_http_request(self.start.elapsed());
        self.metrics.record_http_error();
    }
}
