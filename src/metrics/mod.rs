//! Request counters for the portal client.
//!
//! Tracks HTTP volume, failures and latency, plus how many records of each
//! kind the backend has returned.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared atomic counters. Cloning yields a handle to the same counters.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    http_requests_total: Arc<AtomicU64>,
    http_errors_total: Arc<AtomicU64>,
    http_duration_total_ms: Arc<AtomicU64>,
    applications_fetched_total: Arc<AtomicU64>,
    notes_fetched_total: Arc<AtomicU64>,
    users_fetched_total: Arc<AtomicU64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_applications_fetched(&self, count: usize) {
        self.applications_fetched_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_notes_fetched(&self, count: usize) {
        self.notes_fetched_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_users_fetched(&self, count: usize) {
        self.users_fetched_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Mean request latency; zero before the first request.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let count = self.http_requests_total();
        if count == 0 {
            0.0
        } else {
            self.http_duration_total_ms() as f64 / count as f64
        }
    }

    pub fn applications_fetched_total(&self) -> u64 {
        self.applications_fetched_total.load(Ordering::Relaxed)
    }

    pub fn notes_fetched_total(&self) -> u64 {
        self.notes_fetched_total.load(Ordering::Relaxed)
    }

    pub fn users_fetched_total(&self) -> u64 {
        self.users_fetched_total.load(Ordering::Relaxed)
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            applications_fetched_total: self.applications_fetched_total(),
            notes_fetched_total: self.notes_fetched_total(),
            users_fetched_total: self.users_fetched_total(),
        }
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub applications_fetched_total: u64,
    pub notes_fetched_total: u64,
    pub users_fetched_total: u64,
}

/// Times one HTTP exchange and records it on completion.
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
