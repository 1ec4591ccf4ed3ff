//! Process metrics, rendered in the Prometheus text exposition format.
//!
//! A single [`Metrics`] value is built at startup and shared through the API
//! state; the arbitrator records into it directly.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

const REQUEST_BUCKETS: &[f64] = &[
    0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0, 25.0, 50.0, 75.0,
];

const BOOKING_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0,
];

const BOOKING_KINDS: [&str; 3] = ["individual", "group", "unknown"];

const BOOKING_OUTCOMES: [&str; 7] = [
    "success",
    "validation_error",
    "entity_not_found",
    "slot_not_found",
    "slot_unavailable",
    "not_found",
    "database_error",
];

/// Cumulative histogram with fixed upper bounds; `+Inf` is implied by `count`.
#[derive(Debug)]
pub struct Histogram {
    bounds: &'static [f64],
    buckets: Vec<AtomicU64>,
    sum_micros: AtomicU64,
    count: AtomicU64,
}

impl Histogram {
    pub fn new(bounds: &'static [f64]) -> Self {
        Self {
            bounds,
            buckets: bounds.iter().map(|_| AtomicU64::new(0)).collect(),
            sum_micros: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Fields are updated independently, so a concurrent scrape may count an
    /// observation in `+Inf` before it reaches the finite buckets. `count` is
    /// bumped before the buckets (released) and read after them (acquired),
    /// so a rendered `+Inf` never trails a finite bucket.
    pub fn observe(&self, elapsed: Duration) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum_micros
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
        let seconds = elapsed.as_secs_f64();
        for (bound, bucket) in self.bounds.iter().zip(&self.buckets) {
            if seconds <= *bound {
                bucket.fetch_add(1, Ordering::Release);
            }
        }
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    fn render(&self, out: &mut String, name: &str, labels: &str) {
        let separator = if labels.is_empty() { "" } else { "," };
        for (bound, bucket) in self.bounds.iter().zip(&self.buckets) {
            let _ = writeln!(
                out,
                "{name}_bucket{{{labels}{separator}le=\"{bound}\"}} {}",
                bucket.load(Ordering::Acquire)
            );
        }
        let count = self.count();
        let _ = writeln!(out, "{name}_bucket{{{labels}{separator}le=\"+Inf\"}} {count}");
        let sum = self.sum_micros.load(Ordering::Relaxed) as f64 / 1_000_000.0;
        let _ = writeln!(out, "{name}_sum{{{labels}}} {sum}");
        let _ = writeln!(out, "{name}_count{{{labels}}} {count}");
    }
}

/// Per-attempt booking outcome counters and latency.
#[derive(Debug)]
pub struct BookingMetrics {
    attempts: [[AtomicU64; BOOKING_OUTCOMES.len()]; BOOKING_KINDS.len()],
    latency: Histogram,
}

impl Default for BookingMetrics {
    fn default() -> Self {
        Self {
            attempts: std::array::from_fn(|_| std::array::from_fn(|_| AtomicU64::new(0))),
            latency: Histogram::new(BOOKING_BUCKETS),
        }
    }
}

impl BookingMetrics {
    /// Records one attempt. Unknown labels are folded into `unknown` /
    /// `database_error` rather than dropped.
    pub fn record(&self, kind: &str, outcome: &str, elapsed: Duration) {
        let kind_index = BOOKING_KINDS
            .iter()
            .position(|k| *k == kind)
            .unwrap_or(BOOKING_KINDS.len() - 1);
        let outcome_index = BOOKING_OUTCOMES
            .iter()
            .position(|o| *o == outcome)
            .unwrap_or(BOOKING_OUTCOMES.len() - 1);

        self.attempts[kind_index][outcome_index].fetch_add(1, Ordering::Relaxed);
        self.latency.observe(elapsed);
    }

    pub fn attempts(&self, kind: &str, outcome: &str) -> u64 {
        let Some(k) = BOOKING_KINDS.iter().position(|x| *x == kind) else {
            return 0;
        };
        let Some(o) = BOOKING_OUTCOMES.iter().position(|x| *x == outcome) else {
            return 0;
        };
        self.attempts[k][o].load(Ordering::Relaxed)
    }

    pub fn total_attempts(&self) -> u64 {
        self.latency.count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct RequestKey {
    method: String,
    endpoint: String,
    status: u16,
}

/// HTTP request counters keyed by method, route template and status.
#[derive(Debug, Default)]
pub struct HttpMetrics {
    requests: Mutex<BTreeMap<RequestKey, u64>>,
    latency: Mutex<BTreeMap<(String, String), Histogram>>,
}

impl HttpMetrics {
    pub fn track(&self, method: &str, endpoint: &str, status: u16, elapsed: Duration) {
        let key = RequestKey {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            status,
        };
        *self
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(0) += 1;

        self.latency
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry((method.to_string(), endpoint.to_string()))
            .or_insert_with(|| Histogram::new(REQUEST_BUCKETS))
            .observe(elapsed);
    }

    pub fn requests(&self, method: &str, endpoint: &str, status: u16) -> u64 {
        let key = RequestKey {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            status,
        };
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .copied()
            .unwrap_or(0)
    }
}

/// Observability context shared by every component of one service.
#[derive(Debug)]
pub struct Metrics {
    service: String,
    pub bookings: BookingMetrics,
    pub http: HttpMetrics,
}

impl Metrics {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            bookings: BookingMetrics::default(),
            http: HttpMetrics::default(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn render_prometheus(&self) -> String {
        let service = &self.service;
        let mut out = String::new();

        out.push_str("# HELP booking_attempts_total Booking attempts by kind and outcome\n");
        out.push_str("# TYPE booking_attempts_total counter\n");
        for (k, kind) in BOOKING_KINDS.iter().enumerate() {
            for (o, outcome) in BOOKING_OUTCOMES.iter().enumerate() {
                let value = self.bookings.attempts[k][o].load(Ordering::Relaxed);
                let _ = writeln!(
                    out,
                    "booking_attempts_total{{kind=\"{kind}\",outcome=\"{outcome}\",service=\"{service}\"}} {value}"
                );
            }
        }

        out.push_str("# HELP booking_duration_seconds Booking arbitration latency\n");
        out.push_str("# TYPE booking_duration_seconds histogram\n");
        self.bookings.latency.render(
            &mut out,
            "booking_duration_seconds",
            &format!("service=\"{service}\""),
        );

        out.push_str("# HELP http_requests_total Total HTTP requests\n");
        out.push_str("# TYPE http_requests_total counter\n");
        for (key, value) in self
            .http
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            let _ = writeln!(
                out,
                "http_requests_total{{method=\"{}\",endpoint=\"{}\",status=\"{}\",service=\"{service}\"}} {value}",
                key.method, key.endpoint, key.status
            );
        }

        out.push_str("# HELP http_request_duration_seconds HTTP request latency\n");
        out.push_str("# TYPE http_request_duration_seconds histogram\n");
        for ((method, endpoint), histogram) in self
            .http
            .latency
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            histogram.render(
                &mut out,
                "http_request_duration_seconds",
                &format!("method=\"{method}\",endpoint=\"{endpoint}\",service=\"{service}\""),
            );
        }

        out
    }
}
