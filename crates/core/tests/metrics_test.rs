use std::time::Duration;

use pretty_assertions::assert_eq;
use yoga_core::metrics::{Histogram, Metrics};

#[test]
fn test_booking_attempts_are_counted_per_kind_and_outcome() {
    let metrics = Metrics::new("application-backend");

    metrics
        .bookings
        .record("individual", "success", Duration::from_millis(3));
    metrics
        .bookings
        .record("individual", "slot_unavailable", Duration::from_millis(1));
    metrics
        .bookings
        .record("group", "success", Duration::from_millis(2));

    assert_eq!(metrics.bookings.attempts("individual", "success"), 1);
    assert_eq!(metrics.bookings.attempts("individual", "slot_unavailable"), 1);
    assert_eq!(metrics.bookings.attempts("group", "success"), 1);
    assert_eq!(metrics.bookings.attempts("group", "slot_unavailable"), 0);
    assert_eq!(metrics.bookings.total_attempts(), 3);
}

#[test]
fn test_unknown_labels_are_folded() {
    let metrics = Metrics::new("svc");

    metrics
        .bookings
        .record("vip", "exploded", Duration::from_millis(1));

    assert_eq!(metrics.bookings.attempts("unknown", "database_error"), 1);
    assert_eq!(metrics.bookings.attempts("vip", "exploded"), 0);
}

#[test]
fn test_histogram_buckets_are_cumulative() {
    static BOUNDS: &[f64] = &[0.1, 1.0];
    let histogram = Histogram::new(BOUNDS);

    histogram.observe(Duration::from_millis(50));
    histogram.observe(Duration::from_millis(500));
    histogram.observe(Duration::from_secs(3));

    assert_eq!(histogram.count(), 3);
}

#[test]
fn test_prometheus_rendering() {
    let metrics = Metrics::new("application-backend");
    metrics
        .bookings
        .record("group", "success", Duration::from_millis(4));
    metrics
        .http
        .track("POST", "/api/bookings", 200, Duration::from_millis(8));
    metrics
        .http
        .track("POST", "/api/bookings", 400, Duration::from_millis(2));

    let text = metrics.render_prometheus();

    assert!(text.contains("# TYPE booking_attempts_total counter"));
    assert!(text.contains(
        "booking_attempts_total{kind=\"group\",outcome=\"success\",service=\"application-backend\"} 1"
    ));
    assert!(text.contains("booking_duration_seconds_count{service=\"application-backend\"} 1"));
    assert!(text.contains(
        "http_requests_total{method=\"POST\",endpoint=\"/api/bookings\",status=\"400\",service=\"application-backend\"} 1"
    ));
    assert!(text.contains(
        "http_request_duration_seconds_bucket{method=\"POST\",endpoint=\"/api/bookings\",service=\"application-backend\",le=\"+Inf\"} 2"
    ));
    assert_eq!(metrics.http.requests("POST", "/api/bookings", 200), 1);
    assert_eq!(metrics.service(), "application-backend");
}

fn booking_buckets(text: &str) -> Vec<(String, u64)> {
    text.lines()
        .filter(|line| line.starts_with("booking_duration_seconds_bucket{"))
        .filter_map(|line| {
            let (labels, value) = line.rsplit_once(' ')?;
            Some((labels.to_string(), value.parse().ok()?))
        })
        .collect()
}

#[test]
fn test_inf_bucket_never_trails_finite_buckets_during_scrape() {
    let metrics = Metrics::new("application-backend");

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for i in 0..2_000u64 {
                    metrics
                        .bookings
                        .record("individual", "success", Duration::from_micros(i % 7_000));
                }
            });
        }

        for _ in 0..200 {
            let buckets = booking_buckets(&metrics.render_prometheus());
            let (_, inf) = buckets
                .iter()
                .find(|(labels, _)| labels.contains("le=\"+Inf\""))
                .cloned()
                .unwrap();
            for (labels, value) in &buckets {
                assert!(*value <= inf, "{} = {} exceeds +Inf = {}", labels, value, inf);
            }
        }
    });

    assert_eq!(metrics.bookings.total_attempts(), 8_000);
}
