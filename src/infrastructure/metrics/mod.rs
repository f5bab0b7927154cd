//! Prometheus Metrics Module
//!
//! Provides process-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - Packets received and sent, by connection state
//! - Bytes read and written on the wire
//! - Decode errors by kind
//! - Open connections
//! - Server list ping latency

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

use crate::protocol::state::ConnectionState;

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Packets received, by connection state and packet name
pub static PACKETS_RECEIVED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("packets_received_total", "Total number of packets received").namespace("diorite"),
        &["state", "packet"],
    )
    .expect("Failed to create PACKETS_RECEIVED_TOTAL metric")
});

/// Packets sent, by connection state and packet name
pub static PACKETS_SENT_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("packets_sent_total", "Total number of packets sent").namespace("diorite"),
        &["state", "packet"],
    )
    .expect("Failed to create PACKETS_SENT_TOTAL metric")
});

/// Frame bytes on the wire, including length prefixes
pub static BYTES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("bytes_total", "Total number of frame bytes").namespace("diorite"),
        &["direction"], // "read", "written"
    )
    .expect("Failed to create BYTES_TOTAL metric")
});

pub static DECODE_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("decode_errors_total", "Total number of packet decode errors")
            .namespace("diorite"),
        &["kind"],
    )
    .expect("Failed to create DECODE_ERRORS_TOTAL metric")
});

/// Open server connections
pub static CONNECTIONS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::with_opts(
        Opts::new("connections_active", "Number of open server connections").namespace("diorite"),
    )
    .expect("Failed to create CONNECTIONS_ACTIVE metric")
});

/// Server list ping round trip
pub static STATUS_LATENCY_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    let buckets = vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];
    Histogram::with_opts(
        HistogramOpts::new("status_latency_seconds", "Server list ping latency in seconds")
            .namespace("diorite")
            .buckets(buckets),
    )
    .expect("Failed to create STATUS_LATENCY_SECONDS metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(PACKETS_RECEIVED_TOTAL.clone()))
        .expect("Failed to register PACKETS_RECEIVED_TOTAL");
    registry
        .register(Box::new(PACKETS_SENT_TOTAL.clone()))
        .expect("Failed to register PACKETS_SENT_TOTAL");
    registry
        .register(Box::new(BYTES_TOTAL.clone()))
        .expect("Failed to register BYTES_TOTAL");
    registry
        .register(Box::new(DECODE_ERRORS_TOTAL.clone()))
        .expect("Failed to register DECODE_ERRORS_TOTAL");
    registry
        .register(Box::new(CONNECTIONS_ACTIVE.clone()))
        .expect("Failed to register CONNECTIONS_ACTIVE");
    registry
        .register(Box::new(STATUS_LATENCY_SECONDS.clone()))
        .expect("Failed to register STATUS_LATENCY_SECONDS");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Metrics should be valid UTF-8")
}

pub fn record_packet_received(state: ConnectionState, packet: &str) {
    PACKETS_RECEIVED_TOTAL
        .with_label_values(&[state.as_str(), packet])
        .inc();
}

pub fn record_packet_sent(state: ConnectionState, packet: &str) {
    PACKETS_SENT_TOTAL
        .with_label_values(&[state.as_str(), packet])
        .inc();
}

pub fn record_bytes(direction: &str, bytes: usize) {
    BYTES_TOTAL
        .with_label_values(&[direction])
        .inc_by(bytes as u64);
}

pub fn record_decode_error(kind: &str) {
    DECODE_ERRORS_TOTAL.with_label_values(&[kind]).inc();
}

pub fn connection_opened() {
    CONNECTIONS_ACTIVE.inc();
}

pub fn connection_closed() {
    CONNECTIONS_ACTIVE.dec();
}

pub fn record_status_latency(latency_secs: f64) {
    STATUS_LATENCY_SECONDS.observe(latency_secs);
}
