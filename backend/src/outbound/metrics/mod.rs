//! Prometheus-backed metrics adapters, compiled with the `metrics` feature.

mod prometheus_proof;

pub use prometheus_proof::PrometheusProofMetrics;
