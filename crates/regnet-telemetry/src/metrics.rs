//! Prometheus metrics for the registration network.
//!
//! All metrics follow the naming convention: `regnet_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Contract invocations by function and outcome
    pub static ref OPERATIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("regnet_contracts_operations_total", "Contract invocations processed"),
        &["function", "outcome"]  // outcome: committed or the error kind
    ).expect("metric creation failed");

    /// Time spent executing a contract invocation, commit included
    pub static ref OPERATION_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "regnet_contracts_operation_duration_seconds",
            "Time spent executing contract invocations"
        ).buckets(exponential_buckets(0.000_05, 2.0, 14).expect("valid buckets")),
        &["function"]
    ).expect("metric creation failed");

    /// Transactions discarded because the invocation failed
    pub static ref TRANSACTIONS_ROLLED_BACK: IntCounter = IntCounter::new(
        "regnet_ledger_transactions_rolled_back_total",
        "Transactions discarded without commit"
    ).expect("metric creation failed");

    /// Completed ownership transfers
    pub static ref PROPERTY_TRANSFERS: IntCounter = IntCounter::new(
        "regnet_contracts_property_transfers_total",
        "Properties transferred to a new owner"
    ).expect("metric creation failed");
}

/// Handle to the registered metrics.
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Registering twice is harmless.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(OPERATIONS_TOTAL.clone()),
        Box::new(OPERATION_DURATION.clone()),
        Box::new(TRANSACTIONS_ROLLED_BACK.clone()),
        Box::new(PROPERTY_TRANSFERS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
