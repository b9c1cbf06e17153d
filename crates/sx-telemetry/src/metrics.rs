//! Prometheus metrics for the mint authority and the AMM adapters.
//!
//! All metrics follow the naming convention: `sx_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec,
    Opts, Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // AUTHORITY METRICS
    // =========================================================================

    /// Signature checks by outcome
    pub static ref SIGNATURE_VERIFICATIONS: CounterVec = CounterVec::new(
        Opts::new("sx_authority_signature_verifications_total", "Mint signature checks"),
        &["result"]  // result: valid/invalid
    ).expect("metric creation failed");

    /// Signature failures (for alerting)
    pub static ref SIGNATURE_FAILURES: Counter = Counter::new(
        "sx_authority_signature_failures_total",
        "Mint authorizations rejected for a bad signature"
    ).expect("metric creation failed");

    /// Nonces consumed
    pub static ref NONCES_CONSUMED: Counter = Counter::new(
        "sx_authority_nonces_consumed_total",
        "Mint nonces marked as used"
    ).expect("metric creation failed");

    /// Replay attempts
    pub static ref NONCE_REPLAYS: Counter = Counter::new(
        "sx_authority_nonce_replays_total",
        "Mint authorizations rejected because the nonce was already used"
    ).expect("metric creation failed");

    /// Committed mints by asset symbol
    pub static ref SHIFT_INS: CounterVec = CounterVec::new(
        Opts::new("sx_authority_shift_ins_total", "Committed mints"),
        &["asset"]
    ).expect("metric creation failed");

    /// Committed burns by asset symbol
    pub static ref SHIFT_OUTS: CounterVec = CounterVec::new(
        Opts::new("sx_authority_shift_outs_total", "Committed burn-to-redeem records"),
        &["asset"]
    ).expect("metric creation failed");

    // =========================================================================
    // ADAPTER METRICS
    // =========================================================================

    /// Calls committed by operation
    pub static ref CALLS_COMMITTED: CounterVec = CounterVec::new(
        Opts::new("sx_adapter_calls_committed_total", "Adapter calls committed"),
        &["operation"]  // operation: add_liquidity/remove_liquidity/buy/sell
    ).expect("metric creation failed");

    /// Calls reverted by operation and error kind
    pub static ref CALLS_REVERTED: CounterVec = CounterVec::new(
        Opts::new("sx_adapter_calls_reverted_total", "Adapter calls reverted"),
        &["operation", "kind"]
    ).expect("metric creation failed");

    /// Relay fees paid to submitters
    pub static ref RELAY_FEES_PAID: Counter = Counter::new(
        "sx_adapter_relay_fees_paid_total",
        "Sell calls that paid a relay fee to the submitter"
    ).expect("metric creation failed");

    /// Call duration by operation
    pub static ref CALL_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "sx_adapter_call_duration_seconds",
            "Time spent executing an adapter call under the host lock"
        ).buckets(exponential_buckets(0.00001, 2.0, 15).unwrap_or_default()),
        &["operation"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Fails if called twice in the same process.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Authority
        Box::new(SIGNATURE_VERIFICATIONS.clone()),
        Box::new(SIGNATURE_FAILURES.clone()),
        Box::new(NONCES_CONSUMED.clone()),
        Box::new(NONCE_REPLAYS.clone()),
        Box::new(SHIFT_INS.clone()),
        Box::new(SHIFT_OUTS.clone()),
        // Adapters
        Box::new(CALLS_COMMITTED.clone()),
        Box::new(CALLS_REVERTED.clone()),
        Box::new(RELAY_FEES_PAID.clone()),
        Box::new(CALL_DURATION.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(())
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

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
    ($histogram:expr, $labels:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram.with_label_values($labels))
    };
}
