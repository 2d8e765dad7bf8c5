use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge_vec, HistogramVec,
    IntCounterVec, IntGaugeVec, TextEncoder,
};

// Metrics registry
static API_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "rbac_api_operations_total",
        "Total number of API operations",
        &["entity", "operation", "outcome"]
    )
    .unwrap()
});

static API_OPERATION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "rbac_api_operation_duration_seconds",
        "API operation latency in seconds",
        &["entity", "operation"],
        vec![0.0001, 0.0005, 0.001, 0.005, 0.010, 0.050, 0.100, 0.500]
    )
    .unwrap()
});

static RECORDS: Lazy<IntGaugeVec> = Lazy::new(|| {
    register_int_gauge_vec!(
        "rbac_records",
        "Number of records in each collection as of the last read or write",
        &["collection"]
    )
    .unwrap()
});

pub struct MetricsRecorder;

impl MetricsRecorder {
    pub fn record_operation(entity: &str, operation: &str, outcome: &str) {
        API_OPERATIONS_TOTAL
            .with_label_values(&[entity, operation, outcome])
            .inc();
    }

    pub fn record_operation_duration(entity: &str, operation: &str, duration: f64) {
        API_OPERATION_DURATION
            .with_label_values(&[entity, operation])
            .observe(duration);
    }

    pub fn set_records(collection: &str, count: usize) {
        RECORDS
            .with_label_values(&[collection])
            .set(count as i64);
    }

    pub fn operation_count(entity: &str, operation: &str, outcome: &str) -> u64 {
        API_OPERATIONS_TOTAL
            .with_label_values(&[entity, operation, outcome])
            .get()
    }

    /// Export all metrics in Prometheus format
    pub fn export() -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = prometheus::gather();
        encoder.encode_to_string(&metric_families)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_counter_increments() {
        let before = MetricsRecorder::operation_count("Widget", "create", "ok");
        MetricsRecorder::record_operation("Widget", "create", "ok");
        MetricsRecorder::record_operation("Widget", "create", "ok");
        assert_eq!(
            MetricsRecorder::operation_count("Widget", "create", "ok"),
            before + 2
        );
    }

    #[test]
    fn test_export_contains_registered_metrics() {
        MetricsRecorder::record_operation("Widget", "list", "ok");
        MetricsRecorder::set_records("widgets", 3);

        let text = MetricsRecorder::export().unwrap();
        assert!(text.contains("rbac_api_operations_total"));
        assert!(text.contains("rbac_records"));
    }
}
