use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub llm_requests_total: IntCounterVec,
    pub llm_latency_seconds: HistogramVec,
    pub ride_lookups_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let llm_requests_total = IntCounterVec::new(
            Opts::new("llm_requests_total", "LLM calls by endpoint and outcome"),
            &["endpoint", "outcome"],
        )
        .expect("valid llm_requests_total metric");

        let llm_latency_seconds = HistogramVec::new(
            HistogramOpts::new("llm_latency_seconds", "Latency of LLM calls in seconds"),
            &["endpoint"],
        )
        .expect("valid llm_latency_seconds metric");

        let ride_lookups_total = IntCounterVec::new(
            Opts::new("ride_lookups_total", "Ride lookups by outcome"),
            &["outcome"],
        )
        .expect("valid ride_lookups_total metric");

        registry
            .register(Box::new(llm_requests_total.clone()))
            .expect("register llm_requests_total");
        registry
            .register(Box::new(llm_latency_seconds.clone()))
            .expect("register llm_latency_seconds");
        registry
            .register(Box::new(ride_lookups_total.clone()))
            .expect("register ride_lookups_total");

        Self {
            registry,
            llm_requests_total,
            llm_latency_seconds,
            ride_lookups_total,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
