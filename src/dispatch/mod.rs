pub mod reassign;
pub mod reroute;

use std::time::Instant;

use tracing::info;

use crate::error::AppError;
use crate::llm::{LlmOutcome, LlmReply};
use crate::models::ride::Ride;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct Advice<T> {
    pub response: T,
    pub llm_outcome: Option<LlmOutcome>,
}

async fn fetch_ride(state: &AppState, awb: &str) -> Result<Ride, AppError> {
    match state.store.get_ride(awb).await? {
        Some(ride) => {
            state.metrics.ride_lookups_total.with_label_values(&["found"]).inc();
            Ok(ride)
        }
        None => {
            state.metrics.ride_lookups_total.with_label_values(&["not_found"]).inc();
            Err(AppError::NotFound("Ride not found".to_string()))
        }
    }
}

async fn ask_llm(state: &AppState, endpoint: &str, awb: &str, prompt: &str) -> LlmReply {
    let start = Instant::now();
    let reply = state.llm.generate(prompt).await;

    state
        .metrics
        .llm_latency_seconds
        .with_label_values(&[endpoint])
        .observe(start.elapsed().as_secs_f64());
    state
        .metrics
        .llm_requests_total
        .with_label_values(&[endpoint, reply.outcome.as_str()])
        .inc();

    info!(awb = %awb, endpoint, outcome = reply.outcome.as_str(), "llm reply received");
    reply
}
