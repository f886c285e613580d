use serde::Serialize;

use super::{Advice, ask_llm, fetch_ride};
use crate::error::AppError;
use crate::prompts::build_reroute_prompt;
use crate::state::AppState;

pub const EXCEPTION_HANDLED: &str = "Exception Handled";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RerouteCommand {
    pub awb: String,
    pub status: &'static str,
    pub llm_command: String,
    pub message: &'static str,
}

pub async fn reroute_command(
    state: &AppState,
    awb: &str,
    problem_description: &str,
) -> Result<Advice<RerouteCommand>, AppError> {
    let ride = fetch_ride(state, awb).await?;

    let prompt = build_reroute_prompt(
        awb,
        ride.rider_or_unassigned(),
        &ride.delivery_address,
        problem_description,
    );
    let reply = ask_llm(state, "reroute_command", awb, &prompt).await;

    Ok(Advice {
        response: RerouteCommand {
            awb: awb.to_string(),
            status: EXCEPTION_HANDLED,
            llm_command: reply.text,
            message: "LLM command generated successfully.",
        },
        llm_outcome: Some(reply.outcome),
    })
}
