use serde::Serialize;
use tracing::debug;

use super::{Advice, ask_llm, fetch_ride};
use crate::error::AppError;
use crate::models::ride::RideStatus;
use crate::prompts::build_reassignment_prompt;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ReassignmentSuggestion {
    Suggested {
        awb: String,
        current_status: RideStatus,
        llm_suggestion: String,
        message: &'static str,
    },
    NotNeeded {
        message: String,
    },
}

/// The suggestion is not applied to the ride.
pub async fn reassign_suggestion(
    state: &AppState,
    awb: &str,
) -> Result<Advice<ReassignmentSuggestion>, AppError> {
    let ride = fetch_ride(state, awb).await?;

    match ride.status {
        RideStatus::Pending => {}
        RideStatus::Assigned
        | RideStatus::InTransit
        | RideStatus::Delivered
        | RideStatus::Exception
        | RideStatus::Cancelled
        | RideStatus::Other(_) => {
            debug!(awb = %awb, status = %ride.status, "ride not pending; skipping llm");
            return Ok(Advice {
                response: ReassignmentSuggestion::NotNeeded {
                    message: format!("Ride is already {}. No reassignment needed.", ride.status),
                },
                llm_outcome: None,
            });
        }
    }

    let prompt = build_reassignment_prompt(awb, &ride.pickup_address, &ride.delivery_address);
    let reply = ask_llm(state, "reassign_suggestion", awb, &prompt).await;

    Ok(Advice {
        response: ReassignmentSuggestion::Suggested {
            awb: awb.to_string(),
            current_status: ride.status,
            llm_suggestion: reply.text,
            message: "LLM suggested rider for priority assignment.",
        },
        llm_outcome: Some(reply.outcome),
    })
}
