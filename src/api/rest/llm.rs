use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::dispatch::reassign::reassign_suggestion;
use crate::dispatch::reroute::reroute_command;
use crate::dispatch::Advice;
use crate::error::AppError;
use crate::state::AppState;

/// `ok`, `unavailable` or `failed`; absent when no LLM call was made.
pub const LLM_OUTCOME_HEADER: &str = "x-llm-outcome";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/llm/reroute_command", post(handle_reroute_command))
        .route("/api/llm/reassign_suggestion", post(handle_reassign_suggestion))
}

#[derive(Debug, Default, Deserialize)]
pub struct RerouteCommandParams {
    pub awb: Option<String>,
    pub problem_description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReassignSuggestionParams {
    pub awb: Option<String>,
}

async fn handle_reroute_command(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RerouteCommandParams>,
    body: Bytes,
) -> Result<Response, AppError> {
    let body: RerouteCommandParams = if query.awb.is_some() && query.problem_description.is_some() {
        RerouteCommandParams::default()
    } else {
        json_params(&body)?
    };
    let awb = required("awb", query.awb, body.awb)?;
    let problem = required(
        "problem_description",
        query.problem_description,
        body.problem_description,
    )?;

    let advice = reroute_command(&state, &awb, &problem).await?;
    Ok(advice_response(advice))
}

async fn handle_reassign_suggestion(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReassignSuggestionParams>,
    body: Bytes,
) -> Result<Response, AppError> {
    let body: ReassignSuggestionParams = if query.awb.is_some() {
        ReassignSuggestionParams::default()
    } else {
        json_params(&body)?
    };
    let awb = required("awb", query.awb, body.awb)?;

    let advice = reassign_suggestion(&state, &awb).await?;
    Ok(advice_response(advice))
}

fn advice_response<T: Serialize>(advice: Advice<T>) -> Response {
    match advice.llm_outcome {
        Some(outcome) => (
            [(LLM_OUTCOME_HEADER, outcome.as_str())],
            Json(advice.response),
        )
            .into_response(),
        None => Json(advice.response).into_response(),
    }
}

/// An empty body is treated as "no fields supplied".
fn json_params<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body)
        .map_err(|err| AppError::BadRequest(format!("invalid JSON body: {err}")))
}

fn required(field: &str, from_query: Option<String>, from_body: Option<String>) -> Result<String, AppError> {
    from_query
        .or(from_body)
        .ok_or_else(|| AppError::BadRequest(format!("missing required field '{field}'")))
}
