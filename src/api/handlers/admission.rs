use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dtos::requests::JoinSessionRequest;
use crate::api::dtos::responses::{JoinDeniedResponse, JoinGrantedResponse};
use crate::domain::services::admission::AdmissionOutcome;
use crate::error::AppError;
use crate::state::AppState;

pub async fn join_session(
    State(state): State<Arc<AppState>>,
    Path((organization_id, booking_id)): Path<(String, String)>,
    Json(payload): Json<JoinSessionRequest>,
) -> Result<Response, AppError> {
    if payload.identity.trim().is_empty() {
        return Err(AppError::Validation("identity required".into()));
    }

    let outcome = state
        .admission
        .request_admission(
            &organization_id,
            &booking_id,
            &payload.identity,
            payload.apply_transition,
            Utc::now(),
        )
        .await?;

    // A denial is a decision, not a failure: 200 with the reason attached.
    let response = match outcome {
        AdmissionOutcome::Granted(grant) => Json(JoinGrantedResponse {
            allowed: true,
            booking: grant.booking,
            role: grant.role,
            room_id: grant.room_id,
            token: grant.credential.token,
            expires_at: grant.credential.expires_at,
        })
        .into_response(),
        AdmissionOutcome::Denied(decision) => Json(JoinDeniedResponse {
            allowed: false,
            reason: decision.reason,
        })
        .into_response(),
    };

    Ok(response)
}
