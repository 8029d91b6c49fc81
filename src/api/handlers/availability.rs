use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::dtos::responses::AvailabilityResponse;
use crate::domain::models::role::Role;
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path(organization_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    if organization_id.trim().is_empty() {
        return Err(AppError::Validation("organization_id required".into()));
    }

    let date_str = params.get("date").ok_or(AppError::Validation("date required".into()))?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))?;

    let role = match params.get("role").map(String::as_str) {
        Some("admin") => Role::Admin,
        Some("customer") | None => Role::Customer,
        Some(other) => {
            return Err(AppError::Validation(format!("Invalid role '{other}' (admin or customer)")))
        }
    };

    let availability = state
        .availability
        .day_availability(&organization_id, date, role, Utc::now())
        .await?;

    Ok(Json(AvailabilityResponse {
        date: date_str.clone(),
        slots: availability.slots,
        settings: availability.settings,
    }))
}
