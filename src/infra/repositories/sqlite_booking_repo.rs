use crate::domain::{
    models::booking::{Booking, BookingStatus},
    ports::BookingStore,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, organization_id, scheduled_at, duration_minutes, status, host_identity, customer_identity, metadata, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&booking.id)
        .bind(&booking.organization_id)
        .bind(booking.scheduled_at)
        .bind(booking.duration_minutes)
        .bind(booking.status.as_str())
        .bind(&booking.host_identity)
        .bind(&booking.customer_identity)
        .bind(&booking.metadata)
        .bind(booking.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, organization_id: &str, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE organization_id = ? AND id = ?")
            .bind(organization_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_in_window(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, AppError> {
        // datetime() normalizes both sides to UTC wall-clock text so the
        // computed interval end compares against the bound instants.
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings
             WHERE organization_id = ?
               AND datetime(scheduled_at) < datetime(?)
               AND datetime(scheduled_at, '+' || duration_minutes || ' minutes') > datetime(?)
             ORDER BY scheduled_at ASC",
        )
        .bind(organization_id)
        .bind(end)
        .bind(start)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn compare_and_swap_status(
        &self,
        organization_id: &str,
        booking_id: &str,
        expected: BookingStatus,
        next: BookingStatus,
        metadata_patch: &serde_json::Value,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE bookings
             SET status = ?, metadata = json_patch(metadata, ?)
             WHERE organization_id = ? AND id = ? AND status = ?",
        )
        .bind(next.as_str())
        .bind(Json(metadata_patch))
        .bind(organization_id)
        .bind(booking_id)
        .bind(expected.as_str())
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.rows_affected() == 1)
    }
}
