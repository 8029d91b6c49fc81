use crate::domain::{
    models::booking::{Booking, BookingStatus},
    ports::BookingStore,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PostgresBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, organization_id, scheduled_at, duration_minutes, status, host_identity, customer_identity, metadata, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
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
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE organization_id = $1 AND id = $2")
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
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings
             WHERE organization_id = $1
               AND scheduled_at < $2
               AND scheduled_at + make_interval(mins => duration_minutes) > $3
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
             SET status = $1, metadata = metadata || $2
             WHERE organization_id = $3 AND id = $4 AND status = $5",
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
