use crate::domain::{models::settings::MeetingSettings, ports::SettingsStore};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteSettingsRepo {
    pool: SqlitePool,
}

impl SqliteSettingsRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsRepo {
    async fn get(&self, organization_id: &str) -> Result<Option<MeetingSettings>, AppError> {
        sqlx::query_as::<_, MeetingSettings>("SELECT * FROM meeting_settings WHERE organization_id = ?")
            .bind(organization_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn upsert(&self, settings: &MeetingSettings) -> Result<MeetingSettings, AppError> {
        sqlx::query_as::<_, MeetingSettings>(
            "INSERT INTO meeting_settings (organization_id, slot_duration_minutes, business_hours_start, business_hours_end, admin_24h_enabled, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(organization_id) DO UPDATE SET
                slot_duration_minutes = excluded.slot_duration_minutes,
                business_hours_start = excluded.business_hours_start,
                business_hours_end = excluded.business_hours_end,
                admin_24h_enabled = excluded.admin_24h_enabled,
                updated_at = excluded.updated_at
             RETURNING *",
        )
        .bind(&settings.organization_id)
        .bind(settings.slot_duration_minutes)
        .bind(settings.business_hours_start)
        .bind(settings.business_hours_end)
        .bind(settings.admin_24h_enabled)
        .bind(settings.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
