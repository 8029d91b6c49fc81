use crate::domain::{
    models::{booking::Booking, role::Role},
    ports::IdentityResolver,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

pub struct SqliteIdentityRepo {
    pool: SqlitePool,
}

impl SqliteIdentityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityResolver for SqliteIdentityRepo {
    async fn role_of(
        &self,
        identity: &str,
        organization_id: &str,
        booking: &Booking,
    ) -> Result<Role, AppError> {
        let row = sqlx::query(
            "SELECT role FROM organization_members WHERE organization_id = ? AND identity = ?",
        )
        .bind(organization_id)
        .bind(identity)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let member_role: Option<String> = row.map(|r| r.get("role"));
        Ok(Role::resolve(identity, booking, member_role.as_deref()))
    }
}
