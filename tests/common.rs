use meeting_backend::{
    api::router::create_router,
    config::Config,
    domain::models::booking::{Booking, BookingStatus, NewBookingParams},
    domain::models::settings::MeetingSettings,
    domain::ports::{BookingStore, SettingsStore},
    domain::services::{admission::AdmissionService, availability::AvailabilityService},
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo, sqlite_identity_repo::SqliteIdentityRepo,
        sqlite_settings_repo::SqliteSettingsRepo,
    },
    infra::video::twilio_issuer::TwilioCredentialIssuer,
    state::AppState,
};

use axum::Router;
use chrono::{DateTime, NaiveTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            twilio_account_sid: "ACtest".to_string(),
            twilio_api_key_sid: "SKtest".to_string(),
            twilio_api_key_secret: "test-secret".to_string(),
            credential_ttl_secs: 3600,
            db_acquire_timeout_secs: 5,
        };

        let settings_store = Arc::new(SqliteSettingsRepo::new(pool.clone()));
        let booking_store = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let identity_resolver = Arc::new(SqliteIdentityRepo::new(pool.clone()));
        let credential_issuer = Arc::new(TwilioCredentialIssuer::new(&config));

        let availability = Arc::new(AvailabilityService::new(
            settings_store.clone(),
            booking_store.clone(),
        ));
        let admission = Arc::new(AdmissionService::new(
            booking_store.clone(),
            identity_resolver.clone(),
            credential_issuer.clone(),
        ));

        let state = Arc::new(AppState {
            config,
            settings_store,
            booking_store,
            identity_resolver,
            credential_issuer,
            availability,
            admission,
        });

        let router = create_router(state.clone());

        Self { router, pool, db_filename, state }
    }

    #[allow(dead_code)]
    pub async fn seed_settings(
        &self,
        organization_id: &str,
        slot_duration_minutes: i32,
        start: (u32, u32),
        end: (u32, u32),
        admin_24h_enabled: bool,
    ) -> MeetingSettings {
        let settings = MeetingSettings {
            organization_id: organization_id.to_string(),
            slot_duration_minutes,
            business_hours_start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            business_hours_end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            admin_24h_enabled,
            updated_at: Utc::now(),
        };
        self.state.settings_store.upsert(&settings).await.expect("seed settings")
    }

    #[allow(dead_code)]
    pub async fn seed_booking(
        &self,
        organization_id: &str,
        scheduled_at: DateTime<Utc>,
        duration_minutes: i32,
        status: BookingStatus,
        host_identity: &str,
        customer_identity: &str,
    ) -> Booking {
        let mut booking = Booking::new(NewBookingParams {
            organization_id: organization_id.to_string(),
            scheduled_at,
            duration_minutes,
            host_identity: host_identity.to_string(),
            customer_identity: customer_identity.to_string(),
        });
        booking.status = status;
        self.state.booking_store.create(&booking).await.expect("seed booking")
    }

    #[allow(dead_code)]
    pub async fn seed_member(&self, organization_id: &str, identity: &str, role: &str) {
        sqlx::query("INSERT INTO organization_members (organization_id, identity, role) VALUES (?, ?, ?)")
            .bind(organization_id)
            .bind(identity)
            .bind(role)
            .execute(&self.pool)
            .await
            .expect("seed member");
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
