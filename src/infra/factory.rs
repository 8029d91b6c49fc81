use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::ConnectOptions;
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::{admission::AdmissionService, availability::AvailabilityService};
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_identity_repo::PostgresIdentityRepo,
    postgres_settings_repo::PostgresSettingsRepo, sqlite_booking_repo::SqliteBookingRepo,
    sqlite_identity_repo::SqliteIdentityRepo, sqlite_settings_repo::SqliteSettingsRepo,
};
use crate::infra::video::twilio_issuer::TwilioCredentialIssuer;
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let acquire_timeout = Duration::from_secs(config.db_acquire_timeout_secs);
    let credential_issuer = Arc::new(TwilioCredentialIssuer::new(config));

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(acquire_timeout)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        sqlx::migrate!("./migrations/postgres")
            .run(&pool)
            .await
            .expect("Failed to run Postgres migrations");

        let settings_store = Arc::new(PostgresSettingsRepo::new(pool.clone()));
        let booking_store = Arc::new(PostgresBookingRepo::new(pool.clone()));
        let identity_resolver = Arc::new(PostgresIdentityRepo::new(pool.clone()));

        let availability = Arc::new(AvailabilityService::new(
            settings_store.clone(),
            booking_store.clone(),
        ));
        let admission = Arc::new(AdmissionService::new(
            booking_store.clone(),
            identity_resolver.clone(),
            credential_issuer.clone(),
        ));

        AppState {
            config: config.clone(),
            settings_store,
            booking_store,
            identity_resolver,
            credential_issuer,
            availability,
            admission,
        }
    } else {
        info!("Initializing SQLite connection...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite URL")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(acquire_timeout)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to run SQLite migrations");

        let settings_store = Arc::new(SqliteSettingsRepo::new(pool.clone()));
        let booking_store = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let identity_resolver = Arc::new(SqliteIdentityRepo::new(pool.clone()));

        let availability = Arc::new(AvailabilityService::new(
            settings_store.clone(),
            booking_store.clone(),
        ));
        let admission = Arc::new(AdmissionService::new(
            booking_store.clone(),
            identity_resolver.clone(),
            credential_issuer.clone(),
        ));

        AppState {
            config: config.clone(),
            settings_store,
            booking_store,
            identity_resolver,
            credential_issuer,
            availability,
            admission,
        }
    }
}
