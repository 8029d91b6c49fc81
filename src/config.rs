use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub twilio_account_sid: String,
    pub twilio_api_key_sid: String,
    pub twilio_api_key_secret: String,
    pub credential_ttl_secs: i64,
    pub db_acquire_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID").unwrap_or_else(|_| "ACdevelopment".to_string()),
            twilio_api_key_sid: env::var("TWILIO_API_KEY_SID").unwrap_or_else(|_| "SKdevelopment".to_string()),
            twilio_api_key_secret: env::var("TWILIO_API_KEY_SECRET").unwrap_or_else(|_| "dev-secret".to_string()),
            credential_ttl_secs: env::var("CREDENTIAL_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            db_acquire_timeout_secs: env::var("DB_ACQUIRE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }
}
