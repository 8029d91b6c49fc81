use crate::config::Config;
use crate::domain::models::admission::VideoCredential;
use crate::domain::ports::CredentialIssuer;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
struct VideoGrant {
    room: String,
}

#[derive(Serialize)]
struct Grants {
    identity: String,
    video: VideoGrant,
}

/// Twilio Video access token payload (HS256, `twilio-fpa;v=1` content type).
#[derive(Serialize)]
struct AccessTokenClaims {
    jti: String,
    iss: String,
    sub: String,
    iat: i64,
    exp: i64,
    grants: Grants,
}

/// Signs short-lived room credentials locally with the account's API key,
/// the way the Twilio SDK builds them. No network round trip is needed.
pub struct TwilioCredentialIssuer {
    account_sid: String,
    api_key_sid: String,
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl TwilioCredentialIssuer {
    pub fn new(config: &Config) -> Self {
        Self {
            account_sid: config.twilio_account_sid.clone(),
            api_key_sid: config.twilio_api_key_sid.clone(),
            encoding_key: EncodingKey::from_secret(config.twilio_api_key_secret.as_bytes()),
            ttl: Duration::seconds(config.credential_ttl_secs),
        }
    }
}

#[async_trait]
impl CredentialIssuer for TwilioCredentialIssuer {
    async fn issue(&self, identity: &str, room_id: &str) -> Result<VideoCredential, AppError> {
        let now = Utc::now();
        let expires_at = now + self.ttl;

        let claims = AccessTokenClaims {
            jti: format!("{}-{}", self.api_key_sid, Uuid::new_v4()),
            iss: self.api_key_sid.clone(),
            sub: self.account_sid.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            grants: Grants {
                identity: identity.to_string(),
                video: VideoGrant { room: room_id.to_string() },
            },
        };

        let mut header = Header::new(Algorithm::HS256);
        header.cty = Some("twilio-fpa;v=1".to_string());

        let token = encode(&header, &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("video token encoding failed: {}", e);
            AppError::Upstream(format!("credential issuance failed: {e}"))
        })?;

        Ok(VideoCredential { token, expires_at })
    }
}
