use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{BookingStore, CredentialIssuer, IdentityResolver, SettingsStore};
use crate::domain::services::{admission::AdmissionService, availability::AvailabilityService};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub settings_store: Arc<dyn SettingsStore>,
    pub booking_store: Arc<dyn BookingStore>,
    pub identity_resolver: Arc<dyn IdentityResolver>,
    pub credential_issuer: Arc<dyn CredentialIssuer>,
    pub availability: Arc<AvailabilityService>,
    pub admission: Arc<AdmissionService>,
}
