use serde::{Deserialize, Serialize};

use crate::domain::models::booking::Booking;

/// Resolved once per request and threaded through as-is; the admission and
/// generation logic switch on the variant instead of re-deriving booleans.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Host,
    Admin,
    Customer,
    Unauthorized,
}

impl Role {
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Host | Role::Admin)
    }

    /// Resolution order: the booking's host outranks an admin membership,
    /// admins outrank the named customer, anyone else is unauthorized.
    /// `member_role` is the organization membership row, when one exists.
    pub fn resolve(identity: &str, booking: &Booking, member_role: Option<&str>) -> Role {
        if identity == booking.host_identity {
            Role::Host
        } else if member_role == Some("admin") {
            Role::Admin
        } else if identity == booking.customer_identity {
            Role::Customer
        } else {
            Role::Unauthorized
        }
    }
}
