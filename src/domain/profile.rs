use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::PersonName;

/// Profile of the signed-in organizer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub events_remaining: Option<u32>,
    #[serde(rename = "isStripeVerified", default)]
    pub is_stripe_verified: bool,
    #[serde(default)]
    pub is_demo: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub subscription_status: Option<String>,
    #[serde(default)]
    pub subscription_end: Option<DateTime<Utc>>,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Payload for `PATCH /users/update-name`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProfileUpdate {
    #[serde(rename = "firstName")]
    pub first_name: PersonName,
    #[serde(rename = "lastName")]
    pub last_name: PersonName,
}
