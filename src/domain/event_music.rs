use serde::{Deserialize, Serialize};

use crate::domain::package::{RequestKind, default_active};
use crate::domain::types::{EventId, EventMusicId, PackageId, Tip};

/// Track metadata as returned by the song search.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Track {
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub album_logo: Option<String>,
    #[serde(default)]
    pub spotify_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Mention {
    pub text: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Stripe,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Stripe => "stripe",
        }
    }
}

/// A song or mention request submitted by an attendee.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EventMusic {
    pub id: EventMusicId,
    #[serde(default)]
    pub application_number: Option<i64>,
    #[serde(rename = "type")]
    pub kind: RequestKind,
    #[serde(default)]
    pub music: Option<Track>,
    #[serde(default)]
    pub mention: Option<Mention>,
    #[serde(default)]
    pub applicant: Option<String>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub tip: f64,
    #[serde(default)]
    pub is_played: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl EventMusic {
    pub fn applicant_label(&self) -> &str {
        self.applicant
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Cliente anónimo")
    }

    pub fn tip_label(&self) -> String {
        if self.tip == 0.0 {
            "Gratis".to_string()
        } else {
            format!("${:.2} MXN", self.tip)
        }
    }
}

/// Body for `POST /event-music/create-session`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewRequest {
    #[serde(rename = "eventId")]
    pub event_id: EventId,
    #[serde(rename = "packageId")]
    pub package_id: PackageId,
    #[serde(rename = "type")]
    pub kind: RequestKind,
    pub applicant: Option<String>,
    pub description: Option<String>,
    pub tip: Tip,
    pub name: Option<String>,
    pub author: Option<String>,
    pub duration: Option<String>,
    pub album_logo: Option<String>,
    pub spotify_url: Option<String>,
    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "isStripe")]
    pub is_stripe: bool,
}

/// Body for `POST /event-music/complete`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CompleteRequest {
    #[serde(rename = "eventMusicId")]
    pub event_music_id: EventMusicId,
    #[serde(rename = "isPaid", skip_serializing_if = "Option::is_none")]
    pub is_paid: Option<bool>,
}

/// Body for `POST /event-music/paid`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MarkPaid {
    #[serde(rename = "eventMusicId")]
    pub event_music_id: EventMusicId,
}

/// Response of `create-session`: a checkout URL for card payments.
#[derive(Clone, Debug, Deserialize, PartialEq, Default)]
pub struct CheckoutSession {
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_labels_match_board_wording() {
        let request: EventMusic = serde_json::from_str(
            r#"{"id": 3, "type": "song", "payment_method": "cash", "tip": 0,
                "music": {"name": "Cumbia"}}"#,
        )
        .unwrap();

        assert_eq!(request.applicant_label(), "Cliente anónimo");
        assert_eq!(request.tip_label(), "Gratis");
        assert!(!request.is_paid);
        assert!(request.is_active);
    }

    #[test]
    fn complete_request_omits_missing_paid_flag() {
        let body = CompleteRequest {
            event_music_id: EventMusicId::new(9).unwrap(),
            is_paid: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"eventMusicId": 9})
        );
    }
}
