use serde::{Deserialize, Serialize};

use crate::domain::types::{PackageId, PackageName, Tip};

/// What kind of request a package allows the attendee to submit.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Song,
    Mention,
    Both,
}

impl RequestKind {
    /// Label used in tables and pickers.
    pub fn label(self) -> &'static str {
        match self {
            RequestKind::Song => "Canción 🎵",
            RequestKind::Mention => "Mención 🎙️",
            RequestKind::Both => "Cualquiera 🔷",
        }
    }

    /// API string value.
    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::Song => "song",
            RequestKind::Mention => "mention",
            RequestKind::Both => "both",
        }
    }

    pub fn allows_song(self) -> bool {
        matches!(self, RequestKind::Song | RequestKind::Both)
    }

    pub fn allows_mention(self) -> bool {
        matches!(self, RequestKind::Mention | RequestKind::Both)
    }
}

impl std::str::FromStr for RequestKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "song" => Ok(RequestKind::Song),
            "mention" => Ok(RequestKind::Mention),
            "both" => Ok(RequestKind::Both),
            other => Err(format!("unknown request kind `{other}`")),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Package {
    pub id: PackageId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RequestKind,
    /// Fixed tip in MXN. Missing or negative amounts mean a voluntary tip.
    #[serde(default)]
    pub tip: Option<f64>,
    #[serde(default)]
    pub is_optional_tip: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

pub(crate) fn default_active() -> bool {
    true
}

impl Package {
    /// Human readable price: `$150.00 MXN`, `Gratuito` or `Voluntaria`.
    pub fn price_label(&self) -> String {
        price_label(self.tip)
    }

    /// Whether the attendee pays nothing and may not choose an amount.
    pub fn is_free(&self) -> bool {
        !self.is_optional_tip && self.tip == Some(0.0)
    }
}

/// Formats a package tip the way the tables show it.
pub fn price_label(tip: Option<f64>) -> String {
    match tip {
        Some(value) if value > 0.0 => format!("${value:.2} MXN"),
        Some(value) if value == 0.0 => "Gratuito".to_string(),
        _ => "Voluntaria".to_string(),
    }
}

/// Payload for creating or updating a package.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewPackage {
    pub name: PackageName,
    #[serde(rename = "type")]
    pub kind: RequestKind,
    #[serde(rename = "isOptionalTip")]
    pub is_optional_tip: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<Tip>,
}
