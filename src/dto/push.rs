//! Frames delivered by the push notification socket.

use serde::Deserialize;

use crate::domain::types::EventId;

/// Raw `{type, data}` frame; the payload is decoded per message type.
#[derive(Clone, Debug, Deserialize)]
pub struct RawFrame {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Payload of an `eventMusicUpdate` frame.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EventMusicUpdate {
    #[serde(default)]
    pub applicant: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub tip: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "eventId", default)]
    pub event_id: Option<EventId>,
}

/// Decoded push message.
#[derive(Clone, Debug, PartialEq)]
pub enum PushMessage {
    EventMusicUpdate(EventMusicUpdate),
    Other(String),
}

pub const EVENT_MUSIC_UPDATE: &str = "eventMusicUpdate";

impl PushMessage {
    /// Decodes a text frame. Unknown types are kept as [`PushMessage::Other`].
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let frame: RawFrame = serde_json::from_str(text)?;
        if frame.kind == EVENT_MUSIC_UPDATE {
            let update = serde_json::from_value(frame.data)?;
            Ok(PushMessage::EventMusicUpdate(update))
        } else {
            Ok(PushMessage::Other(frame.kind))
        }
    }
}
