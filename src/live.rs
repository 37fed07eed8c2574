//! Bridge between the push notification socket and the dashboard.
//!
//! Every `eventMusicUpdate` frame becomes an info notice. When the frame
//! belongs to the event whose board is open, the registered table is
//! reloaded as well.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use parking_lot::Mutex;
use thiserror::Error;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use crate::alerts::{Notice, Notifier};
use crate::domain::types::EventId;
use crate::dto::push::{EventMusicUpdate, PushMessage};

#[derive(Debug, Error)]
pub enum LiveError {
    #[error("Malformed push frame: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Push socket error: {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Anything the live board can refresh after a new request arrives.
#[async_trait]
pub trait Reloadable: Send + Sync {
    async fn reload(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// A notice was emitted; `reloaded` tells whether the open board was refreshed.
    Notified { reloaded: bool },
    Ignored,
}

pub struct LiveBoard {
    notifier: Arc<dyn Notifier>,
    context: Mutex<Option<(EventId, Arc<dyn Reloadable>)>>,
}

impl LiveBoard {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            context: Mutex::new(None),
        }
    }

    /// Registers the board currently on screen. Replaces any previous one.
    pub fn set_context(&self, event_id: EventId, target: Arc<dyn Reloadable>) {
        *self.context.lock() = Some((event_id, target));
    }

    pub fn clear_context(&self) {
        *self.context.lock() = None;
    }

    pub fn context_event(&self) -> Option<EventId> {
        self.context.lock().as_ref().map(|(event_id, _)| *event_id)
    }

    pub async fn handle_frame(&self, text: &str) -> Result<FrameOutcome, LiveError> {
        let update = match PushMessage::parse(text)? {
            PushMessage::EventMusicUpdate(update) => update,
            PushMessage::Other(kind) => {
                log::debug!("Ignoring push frame of type {kind}");
                return Ok(FrameOutcome::Ignored);
            }
        };

        self.notifier
            .notify(Notice::info(announcement(&update)).with_link(update.url.clone()));

        let target = {
            let context = self.context.lock();
            match (context.as_ref(), update.event_id) {
                (Some((current, target)), Some(event_id)) if *current == event_id => {
                    Some(Arc::clone(target))
                }
                _ => None,
            }
        };

        let reloaded = match target {
            Some(target) => {
                target.reload().await;
                true
            }
            None => false,
        };
        Ok(FrameOutcome::Notified { reloaded })
    }
}

fn kind_label(kind: &str) -> &str {
    match kind {
        "song" => "canción",
        "mention" => "mención",
        other => other,
    }
}

fn tip_label(tip: Option<f64>) -> String {
    match tip {
        Some(tip) if tip != 0.0 => format!(" - ${tip}"),
        _ => "Gratuito".to_string(),
    }
}

/// Text of the notice shown for a new request.
pub fn announcement(update: &EventMusicUpdate) -> String {
    let applicant = update
        .applicant
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or("Cliente anónimo");
    format!(
        "🎵 Nueva solicitud de {} de {}-{}",
        kind_label(update.kind.as_deref().unwrap_or_default()),
        applicant,
        tip_label(update.tip)
    )
}

/// Feeds every text frame of the socket at `url` into `board` until the
/// server closes the connection or `shutdown` fires.
pub async fn run(
    url: &str,
    board: Arc<LiveBoard>,
    shutdown: CancellationToken,
) -> Result<(), LiveError> {
    let (mut socket, _) = tokio_tungstenite::connect_async(url).await?;
    log::info!("Push socket connected to {url}");

    loop {
        let frame = tokio::select! {
            _ = shutdown.cancelled() => break,
            frame = socket.next() => frame,
        };

        match frame {
            Some(Ok(Message::Text(text))) => {
                if let Err(e) = board.handle_frame(text.as_str()).await {
                    log::warn!("Skipping push frame: {e}");
                }
            }
            Some(Ok(Message::Close(_))) | None => break,
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                log::error!("Push socket failed: {e}");
                return Err(e.into());
            }
        }
    }

    log::info!("Push socket disconnected");
    Ok(())
}
