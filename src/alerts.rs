//! User-facing notices and confirmation dialogs.
//!
//! The dashboard never draws toasts or dialogs itself; it hands [`Notice`]s to
//! a [`Notifier`] and asks a [`Confirm`] implementation before destructive
//! calls.

use async_trait::async_trait;
use parking_lot::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

/// A toast-style message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
    /// Optional link opened when the notice is clicked.
    pub link: Option<String>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
            link: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
            link: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log; used by the console binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            Level::Error => log::error!("{}", notice.message),
            Level::Info | Level::Success => match &notice.link {
                Some(link) => log::info!("{} ({link})", notice.message),
                None => log::info!("{}", notice.message),
            },
        }
    }
}

/// Keeps every notice in memory, in order.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

/// A confirmation dialog, optionally with a checkbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub message: String,
    pub checkbox: Option<String>,
}

impl Prompt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            checkbox: None,
        }
    }

    pub fn with_checkbox(mut self, label: impl Into<String>) -> Self {
        self.checkbox = Some(label.into());
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Cancelled,
    /// `checked` reports the checkbox state; `false` when there is none.
    Confirmed { checked: bool },
}

impl Decision {
    pub fn is_confirmed(self) -> bool {
        matches!(self, Decision::Confirmed { .. })
    }
}

#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &Prompt) -> Decision;
}

/// Answers every prompt with the same decision.
#[derive(Debug, Clone, Copy)]
pub struct FixedDecision(pub Decision);

#[async_trait]
impl Confirm for FixedDecision {
    async fn confirm(&self, _prompt: &Prompt) -> Decision {
        self.0
    }
}
