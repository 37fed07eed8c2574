//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::{DEFAULT_DEBOUNCE_MS, DEFAULT_PAGE_SIZE};

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the REST client, the engines and the live board.
pub struct ClientConfig {
    /// Base URL of the REST API, e.g. `https://api.example.com/api`.
    pub api_url: String,
    /// Push notification socket, e.g. `ws://localhost:3000`.
    pub socket_url: String,
    /// Bearer token of an already signed-in organizer.
    #[serde(default)]
    pub token: Option<String>,
    /// Initial rows per page of every table.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Options fetched per page by the select engines.
    #[serde(default = "default_page_size")]
    pub select_page_size: usize,
    /// Delay applied to select text input before fetching.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Timeout applied to every REST request.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    pub fn select_debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_timeout_secs() -> u64 {
    30
}
