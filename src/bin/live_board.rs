//! Console board for a running event: lists its pending requests and
//! reloads them whenever the push socket announces a new one.
//!
//! Usage: `live-board <event-id>`

use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use config::Config;
use dotenvy::dotenv;
use tokio_util::sync::CancellationToken;

use djreq_admin::adapters::{AdapterKey, AdapterRegistry, Cell};
use djreq_admin::alerts::{Decision, FixedDecision, LogNotifier, Notifier};
use djreq_admin::domain::types::EventId;
use djreq_admin::engine::{TableEngine, TableFeatures};
use djreq_admin::live::{self, LiveBoard, Reloadable};
use djreq_admin::models::config::ClientConfig;
use djreq_admin::repository::HttpRepository;

/// Reloads the pending-requests table and logs every row.
struct ConsoleBoard(TableEngine);

impl ConsoleBoard {
    fn print(&self) {
        let summary = self.0.summary();
        log::info!("Solicitudes ({})", summary.label());
        if let Some(message) = self.0.empty_message() {
            log::info!("{message}");
        }
        for row in self.0.rows() {
            let cells: Vec<String> = self
                .0
                .render_row(&row)
                .into_iter()
                .filter_map(|cell| match cell {
                    Cell::Text(text) => Some(text),
                    Cell::Chip { label, .. } => Some(label),
                    Cell::Track { title, byline, .. } => Some(format!("{title} ({byline})")),
                    Cell::Mention { text } => Some(text),
                    Cell::Image { alt, .. } => Some(alt.to_string()),
                    Cell::Actions(_) | Cell::Empty => None,
                })
                .collect();
            log::info!("{}", cells.join(" | "));
        }
    }
}

#[async_trait]
impl Reloadable for ConsoleBoard {
    async fn reload(&self) {
        match self.0.reload().await {
            Ok(()) => self.print(),
            Err(e) => log::error!("Failed to reload requests: {e}"),
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let client_config = match settings.try_deserialize::<ClientConfig>() {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            std::process::exit(1);
        }
    };

    let event_id = match env::args().nth(1).map(|arg| arg.parse::<i32>()) {
        Some(Ok(raw)) => match EventId::new(raw) {
            Ok(event_id) => event_id,
            Err(err) => {
                log::error!("Invalid event id: {err}");
                std::process::exit(1);
            }
        },
        _ => {
            log::error!("Usage: live-board <event-id>");
            std::process::exit(1);
        }
    };

    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);

    let repo = match HttpRepository::from_config(&client_config, Arc::clone(&notifier)) {
        Ok(repo) => Arc::new(repo),
        Err(e) => {
            log::error!("Failed to build API client: {e}");
            std::process::exit(1);
        }
    };
    if !repo.session().is_authenticated() {
        log::warn!("No API token configured; requests will be rejected");
    }

    let registry = AdapterRegistry::new(repo);
    let table = match registry.table(
        AdapterKey::MusicRequests.as_str(),
        Arc::new(FixedDecision(Decision::Cancelled)),
        Arc::clone(&notifier),
    ) {
        Ok(table) => table,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    let table = table
        .with_features(TableFeatures {
            play: true,
            only_table: true,
            ..TableFeatures::default()
        })
        .with_page_size(client_config.page_size)
        .with_extra("eventId", event_id)
        .with_extra("is_played", false);

    let board = Arc::new(ConsoleBoard(table));
    match board.0.mount().await {
        Ok(()) => board.print(),
        Err(e) => log::error!("Failed to load requests: {e}"),
    }

    let live_board = Arc::new(LiveBoard::new(notifier));
    live_board.set_context(event_id, board.clone());

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.cancel();
            }
        });
    }

    let result = live::run(
        &client_config.socket_url,
        Arc::clone(&live_board),
        shutdown,
    )
    .await;
    live_board.clear_context();
    board.0.unmount();

    if let Err(e) = result {
        log::error!("Live board stopped: {e}");
        std::process::exit(1);
    }
}
