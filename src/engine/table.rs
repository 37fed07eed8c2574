//! Generic server-paginated table driven by a [`TableAdapter`].
//!
//! The engine owns its query parameters, the rows of the last fetch and the
//! client-side sort. It never branches on the entity behind the adapter:
//! columns, fetches, mutations and row-level action predicates all come from
//! the adapter, while per-instance feature flags switch whole actions off.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;

use crate::ROWS_PER_PAGE_OPTIONS;
use crate::adapters::{
    ACTIONS_COLUMN, Action, AdapterKey, AdapterRegistry, Align, Cell, Mutation, Record,
    RegistryError, TableAdapter,
};
use crate::alerts::{Confirm, Decision, Notice, Notifier, Prompt};
use crate::engine::gate::RequestGate;
use crate::engine::sort::{SortDirection, SortState, sort_rows};
use crate::live::Reloadable;
use crate::pagination::PageSummary;
use crate::repository::QueryParams;
use crate::repository::errors::RepositoryError;

pub const EMPTY_MESSAGE: &str = "No se encontraron resultados";
pub const SEARCH_PLACEHOLDER: &str = "Buscar...";
pub const ACTIVE_FILTER_LABEL: &str = "Activos";
pub const INACTIVE_FILTER_LABEL: &str = "Inactivos";
pub const REFRESH_LABEL: &str = "Refrescar";
pub const ROWS_PER_PAGE_LABEL: &str = "Elementos por página";

const DELETE_PROMPT: &str = "¿Seguro que deseas eliminar este elemento?";
const REACTIVATE_PROMPT: &str = "¿Seguro que deseas reactivar este elemento?";
const PLAY_PROMPT: &str = "¿Seguro que deseas completar esta solicitud?";
const PLAY_CHECKBOX: &str = "Marcar como pagada";
const MARK_PAID_PROMPT: &str = "¿Deseas marcar esta solicitud como pagada? esta acción es irreversible";

const DELETED_NOTICE: &str = "Elemento eliminado con éxito";
const REACTIVATED_NOTICE: &str = "Elemento activado con éxito";
const COMPLETED_NOTICE: &str = "Solicitud completada con éxito";
const PAID_NOTICE: &str = "Solicitud actualizada con éxito";

#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("Action {0:?} is not available for this row")]
    ActionNotAllowed(Action),
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    #[error("Column {0} is not sortable")]
    NotSortable(&'static str),
    #[error("Unsupported rows per page: {0}")]
    InvalidRowsPerPage(usize),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Per-instance switches for row actions and chrome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableFeatures {
    pub edit: bool,
    pub delete: bool,
    pub reactivate: bool,
    pub qr: bool,
    pub dashboard: bool,
    pub play: bool,
    pub view: bool,
    pub mark_paid: bool,
    /// Draws the actions column.
    pub has_actions: bool,
    /// Hides the search box, the filters and the refresh button.
    pub only_table: bool,
}

impl Default for TableFeatures {
    fn default() -> Self {
        Self {
            edit: false,
            delete: false,
            reactivate: true,
            qr: false,
            dashboard: false,
            play: false,
            view: false,
            mark_paid: true,
            has_actions: true,
            only_table: false,
        }
    }
}

impl TableFeatures {
    pub fn enables(&self, action: Action) -> bool {
        match action {
            Action::Edit => self.edit,
            Action::View => self.view,
            Action::Delete => self.delete,
            Action::Reactivate => self.reactivate,
            Action::Qr => self.qr,
            Action::Dashboard => self.dashboard,
            Action::Play => self.play,
            Action::MarkPaid => self.mark_paid,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableStatus {
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

/// Navigation hooks for actions the table hands back to its host.
pub trait RowCallbacks: Send + Sync {
    fn on_edit(&self, _record: &Record) {}
    fn on_view(&self, _record: &Record) {}
    fn on_qr(&self, _record: &Record) {}
    fn on_dashboard(&self, _record: &Record) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoCallbacks;

impl RowCallbacks for NoCallbacks {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Handed to a [`RowCallbacks`] hook.
    Forwarded,
    /// The confirmation was dismissed; nothing was sent.
    Cancelled,
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnHeader {
    pub key: &'static str,
    pub label: &'static str,
    pub align: Align,
    pub sortable: bool,
    pub sorted: Option<SortDirection>,
}

#[derive(Debug)]
struct TableState {
    query: QueryParams,
    search_input: String,
    rows: Vec<Record>,
    count: usize,
    total_pages: usize,
    status: TableStatus,
    sort: Option<SortState>,
    gate: RequestGate,
}

#[derive(Clone)]
pub struct TableEngine {
    adapter: Arc<dyn TableAdapter>,
    features: TableFeatures,
    confirm: Arc<dyn Confirm>,
    notifier: Arc<dyn Notifier>,
    callbacks: Arc<dyn RowCallbacks>,
    state: Arc<Mutex<TableState>>,
}

impl TableEngine {
    pub fn new(
        adapter: Arc<dyn TableAdapter>,
        confirm: Arc<dyn Confirm>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            adapter,
            features: TableFeatures::default(),
            confirm,
            notifier,
            callbacks: Arc::new(NoCallbacks),
            state: Arc::new(Mutex::new(TableState {
                query: QueryParams::new().active(true),
                search_input: String::new(),
                rows: Vec::new(),
                count: 0,
                total_pages: 0,
                status: TableStatus::Idle,
                sort: None,
                gate: RequestGate::default(),
            })),
        }
    }

    /// Adds an adapter-specific query parameter sent with every fetch.
    pub fn with_extra(self, key: impl Into<String>, value: impl ToString) -> Self {
        {
            let mut state = self.state.lock();
            state.query.extra.insert(key.into(), value.to_string());
        }
        self
    }

    pub fn with_features(mut self, features: TableFeatures) -> Self {
        self.features = features;
        self
    }

    pub fn with_callbacks(mut self, callbacks: Arc<dyn RowCallbacks>) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn with_page_size(self, limit: usize) -> Self {
        self.state.lock().query.set_limit(limit);
        self
    }

    pub fn key(&self) -> AdapterKey {
        self.adapter.key()
    }

    pub fn features(&self) -> TableFeatures {
        self.features
    }

    pub fn show_toolbar(&self) -> bool {
        !self.features.only_table
    }

    /// Starts from page 1, no search and the active filter, then fetches.
    /// Extra parameters and the page size survive.
    pub async fn mount(&self) -> Result<(), TableError> {
        {
            let mut state = self.state.lock();
            state.search_input.clear();
            state.query.set_search("");
            state.query.set_active(true);
        }
        self.fetch().await
    }

    /// Cancels the in-flight fetch, if any. Its response is never applied.
    pub fn unmount(&self) {
        let mut state = self.state.lock();
        if state.gate.is_busy() {
            log::debug!("Cancelling in-flight {} fetch", self.adapter.key());
            state.gate.cancel();
            state.status = TableStatus::Idle;
        }
    }

    /// Refetches with the current parameters.
    pub async fn reload(&self) -> Result<(), TableError> {
        self.fetch().await
    }

    pub async fn refresh(&self) -> Result<(), TableError> {
        self.fetch().await
    }

    /// Records search box text; nothing is fetched until submit.
    pub fn set_search_input(&self, text: impl Into<String>) {
        self.state.lock().search_input = text.into();
    }

    pub fn search_input(&self) -> String {
        self.state.lock().search_input.clone()
    }

    pub async fn submit_search(&self) -> Result<(), TableError> {
        {
            let mut state = self.state.lock();
            let text = state.search_input.clone();
            state.query.set_search(text);
        }
        self.fetch().await
    }

    pub async fn clear_search(&self) -> Result<(), TableError> {
        {
            let mut state = self.state.lock();
            state.search_input.clear();
            state.query.set_search("");
        }
        self.fetch().await
    }

    pub async fn set_page(&self, page: usize) -> Result<(), TableError> {
        self.state.lock().query.set_page(page);
        self.fetch().await
    }

    pub async fn set_rows_per_page(&self, limit: usize) -> Result<(), TableError> {
        if !ROWS_PER_PAGE_OPTIONS.contains(&limit) {
            return Err(TableError::InvalidRowsPerPage(limit));
        }
        self.state.lock().query.set_limit(limit);
        self.fetch().await
    }

    /// `true` shows "Activos", `false` shows "Inactivos".
    pub async fn set_active_filter(&self, is_active: bool) -> Result<(), TableError> {
        self.state.lock().query.set_active(is_active);
        self.fetch().await
    }

    /// Cycles the column through ascending and descending order, client-side.
    pub fn toggle_sort(&self, key: &str) -> Result<SortState, TableError> {
        let column = self
            .adapter
            .columns()
            .iter()
            .find(|column| column.key == key)
            .ok_or_else(|| TableError::UnknownColumn(key.to_string()))?;
        if !column.is_sortable() {
            return Err(TableError::NotSortable(column.key));
        }
        let mut state = self.state.lock();
        let next = SortState::toggle(state.sort, column.key);
        state.sort = Some(next);
        Ok(next)
    }

    pub fn sort(&self) -> Option<SortState> {
        self.state.lock().sort
    }

    /// Rows of the current page in display order.
    pub fn rows(&self) -> Vec<Record> {
        let (mut rows, sort) = {
            let state = self.state.lock();
            (state.rows.clone(), state.sort)
        };
        let Some(sort) = sort else {
            return rows;
        };
        let key = self
            .adapter
            .columns()
            .iter()
            .find(|column| column.key == sort.key)
            .and_then(|column| column.sort);
        if let Some(key) = key {
            sort_rows(&mut rows, sort.direction, key);
        }
        rows
    }

    pub fn columns(&self) -> Vec<ColumnHeader> {
        let sort = self.sort();
        let mut headers: Vec<ColumnHeader> = self
            .adapter
            .columns()
            .iter()
            .map(|column| ColumnHeader {
                key: column.key,
                label: column.label,
                align: column.align,
                sortable: column.is_sortable(),
                sorted: sort
                    .filter(|state| state.key == column.key)
                    .map(|state| state.direction),
            })
            .collect();
        if self.features.has_actions {
            headers.push(ColumnHeader {
                key: ACTIONS_COLUMN.0,
                label: ACTIONS_COLUMN.1,
                align: Align::Center,
                sortable: false,
                sorted: None,
            });
        }
        headers
    }

    pub fn render_row(&self, record: &Record) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .adapter
            .columns()
            .iter()
            .map(|column| (column.render)(record))
            .collect();
        if self.features.has_actions {
            cells.push(Cell::Actions(self.row_actions(record)));
        }
        cells
    }

    /// Actions drawn in the row's actions column.
    pub fn row_actions(&self, record: &Record) -> Vec<Action> {
        if !self.features.has_actions {
            return Vec::new();
        }
        self.adapter
            .action_rules()
            .iter()
            .filter(|rule| self.features.enables(rule.action) && (rule.applies)(record))
            .map(|rule| rule.action)
            .collect()
    }

    /// Marking a request paid is also reachable from its status chip, so it
    /// does not depend on the actions column.
    fn permits(&self, action: Action, record: &Record) -> bool {
        if !self.features.has_actions && action != Action::MarkPaid {
            return false;
        }
        self.features.enables(action) && self.adapter.allows(action, record)
    }

    pub async fn perform(&self, action: Action, record: &Record) -> Result<ActionOutcome, TableError> {
        if !self.permits(action, record) {
            return Err(TableError::ActionNotAllowed(action));
        }

        match action {
            Action::Edit => {
                self.callbacks.on_edit(record);
                Ok(ActionOutcome::Forwarded)
            }
            Action::View => {
                self.callbacks.on_view(record);
                Ok(ActionOutcome::Forwarded)
            }
            Action::Qr => {
                self.callbacks.on_qr(record);
                Ok(ActionOutcome::Forwarded)
            }
            Action::Dashboard => {
                self.callbacks.on_dashboard(record);
                Ok(ActionOutcome::Forwarded)
            }
            Action::Delete => {
                if !self.ask(Prompt::new(DELETE_PROMPT)).await.is_confirmed() {
                    return Ok(ActionOutcome::Cancelled);
                }
                self.mutate(record, Mutation::Deactivate).await?;
                self.notifier.notify(Notice::success(DELETED_NOTICE));
                self.fetch().await?;
                Ok(ActionOutcome::Done)
            }
            Action::Reactivate => {
                if !self.ask(Prompt::new(REACTIVATE_PROMPT)).await.is_confirmed() {
                    return Ok(ActionOutcome::Cancelled);
                }
                self.mutate(record, Mutation::Reactivate).await?;
                self.notifier.notify(Notice::success(REACTIVATED_NOTICE));
                self.set_active_filter(true).await?;
                Ok(ActionOutcome::Done)
            }
            Action::Play => {
                let is_paid = record.as_request().is_none_or(|request| request.is_paid);
                let prompt = if is_paid {
                    Prompt::new(PLAY_PROMPT)
                } else {
                    Prompt::new(PLAY_PROMPT).with_checkbox(PLAY_CHECKBOX)
                };
                let Decision::Confirmed { checked } = self.ask(prompt).await else {
                    return Ok(ActionOutcome::Cancelled);
                };
                let mark_paid = (!is_paid).then_some(checked);
                self.mutate(record, Mutation::Complete { mark_paid }).await?;
                self.notifier.notify(Notice::success(COMPLETED_NOTICE));
                self.fetch().await?;
                Ok(ActionOutcome::Done)
            }
            Action::MarkPaid => {
                if !self.ask(Prompt::new(MARK_PAID_PROMPT)).await.is_confirmed() {
                    return Ok(ActionOutcome::Cancelled);
                }
                self.mutate(record, Mutation::MarkPaid).await?;
                self.notifier.notify(Notice::success(PAID_NOTICE));
                self.fetch().await?;
                Ok(ActionOutcome::Done)
            }
        }
    }

    pub fn status(&self) -> TableStatus {
        self.state.lock().status.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().status == TableStatus::Loading
    }

    /// Server-side row count of the last successful fetch.
    pub fn count(&self) -> usize {
        self.state.lock().count
    }

    pub fn total_pages(&self) -> usize {
        self.state.lock().total_pages
    }

    pub fn query(&self) -> QueryParams {
        self.state.lock().query.clone()
    }

    pub fn summary(&self) -> PageSummary {
        let state = self.state.lock();
        PageSummary::new(
            state.query.page(),
            state.query.limit(),
            state.count,
            state.total_pages,
        )
    }

    /// Shown in place of the rows when the last fetch returned nothing.
    pub fn empty_message(&self) -> Option<&'static str> {
        let state = self.state.lock();
        (state.rows.is_empty() && state.status != TableStatus::Loading).then_some(EMPTY_MESSAGE)
    }

    async fn ask(&self, prompt: Prompt) -> Decision {
        self.confirm.confirm(&prompt).await
    }

    async fn mutate(&self, record: &Record, mutation: Mutation) -> Result<(), TableError> {
        self.adapter
            .mutate(record, mutation)
            .await
            .inspect_err(|e| {
                log::error!(
                    "Failed to apply {mutation:?} to {} row {}: {e}",
                    self.adapter.key(),
                    record.id()
                )
            })
            .map_err(TableError::from)
    }

    async fn fetch(&self) -> Result<(), TableError> {
        let (query, ticket) = {
            let mut state = self.state.lock();
            state.status = TableStatus::Loading;
            (state.query.clone(), state.gate.issue())
        };
        let key = self.adapter.key();

        let Some(result) = ticket.run(self.adapter.fetch(&query)).await else {
            log::debug!("{key} fetch for page {} superseded", query.page());
            return Ok(());
        };

        let mut state = self.state.lock();
        if !state.gate.settle(&ticket) {
            log::debug!("Dropping stale {key} page {}", query.page());
            return Ok(());
        }

        match result {
            Ok(page) => {
                state.rows = page.results;
                state.count = page.count;
                state.total_pages = page.total_pages;
                state.sort = None;
                state.status = TableStatus::Loaded;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load {key} page {}: {e}", query.page());
                state.status = TableStatus::Errored(e.to_string());
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl Reloadable for TableEngine {
    async fn reload(&self) {
        if let Err(e) = TableEngine::reload(self).await {
            log::warn!("Live reload of {} failed: {e}", self.key());
        }
    }
}

impl AdapterRegistry {
    /// Builds a table over the adapter registered under `name`.
    pub fn table(
        &self,
        name: &str,
        confirm: Arc<dyn Confirm>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<TableEngine, TableError> {
        let adapter = self.get_by_name(name)?;
        Ok(TableEngine::new(adapter, confirm, notifier))
    }
}
