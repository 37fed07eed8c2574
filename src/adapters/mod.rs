//! Entity table adapters: how each manageable entity is fetched, drawn and
//! mutated by the table engine.
//!
//! Adding an entity means adding one adapter and registering it; the table
//! engine never branches on entity names.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::event::Event;
use crate::domain::event_music::EventMusic;
use crate::domain::group::Group;
use crate::domain::package::Package;
use crate::dto::api::PageResult;
use crate::engine::sort::SortValue;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DashboardApi, QueryParams};

pub mod events;
pub mod groups;
pub mod packages;
pub mod requests;

pub use events::EventsAdapter;
pub use groups::GroupsAdapter;
pub use packages::PackagesAdapter;
pub use requests::RequestsAdapter;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unknown table adapter: {0}")]
    UnknownAdapter(String),
}

/// Registry key of each table adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdapterKey {
    Packages,
    Groups,
    Events,
    MusicRequests,
    HistoryLine,
}

impl AdapterKey {
    pub const ALL: [AdapterKey; 5] = [
        AdapterKey::Packages,
        AdapterKey::Groups,
        AdapterKey::Events,
        AdapterKey::MusicRequests,
        AdapterKey::HistoryLine,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AdapterKey::Packages => "packages",
            AdapterKey::Groups => "groups",
            AdapterKey::Events => "events",
            AdapterKey::MusicRequests => "musicRequests",
            AdapterKey::HistoryLine => "historyLine",
        }
    }
}

impl Display for AdapterKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdapterKey {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdapterKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownAdapter(s.to_string()))
    }
}

/// One table row.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    Event(Event),
    Group(Group),
    Package(Package),
    Request(EventMusic),
}

impl Record {
    pub fn id(&self) -> i32 {
        match self {
            Record::Event(event) => event.id.get(),
            Record::Group(group) => group.id.get(),
            Record::Package(package) => package.id.get(),
            Record::Request(request) => request.id.get(),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Record::Event(event) => event.is_active,
            Record::Group(group) => group.is_active,
            Record::Package(package) => package.is_active,
            Record::Request(request) => request.is_active,
        }
    }

    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Record::Event(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_request(&self) -> Option<&EventMusic> {
        match self {
            Record::Request(request) => Some(request),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Warning,
    Error,
}

/// Headless rendering of one cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Chip {
        label: String,
        tone: Tone,
    },
    Image {
        alt: &'static str,
        src: Option<String>,
    },
    /// Song title with artist line and an external link.
    Track {
        cover: Option<String>,
        title: String,
        byline: String,
        link: Option<String>,
    },
    /// Mention text, clamped by the renderer.
    Mention {
        text: String,
    },
    /// Row actions offered in the actions column.
    Actions(Vec<Action>),
    Empty,
}

pub type Render = fn(&Record) -> Cell;

/// Raw value behind a column, as compared by the client-side sort.
pub type SortKey = fn(&Record) -> SortValue;

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub key: &'static str,
    pub label: &'static str,
    pub align: Align,
    pub render: Render,
    /// `None` makes the column unsortable.
    pub sort: Option<SortKey>,
}

impl ColumnDef {
    pub const fn new(key: &'static str, label: &'static str, render: Render) -> Self {
        Self {
            key,
            label,
            align: Align::Center,
            render,
            sort: None,
        }
    }

    pub const fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn is_sortable(&self) -> bool {
        self.sort.is_some()
    }
}

/// Key and label of the column the table engine appends for row actions.
pub const ACTIONS_COLUMN: (&str, &str) = ("actions", "Acciones");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Edit,
    View,
    Delete,
    Reactivate,
    Qr,
    Dashboard,
    Play,
    MarkPaid,
}

impl Action {
    pub fn tooltip(self) -> &'static str {
        match self {
            Action::Edit => "Editar",
            Action::View => "Visualizar",
            Action::Delete => "Eliminar",
            Action::Reactivate => "Reactivar",
            Action::Qr => "Visualizar QR",
            Action::Dashboard => "Ir al tablero",
            Action::Play => "Reproducir",
            Action::MarkPaid => "Marcar como pagada",
        }
    }
}

/// An action an adapter offers, and on which rows.
#[derive(Clone, Copy, Debug)]
pub struct ActionRule {
    pub action: Action,
    pub applies: fn(&Record) -> bool,
}

impl ActionRule {
    pub const fn new(action: Action, applies: fn(&Record) -> bool) -> Self {
        Self { action, applies }
    }
}

pub(crate) fn when_active(record: &Record) -> bool {
    record.is_active()
}

pub(crate) fn when_inactive(record: &Record) -> bool {
    !record.is_active()
}

pub(crate) fn always(_: &Record) -> bool {
    true
}

/// Server-side change a row action triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Deactivate,
    Reactivate,
    /// Marks a request as played; `mark_paid` is forwarded as `isPaid`.
    Complete {
        mark_paid: Option<bool>,
    },
    MarkPaid,
}

#[async_trait]
pub trait TableAdapter: Send + Sync {
    fn key(&self) -> AdapterKey;

    fn columns(&self) -> &'static [ColumnDef];

    fn action_rules(&self) -> &'static [ActionRule];

    async fn fetch(&self, query: &QueryParams) -> RepositoryResult<PageResult<Record>>;

    async fn mutate(&self, record: &Record, mutation: Mutation) -> RepositoryResult<()> {
        let _ = (record, mutation);
        Err(RepositoryError::Unsupported("mutation"))
    }

    /// Whether the adapter offers `action` for this row.
    fn allows(&self, action: Action, record: &Record) -> bool {
        self.action_rules()
            .iter()
            .any(|rule| rule.action == action && (rule.applies)(record))
    }
}

/// Static lookup from adapter key to adapter.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<AdapterKey, Arc<dyn TableAdapter>>,
}

impl AdapterRegistry {
    /// Registers the five built-in adapters over one repository.
    pub fn new<R>(repo: Arc<R>) -> Self
    where
        R: DashboardApi + ?Sized + 'static,
    {
        let mut registry = Self::default();
        registry.register(Arc::new(PackagesAdapter::new(Arc::clone(&repo))));
        registry.register(Arc::new(GroupsAdapter::new(Arc::clone(&repo))));
        registry.register(Arc::new(EventsAdapter::new(Arc::clone(&repo))));
        registry.register(Arc::new(RequestsAdapter::live(Arc::clone(&repo))));
        registry.register(Arc::new(RequestsAdapter::history(repo)));
        registry
    }

    pub fn register(&mut self, adapter: Arc<dyn TableAdapter>) {
        self.adapters.insert(adapter.key(), adapter);
    }

    pub fn get(&self, key: AdapterKey) -> Option<Arc<dyn TableAdapter>> {
        self.adapters.get(&key).cloned()
    }

    pub fn get_by_name(&self, name: &str) -> Result<Arc<dyn TableAdapter>, RegistryError> {
        let key = name.parse::<AdapterKey>()?;
        self.get(key)
            .ok_or_else(|| RegistryError::UnknownAdapter(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_from_their_names() {
        for key in AdapterKey::ALL {
            assert_eq!(key.as_str().parse::<AdapterKey>().unwrap(), key);
        }
        assert!(matches!(
            "sales".parse::<AdapterKey>(),
            Err(RegistryError::UnknownAdapter(name)) if name == "sales"
        ));
    }
}
