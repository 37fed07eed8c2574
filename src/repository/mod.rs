use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::company::{Company, NewCompany};
use crate::domain::event::{Event, NewEvent};
use crate::domain::event_music::{
    CheckoutSession, CompleteRequest, EventMusic, MarkPaid, NewRequest, Track,
};
use crate::domain::group::{Group, NewGroup};
use crate::domain::package::{NewPackage, Package};
use crate::domain::profile::{ProfileUpdate, UserProfile};
use crate::domain::types::{CompanyId, EventId, GroupId, PackageId};
use crate::dto::api::PageResult;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use http::{HttpRepository, Session};

/// List query sent to every paginated endpoint.
///
/// Only `page` and `limit` are stored; `offset` is always derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    page: usize,
    limit: usize,
    pub search: String,
    /// `None` omits the active filter from the query.
    pub is_active: Option<bool>,
    /// Adapter-specific parameters such as `eventId` or `is_played`.
    pub extra: BTreeMap<String, String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryParams {
    pub fn new() -> Self {
        Self {
            page: 1,
            limit: crate::DEFAULT_PAGE_SIZE,
            search: String::new(),
            is_active: None,
            extra: BTreeMap::new(),
        }
    }

    /// Page and limit are clamped to at least 1.
    pub fn paginate(mut self, page: usize, limit: usize) -> Self {
        self.page = page.max(1);
        self.limit = limit.max(1);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra.insert(key.into(), value.to_string());
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Saturates instead of overflowing on absurd page numbers.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Changing the page size starts over from the first page.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.page = 1;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = Some(is_active);
        self.page = 1;
    }

    /// Query string pairs in the order the API documents them.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("offset".to_string(), self.offset().to_string()),
            ("search".to_string(), self.search.clone()),
        ];
        if let Some(is_active) = self.is_active {
            pairs.push(("is_active".to_string(), is_active.to_string()));
        }
        pairs.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }
}

#[async_trait]
pub trait EventReader: Send + Sync {
    async fn list_events(&self, query: &QueryParams) -> RepositoryResult<PageResult<Event>>;
    /// Requests of one or all events; filter with `eventId` and `is_played`.
    async fn list_requests(&self, query: &QueryParams) -> RepositoryResult<PageResult<EventMusic>>;
    async fn get_event(&self, id: EventId) -> RepositoryResult<Event>;
    /// Event as shown to attendees, with its group and packages.
    async fn get_public_event(&self, id: EventId) -> RepositoryResult<Event>;
    async fn next_folio(&self) -> RepositoryResult<String>;
    /// Whether the organizer behind a public event can take card payments.
    async fn organizer_accepts_cards(&self, user_id: i32) -> RepositoryResult<bool>;
}

#[async_trait]
pub trait EventWriter: Send + Sync {
    async fn create_event(&self, event: &NewEvent) -> RepositoryResult<()>;
    async fn update_event(&self, id: EventId, event: &NewEvent) -> RepositoryResult<()>;
    async fn deactivate_event(&self, id: EventId) -> RepositoryResult<()>;
    async fn reactivate_event(&self, id: EventId) -> RepositoryResult<()>;
    async fn start_event(&self, id: EventId) -> RepositoryResult<()>;
    async fn finish_event(&self, id: EventId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait GroupReader: Send + Sync {
    async fn list_groups(&self, query: &QueryParams) -> RepositoryResult<PageResult<Group>>;
    async fn get_group(&self, id: GroupId) -> RepositoryResult<Group>;
}

#[async_trait]
pub trait GroupWriter: Send + Sync {
    async fn create_group(&self, group: &NewGroup) -> RepositoryResult<()>;
    async fn update_group(&self, id: GroupId, group: &NewGroup) -> RepositoryResult<()>;
    async fn deactivate_group(&self, id: GroupId) -> RepositoryResult<()>;
    async fn reactivate_group(&self, id: GroupId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait PackageReader: Send + Sync {
    async fn list_packages(&self, query: &QueryParams) -> RepositoryResult<PageResult<Package>>;
}

#[async_trait]
pub trait PackageWriter: Send + Sync {
    async fn create_package(&self, package: &NewPackage) -> RepositoryResult<()>;
    async fn update_package(&self, id: PackageId, package: &NewPackage) -> RepositoryResult<()>;
    async fn deactivate_package(&self, id: PackageId) -> RepositoryResult<()>;
    async fn reactivate_package(&self, id: PackageId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait CompanyReader: Send + Sync {
    /// Company data of the signed-in organizer, if any was saved.
    async fn get_company(&self) -> RepositoryResult<Option<Company>>;
}

#[async_trait]
pub trait CompanyWriter: Send + Sync {
    async fn create_company(&self, company: &NewCompany) -> RepositoryResult<()>;
    async fn update_company(&self, id: CompanyId, company: &NewCompany) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ProfileReader: Send + Sync {
    async fn get_profile(&self) -> RepositoryResult<UserProfile>;
}

#[async_trait]
pub trait ProfileWriter: Send + Sync {
    /// Returns the server's confirmation message, if any.
    async fn update_profile(&self, update: &ProfileUpdate) -> RepositoryResult<Option<String>>;
}

#[async_trait]
pub trait EventMusicReader: Send + Sync {
    async fn search_songs(&self, search: &str) -> RepositoryResult<Vec<Track>>;
    /// Request created by a finished checkout session.
    async fn get_by_session(&self, session_id: &str) -> RepositoryResult<EventMusic>;
}

#[async_trait]
pub trait EventMusicWriter: Send + Sync {
    async fn create_session(&self, request: &NewRequest) -> RepositoryResult<CheckoutSession>;
    async fn complete_request(&self, body: &CompleteRequest) -> RepositoryResult<()>;
    async fn mark_paid(&self, body: &MarkPaid) -> RepositoryResult<()>;
}

/// Everything the dashboard reads and writes; implemented by any type that
/// implements every reader and writer.
pub trait DashboardApi:
    EventReader
    + EventWriter
    + GroupReader
    + GroupWriter
    + PackageReader
    + PackageWriter
    + CompanyReader
    + CompanyWriter
    + ProfileReader
    + ProfileWriter
    + EventMusicReader
    + EventMusicWriter
{
}

impl<T> DashboardApi for T where
    T: EventReader
        + EventWriter
        + GroupReader
        + GroupWriter
        + PackageReader
        + PackageWriter
        + CompanyReader
        + CompanyWriter
        + ProfileReader
        + ProfileWriter
        + EventMusicReader
        + EventMusicWriter
{
}
