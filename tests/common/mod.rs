//! In-memory API used by the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use djreq_admin::domain::company::{Company, NewCompany};
use djreq_admin::domain::event::{Event, NewEvent};
use djreq_admin::domain::event_music::{
    CheckoutSession, CompleteRequest, EventMusic, MarkPaid, NewRequest, Track,
};
use djreq_admin::domain::group::{Group, NewGroup};
use djreq_admin::domain::package::{NewPackage, Package};
use djreq_admin::domain::profile::{ProfileUpdate, UserProfile};
use djreq_admin::domain::types::{CompanyId, EventId, GroupId, PackageId};
use djreq_admin::dto::api::PageResult;
use djreq_admin::repository::errors::{RepositoryError, RepositoryResult};
use djreq_admin::repository::{
    CompanyReader, CompanyWriter, EventMusicReader, EventMusicWriter, EventReader, EventWriter,
    GroupReader, GroupWriter, PackageReader, PackageWriter, ProfileReader, ProfileWriter,
    QueryParams,
};

/// Filters by `is_active` and a case-insensitive name search, then slices
/// the requested page.
fn page<T: Clone>(
    rows: &[T],
    query: &QueryParams,
    name: impl Fn(&T) -> &str,
    is_active: impl Fn(&T) -> bool,
) -> PageResult<T> {
    let needle = query.search.to_lowercase();
    let matching: Vec<T> = rows
        .iter()
        .filter(|row| query.is_active.is_none_or(|active| is_active(row) == active))
        .filter(|row| name(row).to_lowercase().contains(&needle))
        .cloned()
        .collect();
    let count = matching.len();
    let results = matching
        .into_iter()
        .skip(query.offset())
        .take(query.limit())
        .collect();
    PageResult {
        results,
        count,
        total_pages: count.div_ceil(query.limit()),
    }
}

#[derive(Default)]
pub struct InMemoryApi {
    pub groups: Mutex<Vec<Group>>,
    pub packages: Mutex<Vec<Package>>,
    pub events: Mutex<Vec<Event>>,
    pub requests: Mutex<Vec<EventMusic>>,
    pub company: Mutex<Option<Company>>,
    pub list_calls: AtomicUsize,
    pub write_calls: AtomicUsize,
}

impl InMemoryApi {
    pub fn with_groups(count: usize) -> Self {
        let api = Self::default();
        for n in 1..=count {
            api.groups.lock().push(Group {
                id: GroupId::new(n as i32).unwrap(),
                name: format!("Grupo {n:02}"),
                packages: Vec::new(),
                is_active: true,
            });
        }
        api
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    fn listed(&self) {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn wrote(&self) {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn set_group_active(&self, id: GroupId, active: bool) -> RepositoryResult<()> {
        self.wrote();
        let mut groups = self.groups.lock();
        let group = groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(RepositoryError::NotFound)?;
        group.is_active = active;
        Ok(())
    }

    fn set_package_active(&self, id: PackageId, active: bool) -> RepositoryResult<()> {
        self.wrote();
        let mut packages = self.packages.lock();
        let package = packages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        package.is_active = active;
        Ok(())
    }
}

#[async_trait]
impl GroupReader for InMemoryApi {
    async fn list_groups(&self, query: &QueryParams) -> RepositoryResult<PageResult<Group>> {
        self.listed();
        Ok(page(&self.groups.lock(), query, |g| &g.name, |g| g.is_active))
    }

    async fn get_group(&self, id: GroupId) -> RepositoryResult<Group> {
        self.groups
            .lock()
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl GroupWriter for InMemoryApi {
    async fn create_group(&self, group: &NewGroup) -> RepositoryResult<()> {
        self.wrote();
        let packages = self.packages.lock().clone();
        let mut groups = self.groups.lock();
        let id = GroupId::new(groups.len() as i32 + 1)?;
        groups.push(Group {
            id,
            name: group.name.as_str().to_string(),
            packages: packages
                .into_iter()
                .filter(|p| group.package_ids.contains(&p.id))
                .collect(),
            is_active: true,
        });
        Ok(())
    }

    async fn update_group(&self, id: GroupId, group: &NewGroup) -> RepositoryResult<()> {
        self.wrote();
        let mut groups = self.groups.lock();
        let existing = groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(RepositoryError::NotFound)?;
        existing.name = group.name.as_str().to_string();
        Ok(())
    }

    async fn deactivate_group(&self, id: GroupId) -> RepositoryResult<()> {
        self.set_group_active(id, false)
    }

    async fn reactivate_group(&self, id: GroupId) -> RepositoryResult<()> {
        self.set_group_active(id, true)
    }
}

#[async_trait]
impl PackageReader for InMemoryApi {
    async fn list_packages(&self, query: &QueryParams) -> RepositoryResult<PageResult<Package>> {
        self.listed();
        Ok(page(
            &self.packages.lock(),
            query,
            |p| &p.name,
            |p| p.is_active,
        ))
    }
}

#[async_trait]
impl PackageWriter for InMemoryApi {
    async fn create_package(&self, package: &NewPackage) -> RepositoryResult<()> {
        self.wrote();
        let mut packages = self.packages.lock();
        let id = PackageId::new(packages.len() as i32 + 1)?;
        packages.push(Package {
            id,
            name: package.name.as_str().to_string(),
            kind: package.kind,
            tip: package.tip.map(|tip| tip.amount()),
            is_optional_tip: package.is_optional_tip,
            is_active: true,
        });
        Ok(())
    }

    async fn update_package(&self, id: PackageId, package: &NewPackage) -> RepositoryResult<()> {
        self.wrote();
        let mut packages = self.packages.lock();
        let existing = packages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        existing.name = package.name.as_str().to_string();
        existing.kind = package.kind;
        existing.tip = package.tip.map(|tip| tip.amount());
        existing.is_optional_tip = package.is_optional_tip;
        Ok(())
    }

    async fn deactivate_package(&self, id: PackageId) -> RepositoryResult<()> {
        self.set_package_active(id, false)
    }

    async fn reactivate_package(&self, id: PackageId) -> RepositoryResult<()> {
        self.set_package_active(id, true)
    }
}

#[async_trait]
impl EventReader for InMemoryApi {
    async fn list_events(&self, query: &QueryParams) -> RepositoryResult<PageResult<Event>> {
        self.listed();
        Ok(page(&self.events.lock(), query, |e| &e.name, |e| e.is_active))
    }

    async fn list_requests(&self, query: &QueryParams) -> RepositoryResult<PageResult<EventMusic>> {
        self.listed();
        let played = query.extra.get("is_played").map(|v| v == "true");
        let rows: Vec<EventMusic> = self
            .requests
            .lock()
            .iter()
            .filter(|r| played.is_none_or(|played| r.is_played == played))
            .cloned()
            .collect();
        Ok(page(&rows, query, |r| r.applicant_label(), |r| r.is_active))
    }

    async fn get_event(&self, id: EventId) -> RepositoryResult<Event> {
        self.events
            .lock()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_public_event(&self, id: EventId) -> RepositoryResult<Event> {
        self.get_event(id).await
    }

    async fn next_folio(&self) -> RepositoryResult<String> {
        Ok(format!("EV-{:04}", self.events.lock().len() + 1))
    }

    async fn organizer_accepts_cards(&self, _user_id: i32) -> RepositoryResult<bool> {
        Ok(false)
    }
}

#[async_trait]
impl EventWriter for InMemoryApi {
    async fn create_event(&self, _event: &NewEvent) -> RepositoryResult<()> {
        Err(RepositoryError::Unsupported("create_event"))
    }

    async fn update_event(&self, _id: EventId, _event: &NewEvent) -> RepositoryResult<()> {
        Err(RepositoryError::Unsupported("update_event"))
    }

    async fn deactivate_event(&self, _id: EventId) -> RepositoryResult<()> {
        Err(RepositoryError::Unsupported("deactivate_event"))
    }

    async fn reactivate_event(&self, _id: EventId) -> RepositoryResult<()> {
        Err(RepositoryError::Unsupported("reactivate_event"))
    }

    async fn start_event(&self, _id: EventId) -> RepositoryResult<()> {
        Err(RepositoryError::Unsupported("start_event"))
    }

    async fn finish_event(&self, _id: EventId) -> RepositoryResult<()> {
        Err(RepositoryError::Unsupported("finish_event"))
    }
}

#[async_trait]
impl CompanyReader for InMemoryApi {
    async fn get_company(&self) -> RepositoryResult<Option<Company>> {
        Ok(self.company.lock().clone())
    }
}

#[async_trait]
impl CompanyWriter for InMemoryApi {
    async fn create_company(&self, company: &NewCompany) -> RepositoryResult<()> {
        self.wrote();
        *self.company.lock() = Some(Company {
            id: CompanyId::new(1)?,
            name: company.name.as_str().to_string(),
            phone: Some(company.phone.as_str().to_string()),
            email: Some(company.email.as_str().to_string()),
            logo: company.logo.clone(),
        });
        Ok(())
    }

    async fn update_company(&self, id: CompanyId, company: &NewCompany) -> RepositoryResult<()> {
        self.wrote();
        *self.company.lock() = Some(Company {
            id,
            name: company.name.as_str().to_string(),
            phone: Some(company.phone.as_str().to_string()),
            email: Some(company.email.as_str().to_string()),
            logo: company.logo.clone(),
        });
        Ok(())
    }
}

#[async_trait]
impl ProfileReader for InMemoryApi {
    async fn get_profile(&self) -> RepositoryResult<UserProfile> {
        Err(RepositoryError::Unsupported("get_profile"))
    }
}

#[async_trait]
impl ProfileWriter for InMemoryApi {
    async fn update_profile(&self, _update: &ProfileUpdate) -> RepositoryResult<Option<String>> {
        Err(RepositoryError::Unsupported("update_profile"))
    }
}

#[async_trait]
impl EventMusicReader for InMemoryApi {
    async fn search_songs(&self, _search: &str) -> RepositoryResult<Vec<Track>> {
        Ok(Vec::new())
    }

    async fn get_by_session(&self, _session_id: &str) -> RepositoryResult<EventMusic> {
        Err(RepositoryError::NotFound)
    }
}

#[async_trait]
impl EventMusicWriter for InMemoryApi {
    async fn create_session(&self, _request: &NewRequest) -> RepositoryResult<CheckoutSession> {
        Ok(CheckoutSession::default())
    }

    async fn complete_request(&self, body: &CompleteRequest) -> RepositoryResult<()> {
        self.wrote();
        let mut requests = self.requests.lock();
        let request = requests
            .iter_mut()
            .find(|r| r.id == body.event_music_id)
            .ok_or(RepositoryError::NotFound)?;
        request.is_played = true;
        if let Some(is_paid) = body.is_paid {
            request.is_paid = is_paid;
        }
        Ok(())
    }

    async fn mark_paid(&self, body: &MarkPaid) -> RepositoryResult<()> {
        self.wrote();
        let mut requests = self.requests.lock();
        let request = requests
            .iter_mut()
            .find(|r| r.id == body.event_music_id)
            .ok_or(RepositoryError::NotFound)?;
        request.is_paid = true;
        Ok(())
    }
}
