//! Paged option list shared by the single and multi select engines.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::group::Group;
use crate::domain::package::Package;
use crate::domain::types::{GroupId, PackageId};
use crate::dto::api::PageResult;
use crate::engine::gate::RequestGate;
use crate::repository::errors::RepositoryResult;
use crate::repository::{GroupReader, PackageReader, QueryParams};

/// Label of the synthetic "fetch the next page" entry.
pub const LOAD_MORE_LABEL: &str = "Ver más...";

/// A record that can be offered by a select control.
pub trait SelectItem: Clone + Send + Sync + 'static {
    type Id: Copy + PartialEq + Debug + Send + Sync;

    fn id(&self) -> Self::Id;
    fn label(&self) -> String;
}

impl SelectItem for Group {
    type Id = GroupId;

    fn id(&self) -> GroupId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl SelectItem for Package {
    type Id = PackageId;

    fn id(&self) -> PackageId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

/// Paginated search endpoint feeding a select control.
#[async_trait]
pub trait OptionSource<T>: Send + Sync {
    async fn fetch_options(&self, query: &QueryParams) -> RepositoryResult<PageResult<T>>;
}

#[async_trait]
impl<R> OptionSource<Group> for R
where
    R: GroupReader + ?Sized,
{
    async fn fetch_options(&self, query: &QueryParams) -> RepositoryResult<PageResult<Group>> {
        self.list_groups(query).await
    }
}

#[async_trait]
impl<R> OptionSource<Package> for R
where
    R: PackageReader + ?Sized,
{
    async fn fetch_options(&self, query: &QueryParams) -> RepositoryResult<PageResult<Package>> {
        self.list_packages(query).await
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption<T: SelectItem> {
    pub label: String,
    pub value: T::Id,
    pub item: T,
}

/// One row of the option list. `LoadMore` is never a value.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionEntry<T: SelectItem> {
    Item(SelectOption<T>),
    LoadMore,
}

impl<T: SelectItem> OptionEntry<T> {
    pub fn label(&self) -> &str {
        match self {
            OptionEntry::Item(option) => &option.label,
            OptionEntry::LoadMore => LOAD_MORE_LABEL,
        }
    }

    pub fn is_load_more(&self) -> bool {
        matches!(self, OptionEntry::LoadMore)
    }
}

#[derive(Debug)]
struct ListState<T> {
    items: Vec<T>,
    page: usize,
    total_pages: usize,
    search: String,
    loading: bool,
    input_version: u64,
    gate: RequestGate,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_pages: 0,
            search: String::new(),
            loading: false,
            input_version: 0,
            gate: RequestGate::default(),
        }
    }
}

/// Options loaded so far plus the paging cursor.
pub struct OptionList<T, S: ?Sized> {
    source: Arc<S>,
    limit: usize,
    state: Arc<Mutex<ListState<T>>>,
}

impl<T, S: ?Sized> Clone for OptionList<T, S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            limit: self.limit,
            state: Arc::clone(&self.state),
        }
    }
}

impl<T, S> OptionList<T, S>
where
    T: SelectItem,
    S: OptionSource<T> + ?Sized,
{
    pub fn new(source: Arc<S>, limit: usize) -> Self {
        Self {
            source,
            limit: limit.max(1),
            state: Arc::new(Mutex::new(ListState::default())),
        }
    }

    /// Loaded options, followed by the load-more marker while pages remain.
    pub fn entries(&self) -> Vec<OptionEntry<T>> {
        let state = self.state.lock();
        let mut entries: Vec<OptionEntry<T>> = state
            .items
            .iter()
            .map(|item| {
                OptionEntry::Item(SelectOption {
                    label: item.label(),
                    value: item.id(),
                    item: item.clone(),
                })
            })
            .collect();
        if state.page < state.total_pages {
            entries.push(OptionEntry::LoadMore);
        }
        entries
    }

    pub fn items(&self) -> Vec<T> {
        self.state.lock().items.clone()
    }

    pub fn find(&self, id: T::Id) -> Option<T> {
        self.state
            .lock()
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    pub fn page(&self) -> usize {
        self.state.lock().page
    }

    pub fn total_pages(&self) -> usize {
        self.state.lock().total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn search_text(&self) -> String {
        self.state.lock().search.clone()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub(crate) fn source(&self) -> Arc<S> {
        Arc::clone(&self.source)
    }

    /// Fetches the first page for the current search text.
    pub async fn open(&self) -> RepositoryResult<()> {
        self.fetch(1).await
    }

    pub async fn search(&self, text: impl Into<String>) -> RepositoryResult<()> {
        {
            let mut state = self.state.lock();
            state.search = text.into();
            state.input_version += 1;
        }
        self.fetch(1).await
    }

    /// Records the text at once and fetches only if no other input arrives
    /// within `delay`.
    pub async fn search_debounced(
        &self,
        text: impl Into<String>,
        delay: Duration,
    ) -> RepositoryResult<()> {
        let version = {
            let mut state = self.state.lock();
            state.search = text.into();
            state.input_version += 1;
            state.input_version
        };
        tokio::time::sleep(delay).await;
        if self.state.lock().input_version != version {
            return Ok(());
        }
        self.fetch(1).await
    }

    /// Appends the next page; a no-op once every page is loaded.
    pub async fn load_more(&self) -> RepositoryResult<()> {
        let next = {
            let state = self.state.lock();
            if state.page >= state.total_pages {
                return Ok(());
            }
            state.page + 1
        };
        self.fetch(next).await
    }

    /// Forgets search, cursor and options, then fetches page 1.
    pub async fn reload(&self) -> RepositoryResult<()> {
        {
            let mut state = self.state.lock();
            state.search.clear();
            state.items.clear();
            state.page = 1;
            state.total_pages = 0;
            state.input_version += 1;
        }
        self.fetch(1).await
    }

    /// Clears the input text without fetching.
    pub fn clear_search(&self) {
        let mut state = self.state.lock();
        state.search.clear();
        state.input_version += 1;
    }

    async fn fetch(&self, page: usize) -> RepositoryResult<()> {
        let (query, ticket) = {
            let mut state = self.state.lock();
            state.loading = true;
            let query = QueryParams::new()
                .paginate(page, self.limit)
                .search(state.search.clone());
            (query, state.gate.issue())
        };

        let Some(result) = ticket.run(self.source.fetch_options(&query)).await else {
            log::debug!("Option request for page {page} superseded");
            return Ok(());
        };

        let mut state = self.state.lock();
        if !state.gate.settle(&ticket) {
            log::debug!("Dropping stale options for page {page}");
            return Ok(());
        }
        state.loading = false;

        let result = result.inspect_err(|e| log::error!("Failed to load options: {e}"))?;
        if page == 1 {
            state.items = result.results;
        } else {
            state.items.extend(result.results);
        }
        state.page = page;
        state.total_pages = result.total_pages;
        Ok(())
    }
}
