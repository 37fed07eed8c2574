//! Single-value async select.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::engine::options::{OptionEntry, OptionList, OptionSource, SelectItem};
use crate::models::config::ClientConfig;
use crate::repository::errors::RepositoryResult;
use crate::{DEFAULT_DEBOUNCE_MS, DEFAULT_PAGE_SIZE};

/// Value held by the bound form field.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Bound<T: SelectItem> {
    #[default]
    Empty,
    /// Only the identifier is known; resolved against loaded options.
    Id(T::Id),
    /// Full record, e.g. from a pre-filled edit form.
    Item(T),
}

pub struct AsyncSelect<T: SelectItem, S: ?Sized> {
    options: OptionList<T, S>,
    value: Arc<Mutex<Bound<T>>>,
    debounce: Duration,
}

impl<T: SelectItem, S: ?Sized> Clone for AsyncSelect<T, S> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            value: Arc::clone(&self.value),
            debounce: self.debounce,
        }
    }
}

impl<T, S> AsyncSelect<T, S>
where
    T: SelectItem,
    S: OptionSource<T> + ?Sized,
{
    pub fn new(source: Arc<S>) -> Self {
        Self {
            options: OptionList::new(source, DEFAULT_PAGE_SIZE),
            value: Arc::new(Mutex::new(Bound::Empty)),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }

    /// Page size and input debounce taken from the runtime configuration.
    pub fn from_config(source: Arc<S>, config: &ClientConfig) -> Self {
        Self::new(source)
            .with_page_size(config.select_page_size)
            .with_debounce(config.select_debounce())
    }

    /// Must be called before the first fetch.
    pub fn with_page_size(self, limit: usize) -> Self {
        let source = self.options.source();
        Self {
            options: OptionList::new(source, limit),
            ..self
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn options(&self) -> &OptionList<T, S> {
        &self.options
    }

    pub fn entries(&self) -> Vec<OptionEntry<T>> {
        self.options.entries()
    }

    pub fn is_loading(&self) -> bool {
        self.options.is_loading()
    }

    /// Opening the control restarts from page 1.
    pub async fn open(&self) -> RepositoryResult<()> {
        self.options.open().await
    }

    /// Text typed in the input; fetched after the debounce delay.
    pub async fn input(&self, text: impl Into<String>) -> RepositoryResult<()> {
        self.options.search_debounced(text, self.debounce).await
    }

    /// Handles a click on an entry. Returns the committed record, or `None`
    /// when the entry was the load-more marker.
    pub async fn choose(&self, entry: &OptionEntry<T>) -> RepositoryResult<Option<T>> {
        match entry {
            OptionEntry::LoadMore => {
                self.options.load_more().await?;
                Ok(None)
            }
            OptionEntry::Item(option) => {
                *self.value.lock() = Bound::Item(option.item.clone());
                self.options.clear_search();
                Ok(Some(option.item.clone()))
            }
        }
    }

    pub fn set_value(&self, value: Bound<T>) {
        *self.value.lock() = value;
    }

    pub fn clear(&self) {
        *self.value.lock() = Bound::Empty;
    }

    /// Record to display. A bound record wins even if it is not among the
    /// loaded options; a bare id is looked up in them.
    pub fn value(&self) -> Option<T> {
        let bound = self.value.lock().clone();
        match bound {
            Bound::Empty => None,
            Bound::Item(item) => Some(item),
            Bound::Id(id) => self.options.find(id),
        }
    }

    pub fn value_id(&self) -> Option<T::Id> {
        match &*self.value.lock() {
            Bound::Empty => None,
            Bound::Id(id) => Some(*id),
            Bound::Item(item) => Some(item.id()),
        }
    }

    /// Refetches page 1 from scratch, e.g. after a related record was
    /// created elsewhere.
    pub async fn reload(&self) -> RepositoryResult<()> {
        self.options.reload().await
    }
}
