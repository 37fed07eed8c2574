//! Bounded multi-value async select with chips.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::alerts::{Notice, Notifier};
use crate::engine::options::{OptionEntry, OptionList, OptionSource, SelectItem};
use crate::models::config::ClientConfig;
use crate::repository::errors::RepositoryResult;
use crate::{DEFAULT_DEBOUNCE_MS, DEFAULT_PAGE_SIZE};

type ChipLabel<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Result of clicking an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Added,
    Removed,
    /// The cap was reached; the selection is unchanged.
    Rejected,
    /// Already selected and re-selection is disabled.
    Unchanged,
    LoadedMore,
}

/// A selected record as drawn in the input.
#[derive(Clone, Debug, PartialEq)]
pub struct Chip<Id> {
    pub id: Id,
    pub label: String,
}

pub struct AsyncMultiSelect<T: SelectItem, S: ?Sized> {
    options: OptionList<T, S>,
    selected: Arc<Mutex<Vec<T>>>,
    notifier: Arc<dyn Notifier>,
    max_selections: Option<usize>,
    chip_label: Option<ChipLabel<T>>,
    disable_selected: bool,
    debounce: Duration,
}

impl<T: SelectItem, S: ?Sized> Clone for AsyncMultiSelect<T, S> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            selected: Arc::clone(&self.selected),
            notifier: Arc::clone(&self.notifier),
            max_selections: self.max_selections,
            chip_label: self.chip_label.clone(),
            disable_selected: self.disable_selected,
            debounce: self.debounce,
        }
    }
}

impl<T, S> AsyncMultiSelect<T, S>
where
    T: SelectItem,
    S: OptionSource<T> + ?Sized,
{
    pub fn new(source: Arc<S>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            options: OptionList::new(source, DEFAULT_PAGE_SIZE),
            selected: Arc::new(Mutex::new(Vec::new())),
            notifier,
            max_selections: None,
            chip_label: None,
            disable_selected: false,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }

    /// Page size and input debounce taken from the runtime configuration.
    pub fn from_config(
        source: Arc<S>,
        notifier: Arc<dyn Notifier>,
        config: &ClientConfig,
    ) -> Self {
        let mut select = Self::new(Arc::clone(&source), notifier);
        select.options = OptionList::new(source, config.select_page_size);
        select.debounce = config.select_debounce();
        select
    }

    pub fn with_max_selections(mut self, max: usize) -> Self {
        self.max_selections = Some(max);
        self
    }

    pub fn with_chip_label(mut self, label: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.chip_label = Some(Arc::new(label));
        self
    }

    /// Choosing an already selected entry keeps it instead of removing it.
    pub fn with_disable_selected(mut self, disable: bool) -> Self {
        self.disable_selected = disable;
        self
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

    pub async fn open(&self) -> RepositoryResult<()> {
        self.options.open().await
    }

    pub async fn input(&self, text: impl Into<String>) -> RepositoryResult<()> {
        self.options.search_debounced(text, self.debounce).await
    }

    pub fn selected(&self) -> Vec<T> {
        self.selected.lock().clone()
    }

    pub fn selected_ids(&self) -> Vec<T::Id> {
        self.selected.lock().iter().map(SelectItem::id).collect()
    }

    pub fn is_selected(&self, id: T::Id) -> bool {
        self.selected.lock().iter().any(|item| item.id() == id)
    }

    /// Pre-fills the selection, e.g. from an edit form. Items past the cap
    /// are dropped.
    pub fn set_selected(&self, items: Vec<T>) {
        let mut items = items;
        if let Some(max) = self.max_selections {
            items.truncate(max);
        }
        *self.selected.lock() = items;
    }

    pub fn remove(&self, id: T::Id) -> bool {
        let mut selected = self.selected.lock();
        let before = selected.len();
        selected.retain(|item| item.id() != id);
        selected.len() != before
    }

    pub fn chips(&self) -> Vec<Chip<T::Id>> {
        self.selected
            .lock()
            .iter()
            .map(|item| Chip {
                id: item.id(),
                label: self.chip_label_of(item),
            })
            .collect()
    }

    fn chip_label_of(&self, item: &T) -> String {
        match &self.chip_label {
            Some(label) => label(item),
            None => item.label(),
        }
    }

    /// Handles a click on an entry. Selection is matched by id, so a record
    /// fetched again on a later page still counts as selected.
    pub async fn choose(&self, entry: &OptionEntry<T>) -> RepositoryResult<Choice> {
        let option = match entry {
            OptionEntry::LoadMore => {
                self.options.load_more().await?;
                return Ok(Choice::LoadedMore);
            }
            OptionEntry::Item(option) => option,
        };

        {
            let mut selected = self.selected.lock();
            if let Some(index) = selected.iter().position(|item| item.id() == option.value) {
                if self.disable_selected {
                    return Ok(Choice::Unchanged);
                }
                selected.remove(index);
                return Ok(Choice::Removed);
            }

            if let Some(max) = self.max_selections
                && selected.len() >= max
            {
                log::debug!("Selection cap of {max} reached");
                self.notifier.notify(Notice::info(format!(
                    "Solo se pueden agregar un máximo de {max} elementos"
                )));
                return Ok(Choice::Rejected);
            }

            selected.push(option.item.clone());
        }

        // The input is emptied after each addition. The selection stands even
        // if the refetch fails.
        if self.options.search_text().is_empty() {
            self.options.clear_search();
        } else if let Err(e) = self.options.search("").await {
            log::warn!("Failed to refresh options after a selection: {e}");
        }
        Ok(Choice::Added)
    }

    pub async fn reload(&self) -> RepositoryResult<()> {
        self.options.reload().await
    }
}
