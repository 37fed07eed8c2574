use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::{
    Action, ActionRule, AdapterKey, Cell, ColumnDef, Mutation, Record, TableAdapter, Tone,
    when_active, when_inactive,
};
use crate::domain::event::{Event, EventStatus};
use crate::dto::api::PageResult;
use crate::engine::sort::SortValue;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{EventReader, EventWriter, QueryParams};

fn event(record: &Record) -> Option<&Event> {
    record.as_event()
}

fn date(record: &Record) -> Cell {
    event(record).map_or(Cell::Empty, |e| Cell::Text(e.formatted_date()))
}

fn name(record: &Record) -> Cell {
    event(record).map_or(Cell::Empty, |e| Cell::Text(e.name.clone()))
}

fn status(record: &Record) -> Cell {
    event(record).map_or(Cell::Empty, |e| Cell::Chip {
        label: e.status.label().to_string(),
        tone: match e.status {
            EventStatus::Active => Tone::Success,
            EventStatus::NotStarted => Tone::Info,
            EventStatus::Finished => Tone::Error,
        },
    })
}

/// Events can be edited until they start.
fn editable(record: &Record) -> bool {
    event(record).is_some_and(|e| e.is_active && e.status == EventStatus::NotStarted)
}

/// Started or finished events are read-only.
fn read_only(record: &Record) -> bool {
    event(record).is_some_and(|e| e.is_active && e.status != EventStatus::NotStarted)
}

fn by_date(record: &Record) -> SortValue {
    event(record).map(|e| e.date.timestamp()).into()
}

fn by_name(record: &Record) -> SortValue {
    event(record).map(|e| e.name.as_str()).into()
}

fn by_status(record: &Record) -> SortValue {
    event(record).map(|e| e.status.as_str()).into()
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("date", "Fecha", date).sorted_by(by_date),
    ColumnDef::new("name", "Nombre", name).sorted_by(by_name),
    ColumnDef::new("status", "Estado", status).sorted_by(by_status),
];

const RULES: &[ActionRule] = &[
    ActionRule::new(Action::Qr, when_active),
    ActionRule::new(Action::Dashboard, when_active),
    ActionRule::new(Action::Edit, editable),
    ActionRule::new(Action::View, read_only),
    ActionRule::new(Action::Reactivate, when_inactive),
];

pub struct EventsAdapter<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> EventsAdapter<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> TableAdapter for EventsAdapter<R>
where
    R: EventReader + EventWriter + ?Sized,
{
    fn key(&self) -> AdapterKey {
        AdapterKey::Events
    }

    fn columns(&self) -> &'static [ColumnDef] {
        COLUMNS
    }

    fn action_rules(&self) -> &'static [ActionRule] {
        RULES
    }

    async fn fetch(&self, query: &QueryParams) -> RepositoryResult<PageResult<Record>> {
        Ok(self.repo.list_events(query).await?.map(Record::Event))
    }

    /// Events are cancelled from their board, never deleted from the table.
    async fn mutate(&self, record: &Record, mutation: Mutation) -> RepositoryResult<()> {
        match (event(record), mutation) {
            (Some(event), Mutation::Reactivate) => self.repo.reactivate_event(event.id).await,
            _ => Err(RepositoryError::Unsupported("event mutation")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::EventId;
    use crate::repository::mock::MockRepository;
    use chrono::{TimeZone, Utc};

    fn record(status: EventStatus, is_active: bool) -> Record {
        Record::Event(Event {
            id: EventId::new(8).unwrap(),
            name: "Boda Ana y Luis".to_string(),
            folio: Some("EV-0008".to_string()),
            date: Utc.with_ymd_and_hms(2025, 12, 24, 21, 0, 0).unwrap(),
            status,
            group_id: None,
            group: None,
            company_data_id: None,
            user_id: None,
            is_active,
        })
    }

    fn adapter() -> EventsAdapter<MockRepository> {
        EventsAdapter::new(Arc::new(MockRepository::new()))
    }

    #[test]
    fn edit_is_hidden_once_the_event_starts() {
        let adapter = adapter();

        assert!(adapter.allows(Action::Edit, &record(EventStatus::NotStarted, true)));
        assert!(!adapter.allows(Action::Edit, &record(EventStatus::Active, true)));
        assert!(adapter.allows(Action::View, &record(EventStatus::Active, true)));
        assert!(!adapter.allows(Action::Edit, &record(EventStatus::NotStarted, false)));
    }

    #[test]
    fn events_are_never_deleted_from_the_table() {
        let adapter = adapter();
        assert!(!adapter.allows(Action::Delete, &record(EventStatus::NotStarted, true)));
        assert!(adapter.allows(Action::Reactivate, &record(EventStatus::Finished, false)));
    }

    #[test]
    fn status_chip_matches_lifecycle() {
        assert_eq!(
            status(&record(EventStatus::Active, true)),
            Cell::Chip {
                label: "En curso".to_string(),
                tone: Tone::Success
            }
        );
        assert_eq!(
            date(&record(EventStatus::Active, true)),
            Cell::Text("24/12/2025".to_string())
        );
    }
}
