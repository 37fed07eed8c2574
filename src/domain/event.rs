use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::group::Group;
use crate::domain::package::default_active;
use crate::domain::types::{CompanyId, EventId, EventName, Folio, GroupId};

/// Lifecycle of an event as reported by the API.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    NotStarted,
    Active,
    Finished,
}

impl EventStatus {
    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Active => "En curso",
            EventStatus::NotStarted => "No iniciado",
            EventStatus::Finished => "Finalizado",
        }
    }

    /// API string value, also used when sorting the status column.
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::NotStarted => "not_started",
            EventStatus::Active => "active",
            EventStatus::Finished => "finished",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    #[serde(default)]
    pub folio: Option<String>,
    pub date: DateTime<Utc>,
    pub status: EventStatus,
    #[serde(rename = "groupId", default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub group: Option<Group>,
    #[serde(rename = "companyDataId", default)]
    pub company_data_id: Option<CompanyId>,
    /// Organizer account; only sent on the public event view.
    #[serde(rename = "userId", default)]
    pub user_id: Option<i32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Event {
    /// `dd/mm/yyyy` rendering used by the events table.
    pub fn formatted_date(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }
}

/// Payload for `POST /events` and `PATCH /events/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewEvent {
    pub name: EventName,
    #[serde(rename = "groupId")]
    pub group_id: GroupId,
    pub date: DateTime<Utc>,
    pub folio: Folio,
    #[serde(rename = "companyDataId")]
    pub company_data_id: Option<CompanyId>,
}
