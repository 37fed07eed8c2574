//! Event create/edit form.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::event::NewEvent;
use crate::domain::group::Group;
use crate::domain::types::{CompanyId, EventName, Folio, GroupId};
use crate::forms::{FormError, no_trim_spaces};

#[derive(Debug, Clone, Deserialize, Validate)]
/// Form data for creating or editing an event.
pub struct EventForm {
    #[validate(length(min = 1))]
    pub folio: String,
    pub date: DateTime<Utc>,
    #[validate(length(min = 1, max = 100), custom(function = "no_trim_spaces"))]
    pub name: String,
    /// Value bound to the group select; `None` until the user picks one.
    #[serde(default)]
    pub group: Option<GroupId>,
    /// Attach the organizer's company data to the event.
    #[serde(default)]
    pub is_company: bool,
}

impl EventForm {
    /// Binds the group picked in the select engine.
    pub fn with_group(mut self, group: &Group) -> Self {
        self.group = Some(group.id);
        self
    }
}

/// Validated event payload ready to be sent.
pub struct EventPayload {
    pub name: EventName,
    pub folio: Folio,
    pub date: DateTime<Utc>,
    pub group_id: GroupId,
    pub is_company: bool,
}

impl TryFrom<EventForm> for EventPayload {
    type Error = FormError;

    fn try_from(form: EventForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let group_id = form.group.ok_or(FormError::Required("Grupo"))?;

        Ok(Self {
            name: EventName::new(form.name)?,
            folio: Folio::new(form.folio)?,
            date: form.date,
            group_id,
            is_company: form.is_company,
        })
    }
}

impl EventPayload {
    /// Builds the API body; the company id is only attached when requested.
    pub fn into_domain(self, company: Option<CompanyId>) -> NewEvent {
        NewEvent {
            name: self.name,
            group_id: self.group_id,
            date: self.date,
            folio: self.folio,
            company_data_id: if self.is_company { company } else { None },
        }
    }
}
