use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyId, CompanyName, CompanyPhone, ContactEmail};

/// Organizer company data optionally attached to events.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewCompany {
    pub name: CompanyName,
    pub phone: CompanyPhone,
    pub email: ContactEmail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}
