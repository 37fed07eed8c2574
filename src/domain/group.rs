use serde::{Deserialize, Serialize};

use crate::domain::package::{Package, default_active};
use crate::domain::types::{GroupId, GroupName, PackageId};

/// A named bundle of request packages offered at an event.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub packages: Vec<Package>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Payload for creating or updating a group.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewGroup {
    pub name: GroupName,
    #[serde(rename = "packageIds")]
    pub package_ids: Vec<PackageId>,
}
