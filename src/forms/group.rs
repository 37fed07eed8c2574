//! Group create/edit form.

use validator::Validate;

use crate::domain::group::NewGroup;
use crate::domain::package::Package;
use crate::domain::types::GroupName;
use crate::forms::{FormError, no_trim_spaces};

/// Maximum number of packages a group may bundle.
pub const MAX_GROUP_PACKAGES: usize = 5;

#[derive(Debug, Clone, Validate)]
/// Form data for creating or editing a group.
pub struct GroupForm {
    #[validate(length(min = 1), custom(function = "no_trim_spaces"))]
    pub name: String,
    /// Packages picked in the multi-select engine.
    pub packages: Vec<Package>,
}

impl TryFrom<GroupForm> for NewGroup {
    type Error = FormError;

    fn try_from(form: GroupForm) -> Result<Self, Self::Error> {
        form.validate()?;
        if form.packages.is_empty() {
            return Err(FormError::Required("Al menos un paquete"));
        }
        if form.packages.len() > MAX_GROUP_PACKAGES {
            return Err(FormError::TooManySelections(MAX_GROUP_PACKAGES));
        }

        Ok(NewGroup {
            name: GroupName::new(form.name)?,
            package_ids: form.packages.iter().map(|p| p.id).collect(),
        })
    }
}

/// Chip label used by the package multi-select: `Name - $150.00`.
pub fn package_chip_label(package: &Package) -> String {
    format!("{} - ${:.2}", package.name, package.tip.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::package::RequestKind;
    use crate::domain::types::PackageId;

    fn package(id: i32) -> Package {
        Package {
            id: PackageId::new(id).unwrap(),
            name: format!("Paquete {id}"),
            kind: RequestKind::Song,
            tip: Some(100.0),
            is_optional_tip: false,
            is_active: true,
        }
    }

    #[test]
    fn group_form_sends_package_ids() {
        let group = NewGroup::try_from(GroupForm {
            name: "Bodas".to_string(),
            packages: vec![package(1), package(4)],
        })
        .unwrap();

        let ids: Vec<i32> = group.package_ids.iter().map(|id| id.get()).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn group_form_requires_at_least_one_package() {
        let result = NewGroup::try_from(GroupForm {
            name: "Bodas".to_string(),
            packages: Vec::new(),
        });
        assert!(matches!(result, Err(FormError::Required(_))));
    }

    #[test]
    fn group_form_caps_packages() {
        let result = NewGroup::try_from(GroupForm {
            name: "Bodas".to_string(),
            packages: (1..=6).map(package).collect(),
        });
        assert!(matches!(result, Err(FormError::TooManySelections(5))));
    }

    #[test]
    fn chip_label_combines_name_and_price() {
        assert_eq!(package_chip_label(&package(2)), "Paquete 2 - $100.00");
    }
}
