//! Package create/edit form.

use serde::Deserialize;
use validator::Validate;

use crate::domain::package::{NewPackage, RequestKind};
use crate::domain::types::{PackageName, Tip};
use crate::forms::{FormError, no_trim_spaces};

#[derive(Debug, Clone, Deserialize, Validate)]
/// Form data for creating or editing a package.
pub struct PackageForm {
    #[validate(length(min = 1), custom(function = "no_trim_spaces"))]
    pub name: String,
    /// One of `song`, `mention` or `both`.
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub kind: String,
    #[serde(default)]
    pub is_optional_tip: bool,
    /// Raw tip input; ignored when the tip is voluntary.
    #[serde(default)]
    pub tip: String,
}

impl TryFrom<PackageForm> for NewPackage {
    type Error = FormError;

    fn try_from(form: PackageForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let kind: RequestKind = form.kind.parse().map_err(|_| FormError::InvalidKind)?;
        let tip = if form.is_optional_tip {
            None
        } else if form.tip.trim().is_empty() {
            return Err(FormError::Required("Propina"));
        } else {
            Some(Tip::parse(&form.tip)?)
        };

        Ok(NewPackage {
            name: PackageName::new(form.name)?,
            kind,
            is_optional_tip: form.is_optional_tip,
            tip,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TypeConstraintError;

    fn form(tip: &str, optional: bool) -> PackageForm {
        PackageForm {
            name: "Canción VIP".to_string(),
            kind: "song".to_string(),
            is_optional_tip: optional,
            tip: tip.to_string(),
        }
    }

    #[test]
    fn fixed_tip_is_parsed() {
        let package = NewPackage::try_from(form("150.50", false)).unwrap();
        assert_eq!(package.tip.map(Tip::cents), Some(15_050));
        assert_eq!(package.kind, RequestKind::Song);
    }

    #[test]
    fn optional_tip_skips_amount_validation() {
        let package = NewPackage::try_from(form("Propina voluntaria", true)).unwrap();
        assert!(package.tip.is_none());
        assert!(package.is_optional_tip);
    }

    #[test]
    fn tip_is_required_unless_optional() {
        assert!(matches!(
            NewPackage::try_from(form("", false)),
            Err(FormError::Required("Propina"))
        ));
    }

    #[test]
    fn tip_rejects_negative_and_three_decimals() {
        assert!(matches!(
            NewPackage::try_from(form("-10", false)),
            Err(FormError::Constraint(TypeConstraintError::InvalidAmount))
        ));
        assert!(matches!(
            NewPackage::try_from(form("10.123", false)),
            Err(FormError::Constraint(TypeConstraintError::InvalidAmount))
        ));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let mut form = form("10", false);
        form.kind = "karaoke".to_string();
        assert!(matches!(
            NewPackage::try_from(form),
            Err(FormError::InvalidKind)
        ));
    }
}
