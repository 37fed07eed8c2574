use serde::Deserialize;
use validator::Validate;

use crate::domain::profile::ProfileUpdate;
use crate::domain::types::PersonName;
use crate::forms::{FormError, no_trim_spaces};

#[derive(Debug, Clone, Deserialize, Validate)]
/// Form data for renaming the signed-in organizer.
pub struct ProfileForm {
    #[validate(length(min = 1, max = 50), custom(function = "no_trim_spaces"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50), custom(function = "no_trim_spaces"))]
    pub last_name: String,
}

impl TryFrom<ProfileForm> for ProfileUpdate {
    type Error = FormError;

    fn try_from(form: ProfileForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(ProfileUpdate {
            first_name: PersonName::new(form.first_name)?,
            last_name: PersonName::new(form.last_name)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_form_serializes_camel_case() {
        let update = ProfileUpdate::try_from(ProfileForm {
            first_name: "Ana".to_string(),
            last_name: "López".to_string(),
        })
        .unwrap();

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"firstName": "Ana", "lastName": "López"})
        );
    }

    #[test]
    fn profile_form_requires_both_names() {
        assert!(ProfileUpdate::try_from(ProfileForm {
            first_name: String::new(),
            last_name: "López".to_string(),
        })
        .is_err());
    }
}
