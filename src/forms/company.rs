//! Company data form.

use serde::Deserialize;
use validator::Validate;

use crate::domain::company::NewCompany;
use crate::domain::types::{CompanyName, CompanyPhone, ContactEmail};
use crate::forms::{FormError, no_trim_spaces};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompanyForm {
    #[validate(length(min = 1, max = 50), custom(function = "no_trim_spaces"))]
    pub name: String,
    #[validate(length(min = 1, max = 10), custom(function = "no_trim_spaces"))]
    pub phone: String,
    #[validate(email, custom(function = "no_trim_spaces"))]
    pub email: String,
    #[serde(default)]
    pub logo: Option<String>,
}

impl TryFrom<CompanyForm> for NewCompany {
    type Error = FormError;

    fn try_from(form: CompanyForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewCompany {
            name: CompanyName::new(form.name)?,
            phone: CompanyPhone::new(form.phone)?,
            email: ContactEmail::new(form.email)?,
            logo: form.logo.filter(|logo| !logo.trim().is_empty()),
        })
    }
}
