use crate::alerts::{Notice, Notifier};
use crate::domain::company::{Company, NewCompany};
use crate::forms::company::CompanyForm;
use crate::repository::{CompanyReader, CompanyWriter};
use crate::services::{ServiceResult, saved};

/// Company data of the organizer, if registered.
pub async fn load_company<R>(repo: &R) -> ServiceResult<Option<Company>>
where
    R: CompanyReader + ?Sized,
{
    Ok(repo.get_company().await?)
}

/// Registers the company data, or updates the existing record.
pub async fn save_company<R>(
    repo: &R,
    notifier: &dyn Notifier,
    form: CompanyForm,
) -> ServiceResult<()>
where
    R: CompanyReader + CompanyWriter + ?Sized,
{
    let new_company = NewCompany::try_from(form)?;
    let existing = repo.get_company().await?;

    let result = match &existing {
        Some(company) => repo.update_company(company.id, &new_company).await,
        None => repo.create_company(&new_company).await,
    };
    result.inspect_err(|e| log::error!("Failed to save company data: {e}"))?;

    notifier.notify(Notice::success(format!(
        "Empresa {} con éxito",
        saved(existing.is_some(), true)
    )));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::NoticeLog;
    use crate::domain::types::CompanyId;
    use crate::repository::mock::MockRepository;

    fn form() -> CompanyForm {
        CompanyForm {
            name: "DJ Sonido".to_string(),
            phone: "5512345678".to_string(),
            email: "contacto@dj.mx".to_string(),
            logo: None,
        }
    }

    #[tokio::test]
    async fn first_save_registers_company() {
        let mut repo = MockRepository::new();
        repo.expect_get_company().returning(|| Ok(None));
        repo.expect_create_company().times(1).returning(|_| Ok(()));
        let notices = NoticeLog::default();

        save_company(&repo, &notices, form()).await.unwrap();

        assert_eq!(notices.notices()[0].message, "Empresa registrada con éxito");
    }

    #[tokio::test]
    async fn existing_company_is_updated_in_place() {
        let mut repo = MockRepository::new();
        repo.expect_get_company().returning(|| {
            Ok(Some(Company {
                id: CompanyId::new(2).unwrap(),
                name: "Viejo".to_string(),
                phone: None,
                email: None,
                logo: None,
            }))
        });
        repo.expect_update_company()
            .withf(|id, company| id.get() == 2 && company.name.as_str() == "DJ Sonido")
            .times(1)
            .returning(|_, _| Ok(()));
        let notices = NoticeLog::default();

        save_company(&repo, &notices, form()).await.unwrap();

        assert_eq!(notices.notices()[0].message, "Empresa actualizada con éxito");
    }
}
