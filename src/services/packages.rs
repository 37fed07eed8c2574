use crate::alerts::{Notice, Notifier};
use crate::domain::package::NewPackage;
use crate::domain::types::PackageId;
use crate::forms::package::PackageForm;
use crate::repository::PackageWriter;
use crate::services::{ServiceResult, saved};

/// Creates the package, or updates it when `package_id` is given.
pub async fn save_package<R>(
    repo: &R,
    notifier: &dyn Notifier,
    package_id: Option<PackageId>,
    form: PackageForm,
) -> ServiceResult<()>
where
    R: PackageWriter + ?Sized,
{
    let new_package = NewPackage::try_from(form)?;

    let result = match package_id {
        Some(id) => repo.update_package(id, &new_package).await,
        None => repo.create_package(&new_package).await,
    };
    result.inspect_err(|e| log::error!("Failed to save package: {e}"))?;

    notifier.notify(Notice::success(format!(
        "Paquete {} con éxito",
        saved(package_id.is_some(), false)
    )));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::NoticeLog;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    fn form() -> PackageForm {
        PackageForm {
            name: "Mención".to_string(),
            kind: "mention".to_string(),
            is_optional_tip: false,
            tip: "40".to_string(),
        }
    }

    #[tokio::test]
    async fn create_sends_parsed_tip() {
        let mut repo = MockRepository::new();
        repo.expect_create_package()
            .withf(|package| package.tip.map(|tip| tip.cents()) == Some(4_000))
            .times(1)
            .returning(|_| Ok(()));
        let notices = NoticeLog::default();

        save_package(&repo, &notices, None, form()).await.unwrap();

        assert_eq!(notices.notices()[0].message, "Paquete registrado con éxito");
    }

    #[tokio::test]
    async fn expired_session_surfaces_as_unauthorized() {
        let mut repo = MockRepository::new();
        repo.expect_create_package()
            .returning(|_| Err(RepositoryError::Unauthorized));
        let notices = NoticeLog::default();

        let result = save_package(&repo, &notices, None, form()).await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
        assert!(notices.notices().is_empty());
    }
}
