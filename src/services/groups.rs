use crate::alerts::{Notice, Notifier};
use crate::domain::group::{Group, NewGroup};
use crate::domain::types::GroupId;
use crate::forms::group::GroupForm;
use crate::repository::{GroupReader, GroupWriter};
use crate::services::{ServiceResult, saved};

pub async fn get_group<R>(repo: &R, group_id: i32) -> ServiceResult<Group>
where
    R: GroupReader + ?Sized,
{
    Ok(repo.get_group(GroupId::new(group_id)?).await?)
}

/// Creates the group, or updates it when `group_id` is given.
pub async fn save_group<R>(
    repo: &R,
    notifier: &dyn Notifier,
    group_id: Option<GroupId>,
    form: GroupForm,
) -> ServiceResult<()>
where
    R: GroupWriter + ?Sized,
{
    let new_group = NewGroup::try_from(form)?;

    let result = match group_id {
        Some(id) => repo.update_group(id, &new_group).await,
        None => repo.create_group(&new_group).await,
    };
    result.inspect_err(|e| log::error!("Failed to save group: {e}"))?;

    notifier.notify(Notice::success(format!(
        "Grupo {} con éxito",
        saved(group_id.is_some(), false)
    )));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::NoticeLog;
    use crate::domain::package::{Package, RequestKind};
    use crate::domain::types::PackageId;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    fn package(id: i32) -> Package {
        Package {
            id: PackageId::new(id).unwrap(),
            name: format!("Paquete {id}"),
            kind: RequestKind::Both,
            tip: None,
            is_optional_tip: true,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn update_sends_selected_package_ids() {
        let mut repo = MockRepository::new();
        repo.expect_update_group()
            .withf(|id, group| {
                id.get() == 6 && group.package_ids.iter().map(|p| p.get()).eq([1, 2])
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let notices = NoticeLog::default();

        save_group(
            &repo,
            &notices,
            Some(GroupId::new(6).unwrap()),
            GroupForm {
                name: "Bodas".to_string(),
                packages: vec![package(1), package(2)],
            },
        )
        .await
        .unwrap();

        assert_eq!(notices.notices()[0].message, "Grupo actualizado con éxito");
    }

    #[tokio::test]
    async fn rejects_bad_ids_before_calling() {
        let repo = MockRepository::new();
        assert!(matches!(
            get_group(&repo, 0).await,
            Err(ServiceError::TypeConstraint(_))
        ));
    }
}
