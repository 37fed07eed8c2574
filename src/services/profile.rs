use crate::alerts::{Notice, Notifier};
use crate::domain::profile::{ProfileUpdate, UserProfile};
use crate::forms::profile::ProfileForm;
use crate::repository::{ProfileReader, ProfileWriter};
use crate::services::ServiceResult;

const PROFILE_UPDATED: &str = "Perfil actualizado con éxito";

pub async fn load_profile<R>(repo: &R) -> ServiceResult<UserProfile>
where
    R: ProfileReader + ?Sized,
{
    Ok(repo.get_profile().await?)
}

/// Renames the organizer and returns the refreshed profile.
pub async fn update_profile<R>(
    repo: &R,
    notifier: &dyn Notifier,
    form: ProfileForm,
) -> ServiceResult<UserProfile>
where
    R: ProfileReader + ProfileWriter + ?Sized,
{
    let update = ProfileUpdate::try_from(form)?;

    let message = repo
        .update_profile(&update)
        .await
        .inspect_err(|e| log::error!("Failed to update profile: {e}"))?;
    notifier.notify(Notice::success(
        message.unwrap_or_else(|| PROFILE_UPDATED.to_string()),
    ));

    Ok(repo.get_profile().await?)
}
