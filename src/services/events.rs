//! Event editor and lifecycle workflows.

use crate::alerts::{Confirm, Notice, Notifier, Prompt};
use crate::domain::company::Company;
use crate::domain::event::Event;
use crate::domain::types::EventId;
use crate::forms::event::{EventForm, EventPayload};
use crate::repository::{CompanyReader, EventReader, EventWriter, ProfileReader};
use crate::services::{ServiceResult, saved};

/// Values the event editor needs before it opens.
#[derive(Clone, Debug, PartialEq)]
pub struct EventFormDefaults {
    /// Folio proposed for a new event.
    pub folio: String,
    /// Offered as the "attach company data" toggle when present.
    pub company: Option<Company>,
}

pub async fn load_event_form<R>(repo: &R) -> ServiceResult<EventFormDefaults>
where
    R: EventReader + CompanyReader + ?Sized,
{
    let folio = repo.next_folio().await?;
    let company = repo.get_company().await?;
    Ok(EventFormDefaults { folio, company })
}

pub async fn get_event<R>(repo: &R, event_id: i32) -> ServiceResult<Event>
where
    R: EventReader + ?Sized,
{
    Ok(repo.get_event(EventId::new(event_id)?).await?)
}

/// Creates the event, or updates it when `event_id` is given.
pub async fn save_event<R>(
    repo: &R,
    notifier: &dyn Notifier,
    event_id: Option<EventId>,
    form: EventForm,
) -> ServiceResult<()>
where
    R: EventWriter + CompanyReader + ?Sized,
{
    let payload = EventPayload::try_from(form)?;

    let company = if payload.is_company {
        repo.get_company().await?.map(|company| company.id)
    } else {
        None
    };
    let new_event = payload.into_domain(company);

    let result = match event_id {
        Some(id) => repo.update_event(id, &new_event).await,
        None => repo.create_event(&new_event).await,
    };
    result.inspect_err(|e| log::error!("Failed to save event: {e}"))?;

    notifier.notify(Notice::success(format!(
        "Evento {} con éxito",
        saved(event_id.is_some(), false)
    )));
    Ok(())
}

/// Cancels an event that has not started. Returns `false` when the
/// organizer dismisses the confirmation.
pub async fn cancel_event<R>(
    repo: &R,
    confirm: &dyn Confirm,
    notifier: &dyn Notifier,
    event_id: EventId,
) -> ServiceResult<bool>
where
    R: EventWriter + ?Sized,
{
    let prompt = Prompt::new("¿Seguro que deseas cancelar el evento?");
    if !confirm.confirm(&prompt).await.is_confirmed() {
        return Ok(false);
    }

    repo.deactivate_event(event_id)
        .await
        .inspect_err(|e| log::error!("Failed to cancel event {event_id}: {e}"))?;

    notifier.notify(Notice::success("Evento cancelado con éxito"));
    Ok(true)
}

/// Starts an event. Organizers without a verified Stripe account are warned
/// that only cash payments will be accepted.
pub async fn start_event<R>(
    repo: &R,
    confirm: &dyn Confirm,
    notifier: &dyn Notifier,
    event_id: EventId,
) -> ServiceResult<bool>
where
    R: EventWriter + ProfileReader + ?Sized,
{
    let verified = match repo.get_profile().await {
        Ok(profile) => profile.is_stripe_verified,
        Err(e) => {
            log::warn!("Could not check Stripe verification: {e}");
            false
        }
    };

    let message = if verified {
        "¿Seguro que deseas iniciar el evento?".to_string()
    } else {
        "¿Seguro que deseas iniciar el evento? No tienes una cuenta de Stripe verificada, solo podrás recibir pagos en efectivo.".to_string()
    };
    if !confirm.confirm(&Prompt::new(message)).await.is_confirmed() {
        return Ok(false);
    }

    repo.start_event(event_id)
        .await
        .inspect_err(|e| log::error!("Failed to start event {event_id}: {e}"))?;

    notifier.notify(Notice::success("Evento iniciado con éxito"));
    Ok(true)
}

/// Finishes an event; `unplayed` requests on the board are called out in
/// the confirmation.
pub async fn finish_event<R>(
    repo: &R,
    confirm: &dyn Confirm,
    notifier: &dyn Notifier,
    event_id: EventId,
    unplayed: usize,
) -> ServiceResult<bool>
where
    R: EventWriter + ?Sized,
{
    let message = if unplayed > 0 {
        format!(
            "Existen {unplayed} solicitudes sin reproducir, ¿Seguro que deseas finalizar el evento?"
        )
    } else {
        "¿Seguro que deseas finalizar el evento?".to_string()
    };
    if !confirm.confirm(&Prompt::new(message)).await.is_confirmed() {
        return Ok(false);
    }

    repo.finish_event(event_id)
        .await
        .inspect_err(|e| log::error!("Failed to finish event {event_id}: {e}"))?;

    notifier.notify(Notice::success("Evento finalizado con éxito"));
    Ok(true)
}
