//! Public request page: song search, checkout and the return from Stripe.

use crate::alerts::{Notice, Notifier};
use crate::domain::event::Event;
use crate::domain::event_music::{EventMusic, Track};
use crate::domain::types::EventId;
use crate::forms::request::RequestForm;
use crate::repository::{EventMusicReader, EventMusicWriter, EventReader};
use crate::services::ServiceResult;

pub const THANK_YOU_MESSAGE: &str = "🙌 ¡Gracias por apoyar al DJ! Tu solicitud fue enviada. El DJ decide cuáles tocar según su repertorio y ritmo del evento. Tu propina lo ayuda a mantener la energía al máximo";

/// What happened to a submitted request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Card payment: the attendee continues at this checkout URL.
    Checkout(String),
    /// Cash or free request, already queued for the DJ.
    Sent,
}

/// Event as shown to attendees.
pub async fn load_public_event<R>(repo: &R, event_id: EventId) -> ServiceResult<Event>
where
    R: EventReader + ?Sized,
{
    Ok(repo.get_public_event(event_id).await?)
}

/// Tracks matching `text`; blank input returns nothing without a call.
pub async fn search_songs<R>(repo: &R, text: &str) -> ServiceResult<Vec<Track>>
where
    R: EventMusicReader + ?Sized,
{
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    Ok(repo.search_songs(text).await?)
}

/// Validates the attendee's form and opens a checkout session.
pub async fn submit_request<R>(
    repo: &R,
    notifier: &dyn Notifier,
    event: &Event,
    form: RequestForm,
) -> ServiceResult<Submission>
where
    R: EventReader + EventMusicWriter + ?Sized,
{
    let is_stripe = match event.user_id {
        Some(user_id) => repo.organizer_accepts_cards(user_id).await?,
        None => false,
    };

    let request = form.into_request(event.id, is_stripe)?;
    let session = repo
        .create_session(&request)
        .await
        .inspect_err(|e| log::error!("Failed to submit request for event {}: {e}", event.id))?;

    match session.url {
        Some(url) => Ok(Submission::Checkout(url)),
        None => {
            notifier.notify(Notice::success(THANK_YOU_MESSAGE));
            Ok(Submission::Sent)
        }
    }
}

/// Request paid through the checkout session `session_id`.
pub async fn find_by_session<R>(repo: &R, session_id: &str) -> ServiceResult<EventMusic>
where
    R: EventMusicReader + ?Sized,
{
    Ok(repo.get_by_session(session_id).await?)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::alerts::NoticeLog;
    use crate::domain::event::EventStatus;
    use crate::domain::event_music::{CheckoutSession, PaymentMethod};
    use crate::domain::package::{Package, RequestKind};
    use crate::domain::types::PackageId;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    fn event(user_id: Option<i32>) -> Event {
        Event {
            id: EventId::new(5).unwrap(),
            name: "Boda".to_string(),
            folio: None,
            date: Utc.with_ymd_and_hms(2025, 6, 7, 22, 0, 0).unwrap(),
            status: EventStatus::Active,
            group_id: None,
            group: None,
            company_data_id: None,
            user_id,
            is_active: true,
        }
    }

    fn form(tip: f64) -> RequestForm {
        RequestForm {
            package: Some(Package {
                id: PackageId::new(1).unwrap(),
                name: "Mención".to_string(),
                kind: RequestKind::Mention,
                tip: Some(tip),
                is_optional_tip: false,
                is_active: true,
            }),
            song: None,
            description: Some("Feliz aniversario".to_string()),
            applicant_name: None,
            tip: String::new(),
            payment_method: Some(PaymentMethod::Stripe),
        }
    }

    #[tokio::test]
    async fn card_payment_returns_checkout_url() {
        let mut repo = MockRepository::new();
        repo.expect_organizer_accepts_cards()
            .withf(|user_id| *user_id == 44)
            .returning(|_| Ok(true));
        repo.expect_create_session()
            .withf(|request| request.is_stripe && request.event_id.get() == 5)
            .times(1)
            .returning(|_| {
                Ok(CheckoutSession {
                    url: Some("https://checkout.stripe.com/c/1".to_string()),
                })
            });
        let notices = NoticeLog::default();

        let submission = submit_request(&repo, &notices, &event(Some(44)), form(30.0))
            .await
            .unwrap();

        assert_eq!(
            submission,
            Submission::Checkout("https://checkout.stripe.com/c/1".to_string())
        );
        assert!(notices.notices().is_empty());
    }

    #[tokio::test]
    async fn cash_request_thanks_the_attendee() {
        let mut repo = MockRepository::new();
        repo.expect_create_session()
            .withf(|request| !request.is_stripe)
            .returning(|_| Ok(CheckoutSession::default()));
        let notices = NoticeLog::default();

        let submission = submit_request(&repo, &notices, &event(None), form(0.0))
            .await
            .unwrap();

        assert_eq!(submission, Submission::Sent);
        assert_eq!(notices.notices()[0].message, THANK_YOU_MESSAGE);
    }

    #[tokio::test]
    async fn incomplete_form_is_rejected_locally() {
        let repo = MockRepository::new();
        let notices = NoticeLog::default();
        let mut form = form(30.0);
        form.package = None;

        let result = submit_request(&repo, &notices, &event(None), form).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[tokio::test]
    async fn blank_search_skips_the_api() {
        let repo = MockRepository::new();
        assert!(search_songs(&repo, "   ").await.unwrap().is_empty());
    }
}
