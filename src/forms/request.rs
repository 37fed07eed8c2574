//! Public song/mention request form filled by event attendees.

use validator::Validate;

use crate::domain::event_music::{NewRequest, PaymentMethod, Track};
use crate::domain::package::{Package, RequestKind};
use crate::domain::types::{EventId, Tip};
use crate::forms::FormError;

#[derive(Debug, Clone, Validate)]
pub struct RequestForm {
    /// Package picked by the attendee.
    pub package: Option<Package>,
    /// Track picked in the song search, for song packages.
    pub song: Option<Track>,
    /// Mention text, for mention packages.
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(length(max = 50))]
    pub applicant_name: Option<String>,
    /// Tip typed by the attendee; only read for voluntary-tip packages.
    pub tip: String,
    /// `None` lets the form pick cash for free packages.
    pub payment_method: Option<PaymentMethod>,
}

impl RequestForm {
    /// Request kind derived from the picked package and song.
    fn kind(package: &Package, song: Option<&Track>) -> RequestKind {
        match package.kind {
            RequestKind::Both if song.is_some() => RequestKind::Song,
            RequestKind::Both => RequestKind::Mention,
            kind => kind,
        }
    }

    /// Validates the form and builds the checkout body.
    ///
    /// `is_stripe` tells whether the organizer can take card payments.
    pub fn into_request(self, event_id: EventId, is_stripe: bool) -> Result<NewRequest, FormError> {
        self.validate()?;
        let package = self.package.ok_or(FormError::Required("Paquete"))?;
        let kind = Self::kind(&package, self.song.as_ref());

        let song = match kind {
            RequestKind::Song => Some(self.song.ok_or(FormError::Required("Canción"))?),
            _ => None,
        };
        let description = match kind {
            RequestKind::Mention => {
                let text = self
                    .description
                    .as_deref()
                    .map(ammonia::clean)
                    .map(|text| text.trim().to_string())
                    .filter(|text| !text.is_empty())
                    .ok_or(FormError::Required("Descripción"))?;
                Some(text)
            }
            _ => None,
        };

        let tip = if package.is_optional_tip {
            Tip::parse(&self.tip)?
        } else {
            Tip::from_amount(package.tip.unwrap_or(0.0))?
        };

        let payment_method = if package.is_free() {
            PaymentMethod::Cash
        } else {
            self.payment_method.ok_or(FormError::Required("Método de pago"))?
        };

        let applicant = self
            .applicant_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let song = song.unwrap_or_default();
        let has_song = kind == RequestKind::Song;

        Ok(NewRequest {
            event_id,
            package_id: package.id,
            kind,
            applicant,
            description,
            tip,
            name: has_song.then(|| song.name.clone()),
            author: song.author.filter(|_| has_song),
            duration: song.duration.filter(|_| has_song),
            album_logo: song.album_logo.filter(|_| has_song),
            spotify_url: song.spotify_url.filter(|_| has_song),
            payment_method,
            is_stripe,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::PackageId;

    fn package(kind: RequestKind, tip: Option<f64>, optional: bool) -> Package {
        Package {
            id: PackageId::new(2).unwrap(),
            name: "Paquete".to_string(),
            kind,
            tip,
            is_optional_tip: optional,
            is_active: true,
        }
    }

    fn form(package: Package) -> RequestForm {
        RequestForm {
            package: Some(package),
            song: None,
            description: None,
            applicant_name: Some("  Ana ".to_string()),
            tip: String::new(),
            payment_method: Some(PaymentMethod::Stripe),
        }
    }

    fn event() -> EventId {
        EventId::new(5).unwrap()
    }

    #[test]
    fn song_request_copies_track_and_package_tip() {
        let mut form = form(package(RequestKind::Song, Some(80.0), false));
        form.song = Some(Track {
            name: "La Bikina".to_string(),
            author: Some("Luis Miguel".to_string()),
            ..Track::default()
        });

        let request = form.into_request(event(), true).unwrap();

        assert_eq!(request.kind, RequestKind::Song);
        assert_eq!(request.name.as_deref(), Some("La Bikina"));
        assert_eq!(request.tip.cents(), 8_000);
        assert_eq!(request.applicant.as_deref(), Some("Ana"));
        assert!(request.description.is_none());
    }

    #[test]
    fn mention_text_is_sanitized() {
        let mut form = form(package(RequestKind::Mention, Some(20.0), false));
        form.description = Some("Feliz cumple<script>alert(1)</script>".to_string());

        let request = form.into_request(event(), false).unwrap();

        assert_eq!(request.description.as_deref(), Some("Feliz cumple"));
        assert!(request.name.is_none());
    }

    #[test]
    fn voluntary_tip_reads_typed_amount() {
        let mut form = form(package(RequestKind::Mention, None, true));
        form.description = Some("Saludos".to_string());
        form.tip = "35.5".to_string();

        let request = form.into_request(event(), true).unwrap();
        assert_eq!(request.tip.cents(), 3_550);
    }

    #[test]
    fn free_package_forces_cash() {
        let mut form = form(package(RequestKind::Mention, Some(0.0), false));
        form.description = Some("Saludos".to_string());
        form.payment_method = None;

        let request = form.into_request(event(), true).unwrap();
        assert_eq!(request.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn song_package_requires_a_track() {
        let form = form(package(RequestKind::Song, Some(80.0), false));
        assert!(matches!(
            form.into_request(event(), true),
            Err(FormError::Required("Canción"))
        ));
    }
}
