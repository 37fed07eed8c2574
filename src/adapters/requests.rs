//! Song and mention requests: the live queue of an event and its history.

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::{
    Action, ActionRule, AdapterKey, Cell, ColumnDef, Mutation, Record, TableAdapter, Tone, always,
};
use crate::domain::event_music::{CompleteRequest, EventMusic, MarkPaid, PaymentMethod};
use crate::domain::package::RequestKind;
use crate::dto::api::PageResult;
use crate::engine::sort::SortValue;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{EventMusicWriter, EventReader, QueryParams};

const CASH_IMAGE: &str = "cash-method.png";
const STRIPE_IMAGE: &str = "stripe-method.png";

fn request(record: &Record) -> Option<&EventMusic> {
    record.as_request()
}

fn number(record: &Record) -> Cell {
    match request(record).and_then(|r| r.application_number) {
        Some(number) => Cell::Text(number.to_string()),
        None => Cell::Empty,
    }
}

fn summary(record: &Record) -> Cell {
    let Some(request) = request(record) else {
        return Cell::Empty;
    };
    match (request.kind, &request.music, &request.mention) {
        (RequestKind::Song, Some(music), _) => Cell::Track {
            cover: music.album_logo.clone(),
            title: music.name.clone(),
            byline: format!(
                "{} • {}",
                music.author.as_deref().unwrap_or_default(),
                music.duration.as_deref().unwrap_or_default()
            ),
            link: music.spotify_url.clone(),
        },
        (_, _, Some(mention)) => Cell::Mention {
            text: mention.text.clone(),
        },
        _ => Cell::Text("Sin datos".to_string()),
    }
}

fn applicant(record: &Record) -> Cell {
    request(record).map_or(Cell::Empty, |r| Cell::Text(r.applicant_label().to_string()))
}

fn payment_method(record: &Record) -> Cell {
    request(record).map_or(Cell::Empty, |r| match r.payment_method {
        PaymentMethod::Cash => Cell::Image {
            alt: "cash-icon",
            src: Some(CASH_IMAGE.to_string()),
        },
        PaymentMethod::Stripe => Cell::Image {
            alt: "stripe-icon",
            src: Some(STRIPE_IMAGE.to_string()),
        },
    })
}

fn paid(record: &Record) -> Cell {
    request(record).map_or(Cell::Empty, |r| Cell::Chip {
        label: if r.is_paid { "Pagado" } else { "No pagado" }.to_string(),
        tone: if r.is_paid { Tone::Success } else { Tone::Warning },
    })
}

fn tip(record: &Record) -> Cell {
    request(record).map_or(Cell::Empty, |r| Cell::Text(r.tip_label()))
}

fn played(record: &Record) -> Cell {
    request(record).map_or(Cell::Empty, |r| Cell::Chip {
        label: if r.is_played { "exitosa" } else { "sin reproducir" }.to_string(),
        tone: if r.is_played { Tone::Success } else { Tone::Error },
    })
}

fn unpaid(record: &Record) -> bool {
    request(record).is_some_and(|r| !r.is_paid)
}

fn by_number(record: &Record) -> SortValue {
    request(record).and_then(|r| r.application_number).into()
}

fn by_applicant(record: &Record) -> SortValue {
    request(record).and_then(|r| r.applicant.clone()).into()
}

fn by_payment_method(record: &Record) -> SortValue {
    request(record).map(|r| r.payment_method.as_str()).into()
}

fn by_paid(record: &Record) -> SortValue {
    request(record).map(|r| r.is_paid).into()
}

fn by_tip(record: &Record) -> SortValue {
    request(record).map(|r| r.tip).into()
}

fn by_played(record: &Record) -> SortValue {
    request(record).map(|r| r.is_played).into()
}

const LIVE_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("application_number", "N° de solicitud", number).sorted_by(by_number),
    ColumnDef::new("evento", "Solicitud", summary),
    ColumnDef::new("applicant", "Solicitante", applicant).sorted_by(by_applicant),
    ColumnDef::new("payment_method", "Método de pago", payment_method)
        .sorted_by(by_payment_method),
    ColumnDef::new("is_paid", "Estado", paid).sorted_by(by_paid),
    ColumnDef::new("tip", "Propina", tip).sorted_by(by_tip),
];

const HISTORY_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("application_number", "N° de solicitud", number).sorted_by(by_number),
    ColumnDef::new("evento", "Solicitud", summary),
    ColumnDef::new("applicant", "Solicitante", applicant).sorted_by(by_applicant),
    ColumnDef::new("payment_method", "Método de pago", payment_method)
        .sorted_by(by_payment_method),
    ColumnDef::new("is_paid", "Estado", paid).sorted_by(by_paid),
    ColumnDef::new("tip", "Propina", tip).sorted_by(by_tip),
    ColumnDef::new("is_played", "Reproducción", played).sorted_by(by_played),
];

const LIVE_RULES: &[ActionRule] = &[
    ActionRule::new(Action::Play, always),
    ActionRule::new(Action::MarkPaid, unpaid),
];

const HISTORY_RULES: &[ActionRule] = &[ActionRule::new(Action::MarkPaid, unpaid)];

/// Serves both `musicRequests` (the pending queue) and `historyLine`.
pub struct RequestsAdapter<R: ?Sized> {
    repo: Arc<R>,
    history: bool,
}

impl<R: ?Sized> RequestsAdapter<R> {
    pub fn live(repo: Arc<R>) -> Self {
        Self {
            repo,
            history: false,
        }
    }

    pub fn history(repo: Arc<R>) -> Self {
        Self {
            repo,
            history: true,
        }
    }
}

#[async_trait]
impl<R> TableAdapter for RequestsAdapter<R>
where
    R: EventReader + EventMusicWriter + ?Sized,
{
    fn key(&self) -> AdapterKey {
        if self.history {
            AdapterKey::HistoryLine
        } else {
            AdapterKey::MusicRequests
        }
    }

    fn columns(&self) -> &'static [ColumnDef] {
        if self.history {
            HISTORY_COLUMNS
        } else {
            LIVE_COLUMNS
        }
    }

    fn action_rules(&self) -> &'static [ActionRule] {
        if self.history {
            HISTORY_RULES
        } else {
            LIVE_RULES
        }
    }

    async fn fetch(&self, query: &QueryParams) -> RepositoryResult<PageResult<Record>> {
        Ok(self.repo.list_requests(query).await?.map(Record::Request))
    }

    async fn mutate(&self, record: &Record, mutation: Mutation) -> RepositoryResult<()> {
        let request = request(record).ok_or(RepositoryError::Unsupported("request mutation"))?;
        match mutation {
            Mutation::Complete { mark_paid } => {
                self.repo
                    .complete_request(&CompleteRequest {
                        event_music_id: request.id,
                        is_paid: mark_paid,
                    })
                    .await
            }
            Mutation::MarkPaid => {
                self.repo
                    .mark_paid(&MarkPaid {
                        event_music_id: request.id,
                    })
                    .await
            }
            _ => Err(RepositoryError::Unsupported("request mutation")),
        }
    }
}
