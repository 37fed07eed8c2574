//! REST implementation of the repository traits over `reqwest`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::alerts::{Notice, Notifier};
use crate::domain::company::{Company, NewCompany};
use crate::domain::event::{Event, NewEvent};
use crate::domain::event_music::{
    CheckoutSession, CompleteRequest, EventMusic, MarkPaid, NewRequest, Track,
};
use crate::domain::group::{Group, NewGroup};
use crate::domain::package::{NewPackage, Package};
use crate::domain::profile::{ProfileUpdate, UserProfile};
use crate::domain::types::{CompanyId, EventId, GroupId, PackageId};
use crate::dto::api::{Envelope, ErrorBody, PageResult};
use crate::models::config::ClientConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CompanyReader, CompanyWriter, EventMusicReader, EventMusicWriter, EventReader, EventWriter,
    GroupReader, GroupWriter, PackageReader, PackageWriter, ProfileReader, ProfileWriter,
    QueryParams,
};

/// Server messages that mean the stored token is no longer usable.
const SESSION_EXPIRED_MESSAGES: [&str; 2] =
    ["Token inválido o expirado", "Usuario o contraseña incorrectos"];

/// Shown when the server gives no message of its own.
pub const GENERIC_FAILURE: &str = "No se pudo completar la solicitud.";

/// Bearer token of the signed-in organizer, shared by every client clone.
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token.filter(|t| !t.is_empty())),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write() = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }
}

/// The single base client: one base URL, bearer injection and centralized
/// error interception. Requests are never retried.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    base: Url,
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
}

impl HttpRepository {
    pub fn new(
        base_url: &str,
        session: Arc<Session>,
        notifier: Arc<dyn Notifier>,
    ) -> RepositoryResult<Self> {
        Self::with_client(Client::new(), base_url, session, notifier)
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        session: Arc<Session>,
        notifier: Arc<dyn Notifier>,
    ) -> RepositoryResult<Self> {
        let mut base = Url::parse(base_url)?;
        // `Url::join` drops the last segment unless the path ends with `/`.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client,
            base,
            session,
            notifier,
        })
    }

    /// Builds the client described by the runtime configuration.
    pub fn from_config(
        config: &ClientConfig,
        notifier: Arc<dyn Notifier>,
    ) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let session = Arc::new(Session::new(config.token.clone()));
        Self::with_client(client, &config.api_url, session, notifier)
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RepositoryResult<RequestBuilder> {
        let url = self.base.join(path.trim_start_matches('/'))?;
        let builder = self.client.request(method, url);
        Ok(match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Sends the request and unwraps the `{data, message}` envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> RepositoryResult<Envelope<T>> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                log::error!("Request failed: {err}");
                self.notifier.notify(Notice::error(GENERIC_FAILURE));
                return Err(err.into());
            }
        };

        let status = response.status();
        if status.is_success() {
            return response.json::<Envelope<T>>().await.map_err(|err| {
                log::error!("Failed to decode response: {err}");
                self.notifier.notify(Notice::error(GENERIC_FAILURE));
                RepositoryError::from(err)
            });
        }

        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        Err(self.intercept(status, body.message))
    }

    /// Maps a failed status to a typed error, clearing the session on auth
    /// failures and raising an error notice for everything else.
    fn intercept(&self, status: StatusCode, message: Option<String>) -> RepositoryError {
        let expired = message
            .as_deref()
            .is_some_and(|m| SESSION_EXPIRED_MESSAGES.contains(&m));

        if status == StatusCode::UNAUTHORIZED || expired {
            log::warn!("Session rejected by the API ({status}), clearing token");
            self.session.clear();
            return RepositoryError::Unauthorized;
        }

        let message = message.unwrap_or_else(|| GENERIC_FAILURE.to_string());
        log::error!("API error {status}: {message}");
        self.notifier.notify(Notice::error(message.clone()));

        if status == StatusCode::NOT_FOUND {
            RepositoryError::NotFound
        } else {
            RepositoryError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> RepositoryResult<T> {
        let builder = self.request(Method::GET, path)?.query(query);
        Ok(self.send::<T>(builder).await?.data)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> RepositoryResult<PageResult<T>> {
        self.get(path, &query.to_pairs()).await
    }

    async fn write<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> RepositoryResult<Envelope<Option<Value>>> {
        let builder = self.request(method, path)?;
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        self.send(builder).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> RepositoryResult<()> {
        self.write(Method::POST, path, Some(body)).await.map(|_| ())
    }

    async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> RepositoryResult<()> {
        self.write(Method::PATCH, path, Some(body)).await.map(|_| ())
    }

    /// Bodiless `POST`, used by the lifecycle endpoints.
    async fn trigger(&self, path: &str) -> RepositoryResult<()> {
        self.write::<Value>(Method::POST, path, None)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl EventReader for HttpRepository {
    async fn list_events(&self, query: &QueryParams) -> RepositoryResult<PageResult<Event>> {
        self.list("events", query).await
    }

    async fn list_requests(&self, query: &QueryParams) -> RepositoryResult<PageResult<EventMusic>> {
        self.list("events/requests", query).await
    }

    async fn get_event(&self, id: EventId) -> RepositoryResult<Event> {
        self.get(&format!("events/{id}"), &[]).await
    }

    async fn get_public_event(&self, id: EventId) -> RepositoryResult<Event> {
        self.get(&format!("events/client/{id}"), &[]).await
    }

    async fn next_folio(&self) -> RepositoryResult<String> {
        self.get("events/generate-folio", &[]).await
    }

    async fn organizer_accepts_cards(&self, user_id: i32) -> RepositoryResult<bool> {
        self.get(&format!("events/client/user-stripe-check/{user_id}"), &[])
            .await
    }
}

#[async_trait]
impl EventWriter for HttpRepository {
    async fn create_event(&self, event: &NewEvent) -> RepositoryResult<()> {
        self.post("events", event).await
    }

    async fn update_event(&self, id: EventId, event: &NewEvent) -> RepositoryResult<()> {
        self.patch(&format!("events/{id}"), event).await
    }

    async fn deactivate_event(&self, id: EventId) -> RepositoryResult<()> {
        self.trigger(&format!("events/{id}/desactive")).await
    }

    async fn reactivate_event(&self, id: EventId) -> RepositoryResult<()> {
        self.trigger(&format!("events/{id}/reactive")).await
    }

    async fn start_event(&self, id: EventId) -> RepositoryResult<()> {
        self.trigger(&format!("events/{id}/start")).await
    }

    async fn finish_event(&self, id: EventId) -> RepositoryResult<()> {
        self.trigger(&format!("events/{id}/finish")).await
    }
}

#[async_trait]
impl GroupReader for HttpRepository {
    async fn list_groups(&self, query: &QueryParams) -> RepositoryResult<PageResult<Group>> {
        self.list("groups", query).await
    }

    async fn get_group(&self, id: GroupId) -> RepositoryResult<Group> {
        self.get(&format!("groups/{id}"), &[]).await
    }
}

#[async_trait]
impl GroupWriter for HttpRepository {
    async fn create_group(&self, group: &NewGroup) -> RepositoryResult<()> {
        self.post("groups", group).await
    }

    async fn update_group(&self, id: GroupId, group: &NewGroup) -> RepositoryResult<()> {
        self.patch(&format!("groups/{id}"), group).await
    }

    async fn deactivate_group(&self, id: GroupId) -> RepositoryResult<()> {
        self.trigger(&format!("groups/{id}/desactive")).await
    }

    async fn reactivate_group(&self, id: GroupId) -> RepositoryResult<()> {
        self.trigger(&format!("groups/{id}/reactive")).await
    }
}

#[async_trait]
impl PackageReader for HttpRepository {
    async fn list_packages(&self, query: &QueryParams) -> RepositoryResult<PageResult<Package>> {
        self.list("packages", query).await
    }
}

#[async_trait]
impl PackageWriter for HttpRepository {
    async fn create_package(&self, package: &NewPackage) -> RepositoryResult<()> {
        self.post("packages", package).await
    }

    async fn update_package(&self, id: PackageId, package: &NewPackage) -> RepositoryResult<()> {
        self.patch(&format!("packages/{id}"), package).await
    }

    async fn deactivate_package(&self, id: PackageId) -> RepositoryResult<()> {
        self.trigger(&format!("packages/{id}/desactive")).await
    }

    async fn reactivate_package(&self, id: PackageId) -> RepositoryResult<()> {
        self.trigger(&format!("packages/{id}/reactive")).await
    }
}

#[async_trait]
impl CompanyReader for HttpRepository {
    async fn get_company(&self) -> RepositoryResult<Option<Company>> {
        self.get("company-data", &[]).await
    }
}

#[async_trait]
impl CompanyWriter for HttpRepository {
    async fn create_company(&self, company: &NewCompany) -> RepositoryResult<()> {
        self.post("company-data", company).await
    }

    async fn update_company(&self, id: CompanyId, company: &NewCompany) -> RepositoryResult<()> {
        self.patch(&format!("company-data/{id}"), company).await
    }
}

#[async_trait]
impl ProfileReader for HttpRepository {
    async fn get_profile(&self) -> RepositoryResult<UserProfile> {
        self.get("users/profile", &[]).await
    }
}

#[async_trait]
impl ProfileWriter for HttpRepository {
    async fn update_profile(&self, update: &ProfileUpdate) -> RepositoryResult<Option<String>> {
        let envelope = self
            .write(Method::PATCH, "users/update-name", Some(update))
            .await?;
        Ok(envelope.message)
    }
}

#[async_trait]
impl EventMusicReader for HttpRepository {
    async fn search_songs(&self, search: &str) -> RepositoryResult<Vec<Track>> {
        let query = [("search".to_string(), search.to_string())];
        self.get("songs", &query).await
    }

    async fn get_by_session(&self, session_id: &str) -> RepositoryResult<EventMusic> {
        let query = [("session_id".to_string(), session_id.to_string())];
        self.get("event-music", &query).await
    }
}

#[async_trait]
impl EventMusicWriter for HttpRepository {
    async fn create_session(&self, request: &NewRequest) -> RepositoryResult<CheckoutSession> {
        let envelope = self
            .write(Method::POST, "event-music/create-session", Some(request))
            .await?;
        match envelope.data {
            Some(data) => Ok(serde_json::from_value(data)?),
            None => Ok(CheckoutSession::default()),
        }
    }

    async fn complete_request(&self, body: &CompleteRequest) -> RepositoryResult<()> {
        self.post("event-music/complete", body).await
    }

    async fn mark_paid(&self, body: &MarkPaid) -> RepositoryResult<()> {
        self.post("event-music/paid", body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::NoticeLog;

    fn repository(base: &str) -> HttpRepository {
        HttpRepository::new(
            base,
            Arc::new(Session::new(Some("secret".to_string()))),
            Arc::new(NoticeLog::default()),
        )
        .unwrap()
    }

    #[test]
    fn base_path_keeps_its_prefix() {
        let repo = repository("http://localhost:8080/api");
        let url = repo.base.join("events/3").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/events/3");
    }

    #[test]
    fn expired_token_message_clears_session() {
        let repo = repository("http://localhost:8080/api");
        let err = repo.intercept(
            StatusCode::FORBIDDEN,
            Some("Token inválido o expirado".to_string()),
        );

        assert!(matches!(err, RepositoryError::Unauthorized));
        assert!(!repo.session().is_authenticated());
    }

    #[test]
    fn empty_token_is_not_a_session() {
        assert!(!Session::new(Some(String::new())).is_authenticated());
    }
}
