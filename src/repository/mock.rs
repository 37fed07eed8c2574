//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::company::{Company, NewCompany};
use crate::domain::event::{Event, NewEvent};
use crate::domain::event_music::{
    CheckoutSession, CompleteRequest, EventMusic, MarkPaid, NewRequest, Track,
};
use crate::domain::group::{Group, NewGroup};
use crate::domain::package::{NewPackage, Package};
use crate::domain::profile::{ProfileUpdate, UserProfile};
use crate::domain::types::{CompanyId, EventId, GroupId, PackageId};
use crate::dto::api::PageResult;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CompanyReader, CompanyWriter, EventMusicReader, EventMusicWriter, EventReader, EventWriter,
    GroupReader, GroupWriter, PackageReader, PackageWriter, ProfileReader, ProfileWriter,
    QueryParams,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl EventReader for Repository {
        async fn list_events(&self, query: &QueryParams) -> RepositoryResult<PageResult<Event>>;
        async fn list_requests(
            &self,
            query: &QueryParams,
        ) -> RepositoryResult<PageResult<EventMusic>>;
        async fn get_event(&self, id: EventId) -> RepositoryResult<Event>;
        async fn get_public_event(&self, id: EventId) -> RepositoryResult<Event>;
        async fn next_folio(&self) -> RepositoryResult<String>;
        async fn organizer_accepts_cards(&self, user_id: i32) -> RepositoryResult<bool>;
    }

    #[async_trait]
    impl EventWriter for Repository {
        async fn create_event(&self, event: &NewEvent) -> RepositoryResult<()>;
        async fn update_event(&self, id: EventId, event: &NewEvent) -> RepositoryResult<()>;
        async fn deactivate_event(&self, id: EventId) -> RepositoryResult<()>;
        async fn reactivate_event(&self, id: EventId) -> RepositoryResult<()>;
        async fn start_event(&self, id: EventId) -> RepositoryResult<()>;
        async fn finish_event(&self, id: EventId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl GroupReader for Repository {
        async fn list_groups(&self, query: &QueryParams) -> RepositoryResult<PageResult<Group>>;
        async fn get_group(&self, id: GroupId) -> RepositoryResult<Group>;
    }

    #[async_trait]
    impl GroupWriter for Repository {
        async fn create_group(&self, group: &NewGroup) -> RepositoryResult<()>;
        async fn update_group(&self, id: GroupId, group: &NewGroup) -> RepositoryResult<()>;
        async fn deactivate_group(&self, id: GroupId) -> RepositoryResult<()>;
        async fn reactivate_group(&self, id: GroupId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl PackageReader for Repository {
        async fn list_packages(
            &self,
            query: &QueryParams,
        ) -> RepositoryResult<PageResult<Package>>;
    }

    #[async_trait]
    impl PackageWriter for Repository {
        async fn create_package(&self, package: &NewPackage) -> RepositoryResult<()>;
        async fn update_package(
            &self,
            id: PackageId,
            package: &NewPackage,
        ) -> RepositoryResult<()>;
        async fn deactivate_package(&self, id: PackageId) -> RepositoryResult<()>;
        async fn reactivate_package(&self, id: PackageId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl CompanyReader for Repository {
        async fn get_company(&self) -> RepositoryResult<Option<Company>>;
    }

    #[async_trait]
    impl CompanyWriter for Repository {
        async fn create_company(&self, company: &NewCompany) -> RepositoryResult<()>;
        async fn update_company(
            &self,
            id: CompanyId,
            company: &NewCompany,
        ) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl ProfileReader for Repository {
        async fn get_profile(&self) -> RepositoryResult<UserProfile>;
    }

    #[async_trait]
    impl ProfileWriter for Repository {
        async fn update_profile(&self, update: &ProfileUpdate) -> RepositoryResult<Option<String>>;
    }

    #[async_trait]
    impl EventMusicReader for Repository {
        async fn search_songs(&self, search: &str) -> RepositoryResult<Vec<Track>>;
        async fn get_by_session(&self, session_id: &str) -> RepositoryResult<EventMusic>;
    }

    #[async_trait]
    impl EventMusicWriter for Repository {
        async fn create_session(&self, request: &NewRequest) -> RepositoryResult<CheckoutSession>;
        async fn complete_request(&self, body: &CompleteRequest) -> RepositoryResult<()>;
        async fn mark_paid(&self, body: &MarkPaid) -> RepositoryResult<()>;
    }
}
