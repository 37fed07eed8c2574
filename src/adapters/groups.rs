use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::{
    Action, ActionRule, AdapterKey, Cell, ColumnDef, Mutation, Record, TableAdapter, when_active,
    when_inactive,
};
use crate::dto::api::PageResult;
use crate::engine::sort::SortValue;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{GroupReader, GroupWriter, QueryParams};

fn name(record: &Record) -> Cell {
    match record {
        Record::Group(group) => Cell::Text(group.name.clone()),
        _ => Cell::Empty,
    }
}

fn by_name(record: &Record) -> SortValue {
    match record {
        Record::Group(group) => group.name.as_str().into(),
        _ => SortValue::Missing,
    }
}

const COLUMNS: &[ColumnDef] = &[ColumnDef::new("name", "Nombre", name).sorted_by(by_name)];

const RULES: &[ActionRule] = &[
    ActionRule::new(Action::Edit, when_active),
    ActionRule::new(Action::Delete, when_active),
    ActionRule::new(Action::Reactivate, when_inactive),
];

pub struct GroupsAdapter<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> GroupsAdapter<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> TableAdapter for GroupsAdapter<R>
where
    R: GroupReader + GroupWriter + ?Sized,
{
    fn key(&self) -> AdapterKey {
        AdapterKey::Groups
    }

    fn columns(&self) -> &'static [ColumnDef] {
        COLUMNS
    }

    fn action_rules(&self) -> &'static [ActionRule] {
        RULES
    }

    async fn fetch(&self, query: &QueryParams) -> RepositoryResult<PageResult<Record>> {
        Ok(self.repo.list_groups(query).await?.map(Record::Group))
    }

    async fn mutate(&self, record: &Record, mutation: Mutation) -> RepositoryResult<()> {
        let Record::Group(group) = record else {
            return Err(RepositoryError::Unsupported("group mutation"));
        };
        match mutation {
            Mutation::Deactivate => self.repo.deactivate_group(group.id).await,
            Mutation::Reactivate => self.repo.reactivate_group(group.id).await,
            _ => Err(RepositoryError::Unsupported("group mutation")),
        }
    }
}
