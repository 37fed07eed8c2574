use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::{
    Action, ActionRule, AdapterKey, Cell, ColumnDef, Mutation, Record, TableAdapter, when_active,
    when_inactive,
};
use crate::domain::package::Package;
use crate::dto::api::PageResult;
use crate::engine::sort::SortValue;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{PackageReader, PackageWriter, QueryParams};

fn package(record: &Record) -> Option<&Package> {
    match record {
        Record::Package(package) => Some(package),
        _ => None,
    }
}

fn name(record: &Record) -> Cell {
    package(record).map_or(Cell::Empty, |p| Cell::Text(p.name.clone()))
}

fn kind(record: &Record) -> Cell {
    package(record).map_or(Cell::Empty, |p| Cell::Text(p.kind.label().to_string()))
}

fn price(record: &Record) -> Cell {
    package(record).map_or(Cell::Empty, |p| Cell::Text(p.price_label()))
}

fn by_name(record: &Record) -> SortValue {
    package(record).map(|p| p.name.as_str()).into()
}

fn by_kind(record: &Record) -> SortValue {
    package(record).map(|p| p.kind.as_str()).into()
}

fn by_tip(record: &Record) -> SortValue {
    package(record).and_then(|p| p.tip).into()
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("name", "Nombre", name).sorted_by(by_name),
    ColumnDef::new("type", "Tipo", kind).sorted_by(by_kind),
    ColumnDef::new("tip", "Precio", price).sorted_by(by_tip),
];

const RULES: &[ActionRule] = &[
    ActionRule::new(Action::Edit, when_active),
    ActionRule::new(Action::Delete, when_active),
    ActionRule::new(Action::Reactivate, when_inactive),
];

pub struct PackagesAdapter<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> PackagesAdapter<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> TableAdapter for PackagesAdapter<R>
where
    R: PackageReader + PackageWriter + ?Sized,
{
    fn key(&self) -> AdapterKey {
        AdapterKey::Packages
    }

    fn columns(&self) -> &'static [ColumnDef] {
        COLUMNS
    }

    fn action_rules(&self) -> &'static [ActionRule] {
        RULES
    }

    async fn fetch(&self, query: &QueryParams) -> RepositoryResult<PageResult<Record>> {
        Ok(self.repo.list_packages(query).await?.map(Record::Package))
    }

    async fn mutate(&self, record: &Record, mutation: Mutation) -> RepositoryResult<()> {
        let package = package(record).ok_or(RepositoryError::Unsupported("package mutation"))?;
        match mutation {
            Mutation::Deactivate => self.repo.deactivate_package(package.id).await,
            Mutation::Reactivate => self.repo.reactivate_package(package.id).await,
            _ => Err(RepositoryError::Unsupported("package mutation")),
        }
    }
}
