//! Data sources for client records.
//!
//! [`ClientReader`] and [`ClientWriter`] together form the single operation
//! set shared by the remote record service and the in-memory fallback store.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::client::{Client, ClientFormData};
use crate::domain::types::ClientId;
use crate::pagination::PaginatedResponse;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod memory;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod remote;
pub mod seed;
pub mod source;

pub use memory::InMemoryRepository;
pub use remote::RemoteRepository;
pub use source::ClientSource;

/// Zero-based page request, serialized as the `page`/`size` query pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub size: usize,
}

impl Pagination {
    pub fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }
}

/// A page request with an optional free-text filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientListQuery {
    pub search: Option<String>,
    pub pagination: Pagination,
}

impl ClientListQuery {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            search: None,
            pagination: Pagination::new(page, size),
        }
    }

    /// Sets the filter; blank terms leave the query unfiltered.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_string();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    /// Runs a search when a filter is set and a plain listing otherwise.
    pub async fn fetch<R>(&self, repo: &R) -> RepositoryResult<PaginatedResponse<Client>>
    where
        R: ClientReader + ?Sized,
    {
        match &self.search {
            Some(term) => repo.search_clients(term, self.pagination).await,
            None => repo.list_clients(self.pagination).await,
        }
    }
}

#[async_trait]
pub trait ClientReader: Send + Sync {
    async fn list_clients(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<PaginatedResponse<Client>>;

    async fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Client>;

    /// Server-side filtered page; results are not re-filtered locally.
    async fn search_clients(
        &self,
        query: &str,
        pagination: Pagination,
    ) -> RepositoryResult<PaginatedResponse<Client>>;

    /// Bounded suggestion list for the search box.
    async fn suggest_clients(&self, query: &str, limit: usize) -> RepositoryResult<Vec<Client>> {
        let page = self.search_clients(query, Pagination::new(0, limit)).await?;
        Ok(page.content.into_iter().take(limit).collect())
    }
}

#[async_trait]
pub trait ClientWriter: Send + Sync {
    async fn create_client(&self, data: &ClientFormData) -> RepositoryResult<Client>;

    /// Whole-record replace.
    async fn update_client(&self, id: ClientId, data: &ClientFormData) -> RepositoryResult<Client>;

    async fn delete_client(&self, id: ClientId) -> RepositoryResult<()>;
}

/// Full six-operation data source.
pub trait ClientRepository: ClientReader + ClientWriter {}

impl<T> ClientRepository for T where T: ClientReader + ClientWriter + ?Sized {}
