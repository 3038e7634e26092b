use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::client::{Client, ClientFormData};
use crate::domain::types::ClientId;
use crate::models::config::{DashboardConfig, DataSourceMode};
use crate::pagination::PaginatedResponse;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientReader, ClientWriter, InMemoryRepository, Pagination, RemoteRepository,
};

/// Data source selected by configuration: the record service or the
/// in-memory fallback store.
#[derive(Clone, Debug)]
pub enum ClientSource {
    Remote(RemoteRepository),
    Fallback(Arc<InMemoryRepository>),
}

impl ClientSource {
    /// Builds the configured source; `fallback` is used as-is in fallback mode.
    pub fn from_config(
        config: &DashboardConfig,
        fallback: Arc<InMemoryRepository>,
    ) -> RepositoryResult<Self> {
        match config.data_source {
            DataSourceMode::Remote => Ok(ClientSource::Remote(RemoteRepository::new(
                config.api_base_url.clone(),
                config.request_timeout(),
            )?)),
            DataSourceMode::Fallback => Ok(ClientSource::Fallback(fallback)),
        }
    }

    pub fn mode(&self) -> DataSourceMode {
        match self {
            ClientSource::Remote(_) => DataSourceMode::Remote,
            ClientSource::Fallback(_) => DataSourceMode::Fallback,
        }
    }

    fn reader(&self) -> &dyn ClientReader {
        match self {
            ClientSource::Remote(repo) => repo,
            ClientSource::Fallback(store) => store.as_ref(),
        }
    }

    fn writer(&self) -> &dyn ClientWriter {
        match self {
            ClientSource::Remote(repo) => repo,
            ClientSource::Fallback(store) => store.as_ref(),
        }
    }
}

#[async_trait]
impl ClientReader for ClientSource {
    async fn list_clients(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<PaginatedResponse<Client>> {
        self.reader().list_clients(pagination).await
    }

    async fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Client> {
        self.reader().get_client_by_id(id).await
    }

    async fn search_clients(
        &self,
        query: &str,
        pagination: Pagination,
    ) -> RepositoryResult<PaginatedResponse<Client>> {
        self.reader().search_clients(query, pagination).await
    }

    async fn suggest_clients(&self, query: &str, limit: usize) -> RepositoryResult<Vec<Client>> {
        self.reader().suggest_clients(query, limit).await
    }
}

#[async_trait]
impl ClientWriter for ClientSource {
    async fn create_client(&self, data: &ClientFormData) -> RepositoryResult<Client> {
        self.writer().create_client(data).await
    }

    async fn update_client(&self, id: ClientId, data: &ClientFormData) -> RepositoryResult<Client> {
        self.writer().update_client(id, data).await
    }

    async fn delete_client(&self, id: ClientId) -> RepositoryResult<()> {
        self.writer().delete_client(id).await
    }
}
