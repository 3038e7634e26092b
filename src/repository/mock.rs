//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::client::{Client, ClientFormData};
use crate::domain::types::ClientId;
use crate::pagination::PaginatedResponse;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientReader, ClientWriter, Pagination};

mock! {
    pub Repository {}

    #[async_trait]
    impl ClientReader for Repository {
        async fn list_clients(
            &self,
            pagination: Pagination,
        ) -> RepositoryResult<PaginatedResponse<Client>>;
        async fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Client>;
        async fn search_clients(
            &self,
            query: &str,
            pagination: Pagination,
        ) -> RepositoryResult<PaginatedResponse<Client>>;
    }

    #[async_trait]
    impl ClientWriter for Repository {
        async fn create_client(&self, data: &ClientFormData) -> RepositoryResult<Client>;
        async fn update_client(
            &self,
            id: ClientId,
            data: &ClientFormData,
        ) -> RepositoryResult<Client>;
        async fn delete_client(&self, id: ClientId) -> RepositoryResult<()>;
    }
}
