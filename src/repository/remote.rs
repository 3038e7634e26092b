//! HTTP gateway to the remote record service.
//!
//! Every operation is exactly one request: no retries, no caching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Response;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::client::{Client, ClientFormData};
use crate::domain::types::ClientId;
use crate::pagination::PaginatedResponse;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, Pagination};

/// Collection path of the record service.
pub const CLIENTS_PATH: &str = "/api/clientes";

/// Error payload of the record service; only `message` is used.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

async fn error_from_response(response: Response) -> RepositoryError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);
    RepositoryError::from_status(status, message)
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> RepositoryResult<T> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    Ok(response.json::<T>().await?)
}

#[derive(Clone, Debug)]
pub struct RemoteRepository {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteRepository {
    /// Creates a gateway for the service at `base_url` (scheme, host and port).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RepositoryResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}{}{}", self.base_url, CLIENTS_PATH, suffix)
    }
}

#[async_trait]
impl ClientReader for RemoteRepository {
    async fn list_clients(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<PaginatedResponse<Client>> {
        log::debug!(
            "GET {CLIENTS_PATH} page={} size={}",
            pagination.page,
            pagination.size
        );
        let response = self
            .http
            .get(self.url(""))
            .query(&pagination)
            .send()
            .await?;
        handle_response(response).await
    }

    async fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Client> {
        log::debug!("GET {CLIENTS_PATH}/{id}");
        let response = self.http.get(self.url(&format!("/{id}"))).send().await?;
        handle_response(response).await
    }

    async fn search_clients(
        &self,
        query: &str,
        pagination: Pagination,
    ) -> RepositoryResult<PaginatedResponse<Client>> {
        log::debug!(
            "GET {CLIENTS_PATH}/search q={query:?} page={} size={}",
            pagination.page,
            pagination.size
        );
        let response = self
            .http
            .get(self.url("/search"))
            .query(&[("q", query)])
            .query(&pagination)
            .send()
            .await?;
        handle_response(response).await
    }
}

#[async_trait]
impl ClientWriter for RemoteRepository {
    async fn create_client(&self, data: &ClientFormData) -> RepositoryResult<Client> {
        log::debug!("POST {CLIENTS_PATH}");
        let response = self.http.post(self.url("")).json(data).send().await?;
        handle_response(response).await
    }

    async fn update_client(&self, id: ClientId, data: &ClientFormData) -> RepositoryResult<Client> {
        log::debug!("PUT {CLIENTS_PATH}/{id}");
        let response = self
            .http
            .put(self.url(&format!("/{id}")))
            .json(data)
            .send()
            .await?;
        handle_response(response).await
    }

    async fn delete_client(&self, id: ClientId) -> RepositoryResult<()> {
        log::debug!("DELETE {CLIENTS_PATH}/{id}");
        let response = self
            .http
            .delete(self.url(&format!("/{id}")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }
}
