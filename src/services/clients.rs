//! Client list controller: paging, search query and CRUD dispatch.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::SUGGESTION_LIMIT;
use crate::domain::client::{Client, ClientFormData};
use crate::domain::types::ClientId;
use crate::pagination::PaginatedResponse;
use crate::repository::{ClientListQuery, ClientRepository, InMemoryRepository};
use crate::services::search::SuggestionSource;
use crate::services::{ServiceError, ServiceResult};

/// Shown when a failed page load carries no message.
pub const FETCH_ERROR_MESSAGE: &str = "Error inesperado al traer clientes";

/// Snapshot of the listing view state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientListState {
    /// Last page applied; kept on failure so the view can stay stale.
    pub response: Option<PaginatedResponse<Client>>,
    pub loading: bool,
    pub error: Option<String>,
    /// Zero-based page of the latest request.
    pub page: usize,
    /// Trimmed filter of the latest request; empty when listing.
    pub query: String,
}

#[derive(Debug, Default)]
struct Inner {
    state: ClientListState,
    /// Token of the most recently issued page request.
    latest_request: u64,
}

/// Owns the current page result set for the listing view.
pub struct ClientListController<R: ?Sized> {
    source: Arc<R>,
    safety_net: Option<Arc<InMemoryRepository>>,
    page_size: usize,
    suggestion_limit: usize,
    inner: Mutex<Inner>,
}

impl<R> ClientListController<R>
where
    R: ClientRepository + ?Sized,
{
    pub fn new(source: Arc<R>, page_size: usize) -> Self {
        Self {
            source,
            safety_net: None,
            page_size,
            suggestion_limit: SUGGESTION_LIMIT,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Serves suggestions from `store` whenever the source fails to.
    pub fn with_suggestion_fallback(mut self, store: Arc<InMemoryRepository>) -> Self {
        self.safety_net = Some(store);
        self
    }

    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> ClientListState {
        self.lock().state.clone()
    }

    /// Loads `page`, searching when `query` is non-blank.
    ///
    /// Failures are recorded in the state rather than returned. Only the
    /// response to the most recently issued call is applied; responses to
    /// superseded calls are dropped.
    pub async fn fetch_page(&self, page: usize, query: Option<&str>) {
        let mut list_query = ClientListQuery::new(page, self.page_size);
        if let Some(term) = query {
            list_query = list_query.search(term);
        }

        let token = {
            let mut inner = self.lock();
            inner.latest_request += 1;
            inner.state.loading = true;
            inner.state.error = None;
            inner.state.page = page;
            inner.state.query = list_query.search.clone().unwrap_or_default();
            inner.latest_request
        };

        let result = list_query.fetch(self.source.as_ref()).await;

        let mut inner = self.lock();
        if inner.latest_request != token {
            log::debug!("Discarding superseded response for page {page}");
            return;
        }
        inner.state.loading = false;
        match result {
            Ok(response) => inner.state.response = Some(response),
            Err(err) => {
                log::error!("Failed to fetch clients: {err}");
                let message = ServiceError::from(err).user_message(FETCH_ERROR_MESSAGE);
                inner.state.error = Some(message);
            }
        }
    }

    /// Re-runs the latest page request.
    pub async fn refresh(&self) {
        let (page, query) = {
            let inner = self.lock();
            (inner.state.page, inner.state.query.clone())
        };
        self.fetch_page(page, Some(&query)).await;
    }

    pub async fn create_client(&self, data: &ClientFormData) -> ServiceResult<Client> {
        self.source.create_client(data).await.map_err(|err| {
            log::error!("Failed to create client: {err}");
            ServiceError::from(err)
        })
    }

    pub async fn update_client(
        &self,
        id: ClientId,
        data: &ClientFormData,
    ) -> ServiceResult<Client> {
        self.source.update_client(id, data).await.map_err(|err| {
            log::error!("Failed to update client {id}: {err}");
            ServiceError::from(err)
        })
    }

    pub async fn delete_client(&self, id: ClientId) -> ServiceResult<()> {
        self.source.delete_client(id).await.map_err(|err| {
            log::error!("Failed to delete client {id}: {err}");
            ServiceError::from(err)
        })
    }

    /// Any failure reads as absence.
    pub async fn get_client(&self, id: ClientId) -> Option<Client> {
        match self.source.get_client_by_id(id).await {
            Ok(client) => Some(client),
            Err(err) => {
                log::warn!("Client {id} unavailable: {err}");
                None
            }
        }
    }

    /// Bounded suggestion list for the search box.
    pub async fn search_suggestions(&self, query: &str) -> ServiceResult<Vec<Client>> {
        match self.source.suggest_clients(query, self.suggestion_limit).await {
            Ok(clients) => Ok(clients),
            Err(err) => match &self.safety_net {
                Some(store) => {
                    log::warn!("Suggestion search failed, serving local data: {err}");
                    Ok(store.suggest(query, self.suggestion_limit))
                }
                None => Err(ServiceError::from(err)),
            },
        }
    }
}

#[async_trait]
impl<R> SuggestionSource for ClientListController<R>
where
    R: ClientRepository + ?Sized,
{
    async fn suggestions(&self, query: &str) -> ServiceResult<Vec<Client>> {
        self.search_suggestions(query).await
    }
}
