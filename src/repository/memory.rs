//! Process-local fallback store used when the record service is unavailable.
//!
//! Never synchronized with the remote service.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::client::{Client, ClientFormData};
use crate::domain::types::ClientId;
use crate::pagination::PaginatedResponse;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::seed::sample_clients;
use crate::repository::{ClientReader, ClientWriter, Pagination};

#[derive(Debug)]
struct StoreState {
    /// Newest first.
    clients: Vec<Client>,
    /// Monotonic; ids are never reused after a delete.
    next_id: i64,
}

#[derive(Debug)]
pub struct InMemoryRepository {
    state: Mutex<StoreState>,
}

/// Case-insensitive match used by listings; CUIT is compared verbatim.
fn matches_listing(client: &Client, needle_lower: &str, needle: &str) -> bool {
    matches_suggestion(client, needle_lower) || client.cuit.contains(needle)
}

/// Case-insensitive match over names, email and business name.
fn matches_suggestion(client: &Client, needle_lower: &str) -> bool {
    [
        &client.first_name,
        &client.last_name,
        &client.email,
        &client.business_name,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle_lower))
}

impl InMemoryRepository {
    pub fn new(clients: Vec<Client>) -> Self {
        let next_id = clients.iter().map(|c| c.id.get()).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(StoreState { clients, next_id }),
        }
    }

    /// Store loaded with the fixed sample dataset.
    pub fn seeded() -> Self {
        Self::new(sample_clients())
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pages through the records, optionally filtered by `search`.
    pub fn list(&self, search: Option<&str>, pagination: Pagination) -> PaginatedResponse<Client> {
        let state = self.lock();
        let filtered: Vec<Client> = match search.filter(|s| !s.is_empty()) {
            Some(needle) => {
                let needle_lower = needle.to_lowercase();
                state
                    .clients
                    .iter()
                    .filter(|c| matches_listing(c, &needle_lower, needle))
                    .cloned()
                    .collect()
            }
            None => state.clients.clone(),
        };
        PaginatedResponse::slice(filtered, pagination.page, pagination.size)
    }

    /// At most `limit` matches, without a page envelope.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<Client> {
        let needle_lower = query.to_lowercase();
        self.lock()
            .clients
            .iter()
            .filter(|c| matches_suggestion(c, &needle_lower))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn get(&self, id: ClientId) -> Option<Client> {
        self.lock().clients.iter().find(|c| c.id == id).cloned()
    }

    pub fn insert(&self, data: &ClientFormData) -> RepositoryResult<Client> {
        let mut state = self.lock();
        let id = ClientId::new(state.next_id)?;
        state.next_id += 1;

        let client = Client::from_form(id, data, Utc::now().naive_utc());
        state.clients.insert(0, client.clone());
        Ok(client)
    }

    pub fn replace(&self, id: ClientId, data: &ClientFormData) -> RepositoryResult<Client> {
        let mut state = self.lock();
        let client = state
            .clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)?;
        client.replace_with(data, Utc::now().naive_utc());
        Ok(client.clone())
    }

    /// Removing an unknown id is a no-op.
    pub fn remove(&self, id: ClientId) {
        self.lock().clients.retain(|c| c.id != id);
    }

    pub fn len(&self) -> usize {
        self.lock().clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl ClientReader for InMemoryRepository {
    async fn list_clients(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<PaginatedResponse<Client>> {
        Ok(self.list(None, pagination))
    }

    async fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Client> {
        self.get(id).ok_or(RepositoryError::NotFound)
    }

    async fn search_clients(
        &self,
        query: &str,
        pagination: Pagination,
    ) -> RepositoryResult<PaginatedResponse<Client>> {
        Ok(self.list(Some(query), pagination))
    }

    async fn suggest_clients(&self, query: &str, limit: usize) -> RepositoryResult<Vec<Client>> {
        Ok(self.suggest(query, limit))
    }
}

#[async_trait]
impl ClientWriter for InMemoryRepository {
    async fn create_client(&self, data: &ClientFormData) -> RepositoryResult<Client> {
        self.insert(data)
    }

    async fn update_client(&self, id: ClientId, data: &ClientFormData) -> RepositoryResult<Client> {
        self.replace(id, data)
    }

    async fn delete_client(&self, id: ClientId) -> RepositoryResult<()> {
        self.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::{ClientEmail, Cuit, PhoneNumber};

    fn form_data(first_name: &str, email: &str) -> ClientFormData {
        ClientFormData {
            first_name: first_name.into(),
            last_name: "Pérez".into(),
            mobile_phone: PhoneNumber::new("11-45678901").unwrap(),
            email: ClientEmail::new(email).unwrap(),
            cuit: Cuit::new("20-99887766-5").unwrap(),
            business_name: "Acme SRL".into(),
            birth_date: NaiveDate::from_ymd_opt(1988, 1, 31),
        }
    }

    fn sorted_ids(page: &PaginatedResponse<Client>) -> Vec<i64> {
        let mut ids: Vec<i64> = page.content.iter().map(|c| c.id.get()).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn listing_counts_whole_dataset() {
        let store = InMemoryRepository::seeded();
        let page = store.list(None, Pagination::new(1, 5));

        assert_eq!(page.total_elements, 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.content.len(), 5);
        assert_eq!(page.number, 1);
    }

    #[test]
    fn listing_filter_is_case_insensitive_and_covers_cuit() {
        let store = InMemoryRepository::seeded();

        let by_name = store.list(Some("GONZÁLEZ"), Pagination::new(0, 10));
        assert_eq!(by_name.total_elements, 1);
        assert_eq!(by_name.content[0].first_name, "María");

        let by_cuit = store.list(Some("34567890"), Pagination::new(0, 10));
        assert_eq!(by_cuit.total_elements, 1);
        assert_eq!(by_cuit.content[0].last_name, "Fernández");
    }

    #[test]
    fn suggestions_skip_cuit_and_cap_at_limit() {
        let store = InMemoryRepository::seeded();

        assert!(store.suggest("34567890", 5).is_empty());
        assert_eq!(store.suggest("email.com", 5).len(), 5);
        assert_eq!(store.suggest("ovejero", 5).len(), 1);
    }

    #[test]
    fn create_prepends_with_fresh_timestamps() {
        let store = InMemoryRepository::seeded();
        let created = store.insert(&form_data("Martín", "m@x.com")).unwrap();

        assert_eq!(created.id.get(), 13);
        assert_eq!(created.created_at, created.updated_at);
        assert!(created.created_at.is_some());

        let first = store.list(None, Pagination::new(0, 10)).content.remove(0);
        assert_eq!(first, created);
    }

    #[test]
    fn create_then_delete_restores_listing() {
        let store = InMemoryRepository::seeded();
        let before = store.list(None, Pagination::new(0, 100));

        let created = store.insert(&form_data("Martín", "m@x.com")).unwrap();
        store.remove(created.id);

        let after = store.list(None, Pagination::new(0, 100));
        assert_eq!(sorted_ids(&before), sorted_ids(&after));
        assert_eq!(before.total_elements, after.total_elements);
    }

    #[test]
    fn ids_are_never_reused() {
        let store = InMemoryRepository::seeded();
        let a = store.insert(&form_data("Ana", "a@x.com")).unwrap();
        store.remove(a.id);
        let b = store.insert(&form_data("Beto", "b@x.com")).unwrap();

        assert!(b.id > a.id);
    }

    #[test]
    fn ids_start_after_highest_seeded_id() {
        let store = InMemoryRepository::new(Vec::new());
        let created = store.insert(&form_data("Ana", "a@x.com")).unwrap();

        assert_eq!(created.id.get(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_replaces_fields_and_keeps_creation_time() {
        let store = InMemoryRepository::seeded();
        let id = ClientId::new(1).unwrap();
        let original = store.get(id).unwrap();

        let updated = store.replace(id, &form_data("Juana", "juana@x.com")).unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.first_name, "Juana");
        assert_eq!(updated.email, "juana@x.com");
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
    }

    #[test]
    fn update_of_missing_id_is_not_found() {
        let store = InMemoryRepository::seeded();
        let result = store.replace(ClientId::new(999).unwrap(), &form_data("Ana", "a@x.com"));

        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[test]
    fn delete_of_missing_id_is_silent() {
        let store = InMemoryRepository::seeded();
        store.remove(ClientId::new(999).unwrap());

        assert_eq!(store.len(), 12);
    }

    #[tokio::test]
    async fn trait_get_reports_missing_record() {
        let store = InMemoryRepository::seeded();
        let result = store.get_client_by_id(ClientId::new(77).unwrap()).await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn out_of_range_page_is_empty_and_last() {
        let store = InMemoryRepository::seeded();
        let page = store
            .list_clients(Pagination::new(usize::MAX, 10))
            .await
            .unwrap();

        assert!(page.content.is_empty());
        assert!(page.last);
        assert_eq!(page.total_elements, 12);
    }
}
