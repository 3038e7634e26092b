use chrono::NaiveDate;

use clients_dashboard::domain::client::ClientFormData;
use clients_dashboard::domain::types::{ClientEmail, ClientId, Cuit, PhoneNumber};
use clients_dashboard::repository::errors::RepositoryError;
use clients_dashboard::repository::{ClientReader, ClientWriter, Pagination, RemoteRepository};

mod common;

use common::TestBackend;

fn form_data(email: &str) -> ClientFormData {
    ClientFormData {
        first_name: "Martín".into(),
        last_name: "Pérez".into(),
        mobile_phone: PhoneNumber::new("11-45678901").unwrap(),
        email: ClientEmail::new(email).unwrap(),
        cuit: Cuit::new("20-34567890-1").unwrap(),
        business_name: "Pérez Hnos".into(),
        birth_date: NaiveDate::from_ymd_opt(1988, 1, 31),
    }
}

#[actix_web::test]
async fn lists_requested_page() {
    let backend = TestBackend::start();
    let repo = backend.repository();

    let page = repo.list_clients(Pagination::new(1, 5)).await.unwrap();

    assert_eq!(page.number, 1);
    assert_eq!(page.size, 5);
    assert_eq!(page.total_elements, 12);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.content.len(), 5);
    assert!(!page.first && !page.last);
    backend.stop().await;
}

#[actix_web::test]
async fn gets_single_client() {
    let backend = TestBackend::start();
    let repo = backend.repository();
    let id = ClientId::new(4).unwrap();

    let client = repo.get_client_by_id(id).await.unwrap();

    assert_eq!(Some(client), backend.store.get(id));
    backend.stop().await;
}

#[actix_web::test]
async fn missing_client_carries_service_message() {
    let backend = TestBackend::start();
    let repo = backend.repository();

    let err = repo
        .get_client_by_id(ClientId::new(404).unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Cliente no encontrado");
    backend.stop().await;
}

#[actix_web::test]
async fn search_is_filtered_by_service() {
    let backend = TestBackend::start();
    let repo = backend.repository();

    let page = repo
        .search_clients("sa", Pagination::new(0, 10))
        .await
        .unwrap();

    assert_eq!(page.total_elements, 3);
    assert!(page.content.iter().all(|c| {
        let haystack =
            format!("{} {} {}", c.first_name, c.last_name, c.business_name).to_lowercase();
        haystack.contains("sa") || c.email.contains("sa")
    }));
    backend.stop().await;
}

#[actix_web::test]
async fn suggestions_are_capped() {
    let backend = TestBackend::start();
    let repo = backend.repository();

    let suggestions = repo.suggest_clients("email", 5).await.unwrap();

    assert_eq!(suggestions.len(), 5);
    backend.stop().await;
}

#[actix_web::test]
async fn create_update_delete_round() {
    let backend = TestBackend::start();
    let repo = backend.repository();

    let created = repo
        .create_client(&form_data("martin.perez@example.com"))
        .await
        .unwrap();
    assert_eq!(created.first_name, "Martín");
    assert_eq!(created.birth_date, NaiveDate::from_ymd_opt(1988, 1, 31));
    assert_eq!(backend.store.len(), 13);

    let mut changed = form_data("martin.perez@example.com");
    changed.business_name = "Pérez e Hijos".into();
    let updated = repo.update_client(created.id, &changed).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.business_name, "Pérez e Hijos");

    repo.delete_client(created.id).await.unwrap();
    assert!(backend.store.get(created.id).is_none());
    backend.stop().await;
}

#[actix_web::test]
async fn rejected_create_surfaces_body_message() {
    let backend = TestBackend::start();
    let repo = backend.repository();

    let err = repo
        .create_client(&form_data("juan.ovejero@email.com"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Email already exists");
    assert_eq!(backend.store.len(), 12);
    backend.stop().await;
}

#[actix_web::test]
async fn deleting_missing_client_fails() {
    let backend = TestBackend::start();
    let repo = backend.repository();

    let err = repo
        .delete_client(ClientId::new(99).unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    backend.stop().await;
}

#[actix_web::test]
async fn non_json_failure_falls_back_to_status() {
    let backend = TestBackend::start();
    let repo = backend.repository();
    backend.set_outage(true);

    let err = repo.list_clients(Pagination::new(0, 10)).await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), "HTTP error 503");
    backend.stop().await;
}

#[actix_web::test]
async fn unreachable_service_is_transport_error() {
    let repo =
        RemoteRepository::new("http://127.0.0.1:1", std::time::Duration::from_secs(2)).unwrap();

    let err = repo.list_clients(Pagination::new(0, 10)).await.unwrap_err();

    assert!(matches!(err, RepositoryError::Transport { status: None, .. }));
    assert!(err.to_string().starts_with("Connection error"));
}
