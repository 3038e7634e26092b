//! Stand-in record service for gateway tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde::Deserialize;
use serde_json::json;

use clients_dashboard::domain::client::ClientFormData;
use clients_dashboard::domain::types::ClientId;
use clients_dashboard::repository::errors::RepositoryError;
use clients_dashboard::repository::{InMemoryRepository, Pagination, RemoteRepository};

#[derive(Default)]
struct Outage {
    active: AtomicBool,
}

#[derive(Deserialize)]
struct PageParams {
    #[serde(default)]
    page: usize,
    #[serde(default = "default_size")]
    size: usize,
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    #[serde(default)]
    page: usize,
    #[serde(default = "default_size")]
    size: usize,
}

fn default_size() -> usize {
    10
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": "Cliente no encontrado" }))
}

fn unavailable(outage: &Outage) -> Option<HttpResponse> {
    outage.active.load(Ordering::SeqCst).then(|| {
        HttpResponse::ServiceUnavailable()
            .content_type("text/plain")
            .body("upstream down")
    })
}

fn parse_id(raw: i64) -> Option<ClientId> {
    ClientId::new(raw).ok()
}

fn email_taken(
    store: &InMemoryRepository,
    data: &ClientFormData,
    except: Option<ClientId>,
) -> bool {
    store
        .list(Some(data.email.as_str()), Pagination::new(0, usize::MAX))
        .content
        .iter()
        .any(|c| c.email == data.email.as_str() && Some(c.id) != except)
}

async fn list(
    store: web::Data<InMemoryRepository>,
    outage: web::Data<Outage>,
    params: web::Query<PageParams>,
) -> HttpResponse {
    if let Some(resp) = unavailable(&outage) {
        return resp;
    }
    HttpResponse::Ok().json(store.list(None, Pagination::new(params.page, params.size)))
}

async fn search(
    store: web::Data<InMemoryRepository>,
    outage: web::Data<Outage>,
    params: web::Query<SearchParams>,
) -> HttpResponse {
    if let Some(resp) = unavailable(&outage) {
        return resp;
    }
    HttpResponse::Ok().json(store.list(Some(&params.q), Pagination::new(params.page, params.size)))
}

async fn get_one(
    store: web::Data<InMemoryRepository>,
    outage: web::Data<Outage>,
    path: web::Path<i64>,
) -> HttpResponse {
    if let Some(resp) = unavailable(&outage) {
        return resp;
    }
    match parse_id(path.into_inner()).and_then(|id| store.get(id)) {
        Some(client) => HttpResponse::Ok().json(client),
        None => not_found(),
    }
}

async fn create(
    store: web::Data<InMemoryRepository>,
    outage: web::Data<Outage>,
    body: web::Json<ClientFormData>,
) -> HttpResponse {
    if let Some(resp) = unavailable(&outage) {
        return resp;
    }
    if email_taken(&store, &body, None) {
        return HttpResponse::BadRequest().json(json!({ "message": "Email already exists" }));
    }
    match store.insert(&body) {
        Ok(client) => HttpResponse::Created().json(client),
        Err(err) => HttpResponse::InternalServerError().json(json!({ "message": err.to_string() })),
    }
}

async fn update(
    store: web::Data<InMemoryRepository>,
    outage: web::Data<Outage>,
    path: web::Path<i64>,
    body: web::Json<ClientFormData>,
) -> HttpResponse {
    if let Some(resp) = unavailable(&outage) {
        return resp;
    }
    let Some(id) = parse_id(path.into_inner()) else {
        return not_found();
    };
    if email_taken(&store, &body, Some(id)) {
        return HttpResponse::BadRequest().json(json!({ "message": "Email already exists" }));
    }
    match store.replace(id, &body) {
        Ok(client) => HttpResponse::Ok().json(client),
        Err(RepositoryError::NotFound) => not_found(),
        Err(err) => HttpResponse::InternalServerError().json(json!({ "message": err.to_string() })),
    }
}

async fn delete(
    store: web::Data<InMemoryRepository>,
    outage: web::Data<Outage>,
    path: web::Path<i64>,
) -> HttpResponse {
    if let Some(resp) = unavailable(&outage) {
        return resp;
    }
    match parse_id(path.into_inner()).filter(|id| store.get(*id).is_some()) {
        Some(id) => {
            store.remove(id);
            HttpResponse::NoContent().finish()
        }
        None => not_found(),
    }
}

/// Record service serving the seeded store on an ephemeral local port.
pub struct TestBackend {
    pub base_url: String,
    pub store: Arc<InMemoryRepository>,
    outage: Arc<Outage>,
    handle: ServerHandle,
}

impl TestBackend {
    /// Must be called from within an actix system, e.g. `#[actix_web::test]`.
    pub fn start() -> Self {
        let store = Arc::new(InMemoryRepository::seeded());
        let outage = Arc::new(Outage::default());

        let store_data = web::Data::from(Arc::clone(&store));
        let outage_data = web::Data::from(Arc::clone(&outage));

        let server = HttpServer::new(move || {
            App::new()
                .app_data(store_data.clone())
                .app_data(outage_data.clone())
                .service(
                    web::scope("/api/clientes")
                        .route("", web::get().to(list))
                        .route("", web::post().to(create))
                        .route("/search", web::get().to(search))
                        .route("/{id}", web::get().to(get_one))
                        .route("/{id}", web::put().to(update))
                        .route("/{id}", web::delete().to(delete)),
                )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{addr}"),
            store,
            outage,
            handle,
        }
    }

    pub fn repository(&self) -> RemoteRepository {
        RemoteRepository::new(self.base_url.clone(), Duration::from_secs(5)).unwrap()
    }

    /// While set, every route answers 503 with a plain-text body.
    pub fn set_outage(&self, active: bool) {
        self.outage.active.store(active, Ordering::SeqCst);
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}
