//! Clients page: ties the list controller to forms, selection and
//! notifications.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::forms::client::ClientForm;
use crate::notifications::{Notification, Notifier};
use crate::pagination::PageLinks;
use crate::repository::ClientRepository;
use crate::services::clients::{ClientListController, ClientListState};
use crate::services::search::SearchEvent;
use crate::services::{ServiceError, ServiceResult};

/// Header counters of the clients page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PageStats {
    pub total_clients: usize,
    /// One-based.
    pub current_page: usize,
    pub total_pages: usize,
    pub shown: usize,
}

pub struct ClientsPage<R: ?Sized> {
    controller: Arc<ClientListController<R>>,
    notifier: Arc<dyn Notifier>,
    selected: Option<Client>,
}

impl<R> ClientsPage<R>
where
    R: ClientRepository + ?Sized,
{
    pub fn new(controller: Arc<ClientListController<R>>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            controller,
            notifier,
            selected: None,
        }
    }

    pub fn controller(&self) -> &Arc<ClientListController<R>> {
        &self.controller
    }

    pub fn state(&self) -> ClientListState {
        self.controller.state()
    }

    /// Loads the current page and filter.
    pub async fn load(&self) {
        self.controller.refresh().await;
    }

    /// A new filter always starts from the first page.
    pub async fn search(&self, query: &str) {
        self.controller.fetch_page(0, Some(query)).await;
    }

    pub async fn change_page(&self, page: usize) {
        let query = self.controller.state().query;
        self.controller.fetch_page(page, Some(&query)).await;
    }

    pub async fn handle_search_event(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::Search(query) => self.search(&query).await,
            SearchEvent::Select(client) => self.view(client),
        }
    }

    pub fn view(&mut self, client: Client) {
        self.selected = Some(client);
    }

    pub fn back(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Client> {
        self.selected.as_ref()
    }

    /// Validates `form`, then creates a client or updates `editing`.
    ///
    /// Field errors are returned without notifying; other outcomes raise a
    /// notification and successful ones reload the current page.
    pub async fn submit_form(
        &mut self,
        form: &ClientForm,
        editing: Option<ClientId>,
    ) -> ServiceResult<Client> {
        let data = form.validate_form().map_err(ServiceError::Validation)?;

        let result = match editing {
            Some(id) => self.controller.update_client(id, &data).await,
            None => self.controller.create_client(&data).await,
        };

        match result {
            Ok(client) => {
                let (title, verb) = match editing {
                    Some(_) => ("Cliente actualizado", "actualizado"),
                    None => ("Cliente creado", "agregado"),
                };
                self.notifier.notify(Notification::success(
                    title,
                    format!(
                        "{} {} fue {verb} correctamente.",
                        data.first_name, data.last_name
                    ),
                ));
                if self.selected.as_ref().is_some_and(|s| s.id == client.id) {
                    self.selected = Some(client.clone());
                }
                self.controller.refresh().await;
                Ok(client)
            }
            Err(err) => {
                self.notifier.notify(Notification::error(
                    "Error",
                    err.user_message("Ocurrió un error inesperado."),
                ));
                Err(err)
            }
        }
    }

    pub async fn confirm_delete(&mut self, client: &Client) -> ServiceResult<()> {
        match self.controller.delete_client(client.id).await {
            Ok(()) => {
                self.notifier.notify(Notification::success(
                    "Cliente eliminado",
                    format!(
                        "{} {} fue eliminado correctamente.",
                        client.first_name, client.last_name
                    ),
                ));
                if self.selected.as_ref().is_some_and(|s| s.id == client.id) {
                    self.selected = None;
                }
                self.controller.refresh().await;
                Ok(())
            }
            Err(err) => {
                self.notifier.notify(Notification::error(
                    "Error",
                    err.user_message("No se pudo eliminar el cliente."),
                ));
                Err(err)
            }
        }
    }

    pub fn stats(&self) -> PageStats {
        match self.controller.state().response {
            Some(response) => PageStats {
                total_clients: response.total_elements,
                current_page: response.number + 1,
                total_pages: response.total_pages,
                shown: response.content.len(),
            },
            None => PageStats::default(),
        }
    }

    pub fn page_links(&self) -> Option<PageLinks> {
        self.controller
            .state()
            .response
            .as_ref()
            .and_then(PageLinks::new)
    }
}
