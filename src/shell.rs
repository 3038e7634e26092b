//! Session-wide dashboard shell: data source wiring, sidebar and search box.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::models::config::{DashboardConfig, DataSourceMode};
use crate::notifications::Notifier;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientSource, InMemoryRepository};
use crate::services::clients::ClientListController;
use crate::services::dashboard::ClientsPage;
use crate::services::search::{SearchEvent, SearchSuggestionController};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SidebarState {
    collapsed: bool,
}

impl SidebarState {
    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }
}

pub type ClientsController = ClientListController<ClientSource>;

pub struct DashboardShell {
    mode: DataSourceMode,
    store: Arc<InMemoryRepository>,
    page: ClientsPage<ClientSource>,
    search: SearchSuggestionController<ClientsController>,
    search_events: UnboundedReceiver<SearchEvent>,
    sidebar: SidebarState,
}

impl DashboardShell {
    /// Builds the configured data source and the controllers on top of it.
    ///
    /// The fallback store is created even in remote mode, where it backs
    /// failed suggestion lookups when `suggestion_fallback` is set.
    pub fn mount(config: &DashboardConfig, notifier: Arc<dyn Notifier>) -> RepositoryResult<Self> {
        let store = Arc::new(InMemoryRepository::seeded());
        let source = Arc::new(ClientSource::from_config(config, Arc::clone(&store))?);
        let mode = source.mode();

        let mut controller = ClientListController::new(source, config.page_size)
            .with_suggestion_limit(config.suggestion_limit);
        if mode == DataSourceMode::Remote && config.suggestion_fallback {
            controller = controller.with_suggestion_fallback(Arc::clone(&store));
        }
        let controller = Arc::new(controller);

        let (events, search_events) = mpsc::unbounded_channel();
        let search = SearchSuggestionController::new(
            Arc::clone(&controller),
            config.search_settings(),
            events,
        );

        log::info!("Dashboard mounted in {mode:?} mode");

        Ok(Self {
            mode,
            store,
            page: ClientsPage::new(controller, notifier),
            search,
            search_events,
            sidebar: SidebarState::default(),
        })
    }

    pub fn mode(&self) -> DataSourceMode {
        self.mode
    }

    /// The fallback store, shared with the data source in fallback mode.
    pub fn store(&self) -> &Arc<InMemoryRepository> {
        &self.store
    }

    pub fn page(&self) -> &ClientsPage<ClientSource> {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut ClientsPage<ClientSource> {
        &mut self.page
    }

    pub fn search(&mut self) -> &mut SearchSuggestionController<ClientsController> {
        &mut self.search
    }

    pub fn sidebar(&mut self) -> &mut SidebarState {
        &mut self.sidebar
    }

    /// Applies every search box event already queued.
    pub async fn pump_search_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.search_events.try_recv() {
            self.page.handle_search_event(event).await;
            handled += 1;
        }
        handled
    }

    /// Tears down the shell; pending debounce timers are cancelled.
    pub fn unmount(self) {
        log::info!("Dashboard unmounted");
    }
}
