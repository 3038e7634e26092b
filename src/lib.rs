//! Core of the clients dashboard: record validation, the remote record
//! service gateway, an in-memory fallback store and the controllers behind
//! the paginated, searchable client list.

pub mod domain;
pub mod forms;
pub mod models;
pub mod notifications;
pub mod pagination;
pub mod repository;
pub mod services;
pub mod shell;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const SUGGESTION_LIMIT: usize = 5;
pub const MIN_SUGGESTION_CHARS: usize = 2;
pub const SEARCH_DEBOUNCE_MS: u64 = 300;
