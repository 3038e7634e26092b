//! Domain records exchanged with the record service.

pub mod client;
pub mod types;
