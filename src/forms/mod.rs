//! Form definitions backing the client create/edit dialog.

use std::collections::BTreeMap;

pub mod client;
pub mod masks;

/// Human-readable validation messages keyed by form field name.
pub type FieldErrors = BTreeMap<String, String>;
