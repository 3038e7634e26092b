use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientEmail, ClientId, Cuit, PhoneNumber};

/// Customer record as returned by the record service.
///
/// The get-one endpoint answers with the service's raw entity, whose keys are
/// Spanish, so those are accepted as aliases.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    #[serde(alias = "nombre")]
    pub first_name: String,
    #[serde(alias = "apellido")]
    pub last_name: String,
    #[serde(alias = "telefonoCelular", default)]
    pub mobile_phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub cuit: String,
    #[serde(alias = "razonSocial", default)]
    pub business_name: String,
    /// Date-only; full timestamps are truncated when read.
    #[serde(
        alias = "fechaNacimiento",
        default,
        deserialize_with = "date_only::deserialize"
    )]
    pub birth_date: Option<NaiveDate>,
    #[serde(alias = "fechaCreacion", default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(alias = "fechaModificacion", default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Client {
    /// Builds a fresh record from submitted form data.
    pub fn from_form(id: ClientId, data: &ClientFormData, now: NaiveDateTime) -> Self {
        Self {
            id,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            mobile_phone: data.mobile_phone.to_string(),
            email: data.email.to_string(),
            cuit: data.cuit.to_string(),
            business_name: data.business_name.clone(),
            birth_date: data.birth_date,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Replaces every editable field, keeping the id and creation timestamp.
    pub fn replace_with(&mut self, data: &ClientFormData, now: NaiveDateTime) {
        self.first_name = data.first_name.clone();
        self.last_name = data.last_name.clone();
        self.mobile_phone = data.mobile_phone.to_string();
        self.email = data.email.to_string();
        self.cuit = data.cuit.to_string();
        self.business_name = data.business_name.clone();
        self.birth_date = data.birth_date;
        self.updated_at = Some(now);
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Caller-supplied fields accepted for create and update.
///
/// Only [`crate::forms::client::ClientForm`] validation produces this value in
/// application code, so the typed fields are already canonical.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientFormData {
    pub first_name: String,
    pub last_name: String,
    pub mobile_phone: PhoneNumber,
    pub email: ClientEmail,
    pub cuit: Cuit,
    pub business_name: String,
    #[serde(
        rename = "fechaNacimiento",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "date_only::deserialize"
    )]
    pub birth_date: Option<NaiveDate>,
}

mod date_only {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, de::Error};

    /// Accepts `YYYY-MM-DD` or any `YYYY-MM-DDT...` timestamp.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(None),
            Some(value) => {
                let date_part = value.split('T').next().unwrap_or(value);
                NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                    .map(Some)
                    .map_err(D::Error::custom)
            }
        }
    }
}
