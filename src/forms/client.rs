use chrono::{Local, NaiveDate};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::domain::client::{Client, ClientFormData};
use crate::domain::types::{CUIT_PATTERN, ClientEmail, Cuit, PHONE_PATTERN, PhoneNumber};
use crate::forms::FieldErrors;

/// Message shown when a required field was left blank.
fn required_message(field: &str) -> &'static str {
    match field {
        "first_name" => "El nombre es obligatorio",
        "last_name" => "El apellido es obligatorio",
        "mobile_phone" => "El teléfono es obligatorio",
        "email" => "El email es obligatorio",
        "cuit" => "El CUIT es obligatorio",
        "business_name" => "La razón social es obligatoria",
        "birth_date" => "La fecha de nacimiento es obligatoria",
        _ => "Campo obligatorio",
    }
}

#[derive(Clone, Debug, Default, Deserialize, Validate, PartialEq, Eq)]
/// Raw values of the client create/edit dialog.
///
/// Validation runs once, on submit. Phone and CUIT are expected to have gone
/// through [`crate::forms::masks`] while typing.
pub struct ClientForm {
    #[validate(length(
        min = 2,
        max = 50,
        message = "El nombre debe tener entre 2 y 50 caracteres"
    ))]
    pub first_name: String,
    #[validate(length(
        min = 2,
        max = 50,
        message = "El apellido debe tener entre 2 y 50 caracteres"
    ))]
    pub last_name: String,
    #[validate(regex(
        path = *PHONE_PATTERN,
        message = "El teléfono debe seguir el formato: XX-XXXXXXXX"
    ))]
    pub mobile_phone: String,
    #[validate(email(message = "Ingresá una dirección de email válida"))]
    pub email: String,
    #[validate(regex(
        path = *CUIT_PATTERN,
        message = "El CUIT debe seguir el formato: XX-XXXXXXXX-X"
    ))]
    pub cuit: String,
    #[validate(length(
        min = 2,
        max = 100,
        message = "La razón social debe tener entre 2 y 100 caracteres"
    ))]
    pub business_name: String,
    /// `YYYY-MM-DD`.
    #[validate(length(min = 1, message = "La fecha de nacimiento es obligatoria"))]
    pub birth_date: String,
}

impl ClientForm {
    fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            mobile_phone: self.mobile_phone.trim().to_string(),
            email: self.email.trim().to_string(),
            cuit: self.cuit.trim().to_string(),
            business_name: self.business_name.trim().to_string(),
            birth_date: self.birth_date.trim().to_string(),
        }
    }

    fn value_of(&self, field: &str) -> &str {
        match field {
            "first_name" => &self.first_name,
            "last_name" => &self.last_name,
            "mobile_phone" => &self.mobile_phone,
            "email" => &self.email,
            "cuit" => &self.cuit,
            "business_name" => &self.business_name,
            "birth_date" => &self.birth_date,
            _ => "",
        }
    }

    fn collect_errors(&self, errors: &ValidationErrors) -> FieldErrors {
        let mut messages = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            let field = field.to_string();
            let message = if self.value_of(&field).is_empty() {
                required_message(&field).to_string()
            } else {
                field_errors
                    .iter()
                    .find_map(|err| err.message.as_ref().map(ToString::to_string))
                    .unwrap_or_else(|| "Valor inválido".to_string())
            };
            messages.insert(field, message);
        }
        messages
    }

    /// Checks every field and returns the typed submission payload, or one
    /// message per invalid field. Never fails in any other way.
    pub fn validate_form(&self) -> Result<ClientFormData, FieldErrors> {
        let form = self.trimmed();
        let mut errors = match form.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => form.collect_errors(&err),
        };

        let birth_date = if errors.contains_key("birth_date") {
            None
        } else {
            match parse_birth_date(&form.birth_date) {
                Ok(date) => Some(date),
                Err(message) => {
                    errors.insert("birth_date".to_string(), message.to_string());
                    None
                }
            }
        };

        // Pattern checks already passed above; these only guard the typed
        // constructors against drifting from the form rules.
        let mobile_phone = PhoneNumber::new(form.mobile_phone.as_str()).ok();
        let email = ClientEmail::new(form.email.as_str()).ok();
        let cuit = Cuit::new(form.cuit.as_str()).ok();

        match (mobile_phone, email, cuit, birth_date) {
            (Some(mobile_phone), Some(email), Some(cuit), Some(birth_date))
                if errors.is_empty() =>
            {
                Ok(ClientFormData {
                    first_name: form.first_name,
                    last_name: form.last_name,
                    mobile_phone,
                    email,
                    cuit,
                    business_name: form.business_name,
                    birth_date: Some(birth_date),
                })
            }
            (mobile_phone, email, cuit, _) => {
                if mobile_phone.is_none() {
                    errors
                        .entry("mobile_phone".to_string())
                        .or_insert_with(|| "El teléfono no es válido".to_string());
                }
                if email.is_none() {
                    errors
                        .entry("email".to_string())
                        .or_insert_with(|| "Ingresá una dirección de email válida".to_string());
                }
                if cuit.is_none() {
                    errors
                        .entry("cuit".to_string())
                        .or_insert_with(|| "El CUIT no es válido".to_string());
                }
                Err(errors)
            }
        }
    }
}

/// Parses a date-only value; a full timestamp is cut at `T`.
fn parse_birth_date(value: &str) -> Result<NaiveDate, &'static str> {
    let date_part = value.split('T').next().unwrap_or(value);
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| "La fecha de nacimiento no es válida")?;
    if date >= Local::now().date_naive() {
        return Err("La fecha de nacimiento debe ser anterior a hoy");
    }
    Ok(date)
}

impl From<&Client> for ClientForm {
    /// Prefills the edit dialog from an existing record.
    fn from(client: &Client) -> Self {
        Self {
            first_name: client.first_name.clone(),
            last_name: client.last_name.clone(),
            mobile_phone: client.mobile_phone.clone(),
            email: client.email.clone(),
            cuit: client.cuit.clone(),
            business_name: client.business_name.clone(),
            birth_date: client
                .birth_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}
