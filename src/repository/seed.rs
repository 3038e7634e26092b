//! Fixed sample records loaded into the fallback store.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::client::Client;
use crate::domain::types::ClientId;

/// first, last, phone, email, cuit, business, birth (y, m, d)
type SeedRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    (i32, u32, u32),
);

#[rustfmt::skip]
const SAMPLE_CLIENTS: &[SeedRow] = &[
    ("Juan", "Ovejero", "11-45678901", "juan.ovejero@email.com", "20-12345678-9", "Ovejero Consultores", (1985, 3, 14)),
    ("María", "González", "11-23456789", "maria.gonzalez@email.com", "27-23456789-0", "González & Asociados", (1990, 7, 22)),
    ("Carlos", "Fernández", "351-4567890", "carlos.fernandez@email.com", "20-34567890-1", "Fernández Logística SRL", (1978, 11, 5)),
    ("Lucía", "Martínez", "11-34567890", "lucia.martinez@email.com", "27-45678901-2", "Estudio Martínez", (1992, 1, 30)),
    ("Diego", "López", "261-5678901", "diego.lopez@email.com", "20-56789012-3", "López Agro SA", (1983, 9, 18)),
    ("Valentina", "Rodríguez", "11-56789012", "valentina.rodriguez@email.com", "27-67890123-4", "Rodríguez Diseño", (1995, 4, 9)),
    ("Martín", "Sánchez", "341-6789012", "martin.sanchez@email.com", "20-78901234-5", "Sánchez Construcciones", (1980, 12, 1)),
    ("Sofía", "Romero", "11-67890123", "sofia.romero@email.com", "27-89012345-6", "Romero Textil SRL", (1988, 6, 27)),
    ("Federico", "Díaz", "221-7890123", "federico.diaz@email.com", "20-90123456-7", "Díaz Software", (1991, 2, 13)),
    ("Camila", "Torres", "11-78901234", "camila.torres@email.com", "27-01234567-8", "Torres Eventos", (1997, 10, 3)),
    ("Nicolás", "Álvarez", "381-8901234", "nicolas.alvarez@email.com", "20-11223344-5", "Álvarez Transportes SA", (1975, 8, 21)),
    ("Agustina", "Ruiz", "11-89012345", "agustina.ruiz@email.com", "27-22334455-6", "Ruiz Marketing", (1993, 5, 16)),
];

fn seeded_at(day: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2024, 1, day).and_then(|date| date.and_hms_opt(9, 0, 0))
}

/// Sample records with ids `1..=12`, newest first like freshly created ones.
pub fn sample_clients() -> Vec<Client> {
    let mut clients: Vec<Client> = SAMPLE_CLIENTS
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let (first, last, phone, email, cuit, business, (y, m, d)) = *row;
            let position = u32::try_from(index).ok()? + 1;
            let id = ClientId::new(i64::from(position)).ok()?;
            Some(Client {
                id,
                first_name: first.to_string(),
                last_name: last.to_string(),
                mobile_phone: phone.to_string(),
                email: email.to_string(),
                cuit: cuit.to_string(),
                business_name: business.to_string(),
                birth_date: NaiveDate::from_ymd_opt(y, m, d),
                created_at: seeded_at(position),
                updated_at: seeded_at(position),
            })
        })
        .collect();
    clients.reverse();
    clients
}
