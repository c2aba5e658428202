//! Guest list as a flat table: the fixed export columns, CSV export and
//! CSV import.

use std::io::Read;

use anyhow::Result;
use invitr_types::api::{GuestResponse, NewGuest};
use serde::Serialize;
use thiserror::Error;

/// Column headers in export order.
pub const HEADERS: [&str; 8] = [
    "Name",
    "Email",
    "Phone",
    "RSVP Status",
    "Plus Ones",
    "Dietary Restrictions",
    "Notes",
    "RSVP Time",
];

const RSVP_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One exported row. Missing values become empty strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "RSVP Status")]
    pub rsvp_status: String,
    #[serde(rename = "Plus Ones")]
    pub plus_ones: u32,
    #[serde(rename = "Dietary Restrictions")]
    pub dietary_restrictions: String,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "RSVP Time")]
    pub rsvp_time: String,
}

impl From<&GuestResponse> for GuestRecord {
    fn from(guest: &GuestResponse) -> Self {
        Self {
            name: guest.name.clone(),
            email: guest.email.clone().unwrap_or_default(),
            phone: guest.phone.clone().unwrap_or_default(),
            rsvp_status: guest.rsvp_status.to_string(),
            plus_ones: guest.plus_one_count,
            dietary_restrictions: guest.dietary_restrictions.clone().unwrap_or_default(),
            notes: guest.notes.clone().unwrap_or_default(),
            rsvp_time: guest
                .rsvp_time
                .map(|t| t.format(RSVP_TIME_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }
}

impl GuestRecord {
    /// Cell values in [`HEADERS`] order.
    pub fn cells(&self) -> [String; 8] {
        [
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.rsvp_status.clone(),
            self.plus_ones.to_string(),
            self.dietary_restrictions.clone(),
            self.notes.clone(),
            self.rsvp_time.clone(),
        ]
    }
}

pub fn export_guests_csv(guests: &[GuestResponse]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if guests.is_empty() {
        writer.write_record(HEADERS)?;
    }
    for guest in guests {
        writer.serialize(GuestRecord::from(guest))?;
    }
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("CSV flush failed: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV must contain 'Name' column")]
    MissingNameColumn,
    #[error("Error importing CSV: {0}")]
    Malformed(#[from] csv::Error),
}

/// Reads guests from a CSV with a header row. Only `Name` is required;
/// `Email`, `Phone`, `Dietary Restrictions` and `Notes` are picked up when
/// present. Cells are trimmed and rows without a name are dropped.
pub fn import_guests_csv<R: Read>(input: R) -> Result<Vec<NewGuest>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let name_col = column("Name").ok_or(ImportError::MissingNameColumn)?;
    let email_col = column("Email");
    let phone_col = column("Phone");
    let dietary_col = column("Dietary Restrictions");
    let notes_col = column("Notes");

    let mut guests = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |col: Option<usize>| {
            col.and_then(|c| record.get(c))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let Some(name) = cell(Some(name_col)) else {
            continue;
        };
        guests.push(NewGuest {
            name,
            email: cell(email_col),
            phone: cell(phone_col),
            dietary_restrictions: cell(dietary_col),
            notes: cell(notes_col),
        });
    }

    Ok(guests)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use invitr_types::RsvpStatus;

    pub(crate) fn guest(name: &str, email: Option<&str>) -> GuestResponse {
        GuestResponse {
            id: format!("g-{name}"),
            name: name.into(),
            email: email.map(Into::into),
            phone: Some("555-0100".into()),
            rsvp_status: RsvpStatus::Pending,
            plus_one_count: 0,
            dietary_restrictions: None,
            notes: Some("Table 4, near the window".into()),
            unique_token: format!("tok-{name}"),
            invitation_sent: None,
            invitation_opened: None,
            rsvp_time: None,
        }
    }

    #[test]
    fn export_then_import_keeps_contact_details() {
        let guests = vec![guest("Ada Lovelace", Some("ada@example.com")), guest("Grace", None)];
        let csv = export_guests_csv(&guests).unwrap();
        assert!(csv.starts_with("Name,Email,Phone,RSVP Status,Plus Ones,Dietary Restrictions,Notes,RSVP Time"));

        let imported = import_guests_csv(csv.as_bytes()).unwrap();
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[0].name, "Ada Lovelace");
        assert_eq!(imported[0].email.as_deref(), Some("ada@example.com"));
        assert_eq!(imported[0].phone.as_deref(), Some("555-0100"));
        assert_eq!(imported[0].notes.as_deref(), Some("Table 4, near the window"));
        assert_eq!(imported[1].email, None);
    }

    #[test]
    fn import_requires_name_column() {
        let err = import_guests_csv("Email,Phone\nada@example.com,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::MissingNameColumn));
    }

    #[test]
    fn import_trims_and_skips_blank_names() {
        let input = "Phone,Name\n 123 ,  Ada  \n456,   \n,Grace\n";
        let imported = import_guests_csv(input.as_bytes()).unwrap();
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[0].name, "Ada");
        assert_eq!(imported[0].phone.as_deref(), Some("123"));
        assert_eq!(imported[1].phone, None);
    }

    #[test]
    fn empty_export_still_has_headers() {
        let csv = export_guests_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), HEADERS.join(","));
    }
}
