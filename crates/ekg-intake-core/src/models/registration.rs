//! Patient registration records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::choices::{Gender, Insurance, LocalityType};

/// Format of `registration_timestamp`, e.g. `07.03.2025 14:05`.
pub const REGISTRATION_TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// A normalized registration, ready to be appended to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewRegistration {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    /// Free-form date as typed; `None` when left blank
    pub birth_date: Option<String>,
    /// `"{locality_type}, {locality_name}"` or just the locality type
    pub address: String,
    pub insurance: Insurance,
    pub receipt_number: String,
    /// `None` when left blank
    pub doctor_name: Option<String>,
    /// Submission time in [`REGISTRATION_TIMESTAMP_FORMAT`]
    pub registration_timestamp: String,
}

/// A stored registration row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientRecord {
    /// Surrogate key assigned by the store
    pub id: i64,
    #[serde(flatten)]
    pub registration: NewRegistration,
    /// Insert time assigned by the store
    pub created_at: String,
}

impl PatientRecord {
    /// "{first_name} {last_name}"
    pub fn display_name(&self) -> String {
        self.registration.display_name()
    }
}

impl NewRegistration {
    /// "{first_name} {last_name}"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Compose the stored address from its two form fields.
///
/// A blank locality name yields the bare locality type, with no trailing
/// separator.
pub fn compose_address(locality_type: LocalityType, locality_name: &str) -> String {
    let name = locality_name.trim();
    if name.is_empty() {
        locality_type.as_str().to_string()
    } else {
        format!("{}, {}", locality_type.as_str(), name)
    }
}

/// Render a submission time the way it is stored.
pub fn format_registration_timestamp(at: NaiveDateTime) -> String {
    at.format(REGISTRATION_TIMESTAMP_FORMAT).to_string()
}
