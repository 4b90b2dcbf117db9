//! Editable form state and its normalization into a registration.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    compose_address, format_registration_timestamp, Gender, Insurance, LocalityType,
    NewRegistration,
};

/// Fields that must be non-blank before a save, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequiredField {
    FirstName,
    LastName,
    ReceiptNumber,
}

impl RequiredField {
    pub const ALL: [RequiredField; 3] = [
        RequiredField::FirstName,
        RequiredField::LastName,
        RequiredField::ReceiptNumber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::FirstName => "first_name",
            RequiredField::LastName => "last_name",
            RequiredField::ReceiptNumber => "receipt_number",
        }
    }

    /// Prompt asking the user to fill this field in.
    pub fn prompt(&self) -> &'static str {
        match self {
            RequiredField::FirstName => "Adyňyzy giriziň",
            RequiredField::LastName => "Familiýaňyzy giriziň",
            RequiredField::ReceiptNumber => "Kwitansiýa belgisini giriziň",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First required field found blank.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("required field missing: {missing_field}")]
pub struct ValidationError {
    pub missing_field: RequiredField,
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        self.missing_field.prompt()
    }
}

/// Current values of the intake form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: String,
    pub locality_type: LocalityType,
    pub locality_name: String,
    pub insurance: Insurance,
    pub receipt_number: String,
    pub doctor_name: String,
}

impl FormFields {
    /// Raw value of a required field.
    pub fn required(&self, field: RequiredField) -> &str {
        match field {
            RequiredField::FirstName => &self.first_name,
            RequiredField::LastName => &self.last_name,
            RequiredField::ReceiptNumber => &self.receipt_number,
        }
    }

    /// Fail on the first blank required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match RequiredField::ALL
            .into_iter()
            .find(|field| self.required(*field).trim().is_empty())
        {
            Some(missing_field) => Err(ValidationError { missing_field }),
            None => Ok(()),
        }
    }

    /// Normalize into a registration submitted at `at`.
    ///
    /// Text is trimmed; blank birth date and doctor name become `None`.
    pub fn to_registration(&self, at: NaiveDateTime) -> NewRegistration {
        NewRegistration {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            gender: self.gender,
            birth_date: non_blank(&self.birth_date),
            address: compose_address(self.locality_type, &self.locality_name),
            insurance: self.insurance,
            receipt_number: self.receipt_number.trim().to_string(),
            doctor_name: non_blank(&self.doctor_name),
            registration_timestamp: format_registration_timestamp(at),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
