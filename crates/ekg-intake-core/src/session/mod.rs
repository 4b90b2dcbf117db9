//! Form session: one in-progress registration.
//!
//! The session owns the form values, validates and normalizes them, hands
//! the result to the [`Store`], and resets itself after each successful
//! save. The doctor name of the last saved registration is remembered and
//! pre-filled on every reset.

mod fields;
pub mod messages;

pub use fields::*;

use chrono::{Local, NaiveDateTime};
use thiserror::Error;

use crate::db::{DbError, Store};
use crate::models::NewRegistration;

/// Why a save did not happen.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to save registration: {0}")]
    Persistence(#[from] DbError),
}

impl SaveError {
    /// Text to show the user.
    pub fn user_message(&self) -> String {
        match self {
            SaveError::Validation(e) => e.user_message().to_string(),
            SaveError::Persistence(e) => messages::save_failed(e),
        }
    }
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    /// Id assigned by the store
    pub id: i64,
    /// "{first_name} {last_name}"
    pub display_name: String,
    /// Confirmation text to show the user
    pub message: String,
}

/// In-memory state of the intake form.
pub struct FormSession {
    store: Store,
    fields: FormFields,
    remembered_doctor: Option<String>,
    status: String,
}

impl FormSession {
    /// Start a session, pre-filling the doctor name from the store.
    pub fn new(store: Store) -> Self {
        let remembered_doctor = store.last_clinician_name();
        let fields = FormFields {
            doctor_name: remembered_doctor.clone().unwrap_or_default(),
            ..Default::default()
        };
        Self {
            store,
            fields,
            remembered_doctor,
            status: String::new(),
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    pub fn set_fields(&mut self, fields: FormFields) {
        self.fields = fields;
    }

    /// Doctor name pre-filled on reset, if any.
    pub fn remembered_doctor(&self) -> Option<&str> {
        self.remembered_doctor.as_deref()
    }

    /// Status line; empty until the first save after a reset.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.fields.validate()
    }

    /// Normalized registration stamped with the current local time.
    pub fn to_record(&self) -> NewRegistration {
        self.to_record_at(Local::now().naive_local())
    }

    pub fn to_record_at(&self, now: NaiveDateTime) -> NewRegistration {
        self.fields.to_registration(now)
    }

    /// Validate, append, then reset.
    ///
    /// On any error the form values are left as they were so the user can
    /// retry.
    pub fn save(&mut self) -> Result<SaveReceipt, SaveError> {
        self.save_at(Local::now().naive_local())
    }

    /// [`FormSession::save`] with an explicit submission time.
    pub fn save_at(&mut self, now: NaiveDateTime) -> Result<SaveReceipt, SaveError> {
        if let Err(e) = self.validate() {
            tracing::debug!(field = %e.missing_field, "registration rejected");
            return Err(e.into());
        }

        let record = self.to_record_at(now);
        let id = self.store.append(&record).map_err(|e| {
            tracing::warn!(error = %e, "registration could not be saved");
            SaveError::Persistence(e)
        })?;

        if let Some(doctor) = &record.doctor_name {
            self.remembered_doctor = Some(doctor.clone());
        }
        self.reset();
        self.status = messages::last_saved_status(now);

        let display_name = record.display_name();
        Ok(SaveReceipt {
            id,
            message: messages::saved(&display_name),
            display_name,
        })
    }

    /// Clear the form to its defaults, keeping the remembered doctor name.
    pub fn reset(&mut self) {
        if let Some(name) = self.store.last_clinician_name() {
            self.remembered_doctor = Some(name);
        }
        self.fields = FormFields {
            doctor_name: self.remembered_doctor.clone().unwrap_or_default(),
            ..Default::default()
        };
        self.status.clear();
    }
}
