//! EKG Intake Core Library
//!
//! Patient registration for an electrocardiography clinic: a single-screen
//! form whose submissions are appended to a local SQLite file.
//!
//! # Flow
//!
//! ```text
//! form values → validate → normalize → Store::append → reset
//!                                                        │
//!                                   doctor name ← Store::last_clinician_name
//! ```
//!
//! Records are append-only. Nothing is updated, deleted or searched.
//!
//! # Modules
//!
//! - [`db`]: the registration store
//! - [`models`]: registration records and fixed-choice fields
//! - [`session`]: form state, validation, save and reset
//! - [`config`]: store location

pub mod config;
pub mod db;
pub mod models;
pub mod session;

// Re-export commonly used types
pub use config::StoreConfig;
pub use db::{DbError, Store};
pub use models::{Gender, Insurance, LocalityType, NewRegistration, PatientRecord};
pub use session::{FormFields, FormSession, RequiredField, SaveError, SaveReceipt, ValidationError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

/// Errors carry text ready to show the user.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum IntakeError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Persistence(String),

    #[error("Session lock error: {0}")]
    Lock(String),
}

impl From<SaveError> for IntakeError {
    fn from(e: SaveError) -> Self {
        match e {
            SaveError::Validation(_) => IntakeError::Validation(e.user_message()),
            SaveError::Persistence(_) => IntakeError::Persistence(e.user_message()),
        }
    }
}

impl From<ValidationError> for IntakeError {
    fn from(e: ValidationError) -> Self {
        IntakeError::Validation(e.user_message().to_string())
    }
}

impl From<DbError> for IntakeError {
    fn from(e: DbError) -> Self {
        IntakeError::Persistence(session::messages::save_failed(&e))
    }
}

impl<T> From<std::sync::PoisonError<T>> for IntakeError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        IntakeError::Lock(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create the store at the given path and start a form session.
#[uniffi::export]
pub fn open_intake(path: String) -> Result<Arc<IntakeCore>, IntakeError> {
    let store = StoreConfig::new(path).open_store()?;
    Ok(Arc::new(IntakeCore {
        session: Mutex::new(FormSession::new(store)),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe form session for FFI.
#[derive(uniffi::Object)]
pub struct IntakeCore {
    session: Mutex<FormSession>,
}

#[uniffi::export]
impl IntakeCore {
    /// Current form values.
    pub fn fields(&self) -> Result<FfiFormFields, IntakeError> {
        let session = self.session.lock()?;
        Ok(session.fields().clone().into())
    }

    /// Replace the form values.
    pub fn set_fields(&self, fields: FfiFormFields) -> Result<(), IntakeError> {
        let mut session = self.session.lock()?;
        session.set_fields(fields.into());
        Ok(())
    }

    /// Check required fields without saving.
    pub fn validate(&self) -> Result<(), IntakeError> {
        let session = self.session.lock()?;
        session.validate()?;
        Ok(())
    }

    /// Save the current values and reset the form.
    pub fn save(&self) -> Result<FfiSaveReceipt, IntakeError> {
        let mut session = self.session.lock()?;
        let receipt = session.save()?;
        Ok(receipt.into())
    }

    /// Clear the form, keeping the remembered doctor name.
    pub fn reset(&self) -> Result<(), IntakeError> {
        let mut session = self.session.lock()?;
        session.reset();
        Ok(())
    }

    /// Status line to show under the form.
    pub fn status(&self) -> Result<String, IntakeError> {
        let session = self.session.lock()?;
        Ok(session.status().to_string())
    }

    pub fn remembered_doctor(&self) -> Result<Option<String>, IntakeError> {
        let session = self.session.lock()?;
        Ok(session.remembered_doctor().map(str::to_string))
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe form values.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiFormFields {
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

impl From<FormFields> for FfiFormFields {
    fn from(fields: FormFields) -> Self {
        Self {
            first_name: fields.first_name,
            last_name: fields.last_name,
            gender: fields.gender,
            birth_date: fields.birth_date,
            locality_type: fields.locality_type,
            locality_name: fields.locality_name,
            insurance: fields.insurance,
            receipt_number: fields.receipt_number,
            doctor_name: fields.doctor_name,
        }
    }
}

impl From<FfiFormFields> for FormFields {
    fn from(fields: FfiFormFields) -> Self {
        FormFields {
            first_name: fields.first_name,
            last_name: fields.last_name,
            gender: fields.gender,
            birth_date: fields.birth_date,
            locality_type: fields.locality_type,
            locality_name: fields.locality_name,
            insurance: fields.insurance,
            receipt_number: fields.receipt_number,
            doctor_name: fields.doctor_name,
        }
    }
}

/// FFI-safe save result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSaveReceipt {
    pub id: i64,
    pub display_name: String,
    pub message: String,
}

impl From<SaveReceipt> for FfiSaveReceipt {
    fn from(receipt: SaveReceipt) -> Self {
        Self {
            id: receipt.id,
            display_name: receipt.display_name,
            message: receipt.message,
        }
    }
}
