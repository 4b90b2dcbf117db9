//! Registration database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{DbError, DbResult, Store};
use crate::models::{NewRegistration, PatientRecord};

impl Store {
    /// Append one registration inside a single transaction.
    ///
    /// Returns the id assigned by the store. On failure nothing is written.
    pub fn append(&self, registration: &NewRegistration) -> DbResult<i64> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO patients (
                first_name, last_name, gender, birth_date, address,
                insurance, receipt, doctor_name, registration_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                registration.first_name,
                registration.last_name,
                registration.gender.as_str(),
                registration.birth_date,
                registration.address,
                registration.insurance.as_str(),
                registration.receipt_number,
                registration.doctor_name,
                registration.registration_timestamp,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::info!(id, receipt = %registration.receipt_number, "registration appended");
        Ok(id)
    }

    /// Doctor name of the newest registration that has one.
    ///
    /// A failed lookup is not an error for the caller: the name is only a
    /// form default, so any failure resolves to `None`.
    pub fn last_clinician_name(&self) -> Option<String> {
        match self.try_last_clinician_name() {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(error = %e, "clinician name lookup failed, using no default");
                None
            }
        }
    }

    /// Fallible form of [`Store::last_clinician_name`].
    pub fn try_last_clinician_name(&self) -> DbResult<Option<String>> {
        let conn = self.connect()?;
        conn.query_row(
            r#"
            SELECT doctor_name
            FROM patients
            WHERE doctor_name IS NOT NULL AND trim(doctor_name) != ''
            ORDER BY id DESC
            LIMIT 1
            "#,
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(Into::into)
    }

    /// Read one stored registration by id.
    pub fn get_registration(&self, id: i64) -> DbResult<Option<PatientRecord>> {
        let conn = self.connect()?;
        conn.query_row(
            r#"
            SELECT id, first_name, last_name, gender, birth_date, address,
                   insurance, receipt, doctor_name, registration_date, created_at
            FROM patients
            WHERE id = ?
            "#,
            [id],
            RegistrationRow::from_row,
        )
        .optional()?
        .map(|row| row.try_into())
        .transpose()
    }

    /// Number of stored registrations.
    pub fn count_registrations(&self) -> DbResult<i64> {
        let conn = self.connect()?;
        let count = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
        Ok(count)
    }
}

/// Raw row before choice columns are parsed.
struct RegistrationRow {
    id: i64,
    first_name: String,
    last_name: String,
    gender: String,
    birth_date: Option<String>,
    address: Option<String>,
    insurance: String,
    receipt: String,
    doctor_name: Option<String>,
    registration_date: String,
    created_at: Option<String>,
}

impl RegistrationRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            gender: row.get(3)?,
            birth_date: row.get(4)?,
            address: row.get(5)?,
            insurance: row.get(6)?,
            receipt: row.get(7)?,
            doctor_name: row.get(8)?,
            registration_date: row.get(9)?,
            created_at: row.get(10)?,
        })
    }
}

impl TryFrom<RegistrationRow> for PatientRecord {
    type Error = DbError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        let gender = row.gender.parse().map_err(|_| DbError::InvalidValue {
            column: "gender",
            value: row.gender.clone(),
        })?;
        let insurance = row.insurance.parse().map_err(|_| DbError::InvalidValue {
            column: "insurance",
            value: row.insurance.clone(),
        })?;

        Ok(PatientRecord {
            id: row.id,
            registration: NewRegistration {
                first_name: row.first_name,
                last_name: row.last_name,
                gender,
                birth_date: row.birth_date,
                address: row.address.unwrap_or_default(),
                insurance,
                receipt_number: row.receipt,
                doctor_name: row.doctor_name,
                registration_timestamp: row.registration_date,
            },
            created_at: row.created_at.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Insurance};
    use rusqlite::Connection;

    fn setup_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("ekg_patients.db")).unwrap();
        (dir, store)
    }

    fn registration(first: &str, last: &str, receipt: &str, doctor: Option<&str>) -> NewRegistration {
        NewRegistration {
            first_name: first.into(),
            last_name: last.into(),
            gender: Gender::Male,
            birth_date: None,
            address: "city".into(),
            insurance: Insurance::Present,
            receipt_number: receipt.into(),
            doctor_name: doctor.map(Into::into),
            registration_timestamp: "01.02.2025 10:30".into(),
        }
    }

    #[test]
    fn test_append_and_get() {
        let (_dir, store) = setup_store();

        let mut reg = registration("Maral", "Orazowa", "456", Some("Dr. Nury"));
        reg.gender = Gender::Female;
        reg.birth_date = Some("1990.05.12".into());
        reg.address = "district, Ak bugdaý".into();
        reg.insurance = Insurance::Absent;

        let id = store.append(&reg).unwrap();
        let stored = store.get_registration(id).unwrap().unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.registration, reg);
        assert!(!stored.created_at.is_empty());
        assert_eq!(stored.display_name(), "Maral Orazowa");
    }

    #[test]
    fn test_ids_strictly_increase() {
        let (_dir, store) = setup_store();

        let first = store.append(&registration("Aman", "Mammedow", "1", None)).unwrap();
        let second = store.append(&registration("Maral", "Orazowa", "2", None)).unwrap();
        let third = store.append(&registration("Merdan", "Ataýew", "3", None)).unwrap();

        assert!(first < second && second < third);
        assert_eq!(store.count_registrations().unwrap(), 3);
    }

    #[test]
    fn test_get_missing() {
        let (_dir, store) = setup_store();
        assert!(store.get_registration(42).unwrap().is_none());
    }

    #[test]
    fn test_last_clinician_name_empty_store() {
        let (_dir, store) = setup_store();
        assert_eq!(store.last_clinician_name(), None);
        assert_eq!(store.try_last_clinician_name().unwrap(), None);
    }

    #[test]
    fn test_last_clinician_name_skips_blank() {
        let (_dir, store) = setup_store();

        store.append(&registration("Aman", "Mammedow", "1", Some("Dr. Nury"))).unwrap();
        store.append(&registration("Maral", "Orazowa", "2", None)).unwrap();
        store.append(&registration("Merdan", "Ataýew", "3", Some(""))).unwrap();

        assert_eq!(store.last_clinician_name(), Some("Dr. Nury".into()));

        store.append(&registration("Jeren", "Berdiýewa", "4", Some("Dr. Aýna"))).unwrap();
        assert_eq!(store.last_clinician_name(), Some("Dr. Aýna".into()));
    }

    #[test]
    fn test_constraint_violation_writes_nothing() {
        let (_dir, store) = setup_store();

        let result = store.append(&registration("", "Orazow", "456", None));
        assert!(matches!(result, Err(DbError::Constraint(_))));
        assert_eq!(store.count_registrations().unwrap(), 0);
    }

    #[test]
    fn test_lookup_failure_resolves_to_none() {
        let (_dir, store) = setup_store();
        store.append(&registration("Aman", "Mammedow", "1", Some("Dr. Nury"))).unwrap();

        let conn = Connection::open(store.path()).unwrap();
        conn.execute_batch("DROP TABLE patients").unwrap();
        drop(conn);

        assert!(store.try_last_clinician_name().is_err());
        assert_eq!(store.last_clinician_name(), None);
    }

    #[test]
    fn test_reads_label_valued_rows() {
        let (_dir, store) = setup_store();

        let conn = Connection::open(store.path()).unwrap();
        conn.execute(
            "INSERT INTO patients (first_name, last_name, gender, address, insurance, receipt, registration_date)
             VALUES ('Aman', 'Mammedow', 'erkek', 'şäher, Mary', 'ýok', '77', '01.01.2024 08:00')",
            [],
        )
        .unwrap();
        let id = conn.last_insert_rowid();
        drop(conn);

        let stored = store.get_registration(id).unwrap().unwrap();
        assert_eq!(stored.registration.gender, Gender::Male);
        assert_eq!(stored.registration.insurance, Insurance::Absent);
        assert_eq!(stored.registration.address, "şäher, Mary");
    }

    #[test]
    fn test_invalid_stored_choice() {
        let (_dir, store) = setup_store();

        let conn = Connection::open(store.path()).unwrap();
        conn.execute(
            "INSERT INTO patients (first_name, last_name, gender, insurance, receipt, registration_date)
             VALUES ('Aman', 'Mammedow', 'unknown', 'present', '77', '01.01.2024 08:00')",
            [],
        )
        .unwrap();
        let id = conn.last_insert_rowid();
        drop(conn);

        let result = store.get_registration(id);
        assert!(matches!(
            result,
            Err(DbError::InvalidValue { column: "gender", .. })
        ));
    }
}
