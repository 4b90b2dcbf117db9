//! SQLite schema definition.

/// Registration table.
///
/// Column names are those of the existing on-device files: `receipt` holds
/// the receipt number and `registration_date` the submission timestamp.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL CHECK (length(trim(first_name)) > 0),
    last_name TEXT NOT NULL CHECK (length(trim(last_name)) > 0),
    gender TEXT NOT NULL,
    birth_date TEXT,
    address TEXT,
    insurance TEXT NOT NULL,
    receipt TEXT NOT NULL CHECK (length(trim(receipt)) > 0),
    doctor_name TEXT,
    registration_date TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_required_columns_reject_blank() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO patients (first_name, last_name, gender, insurance, receipt, registration_date)
             VALUES ('  ', 'Orazow', 'male', 'present', '456', '01.01.2025 09:00')",
            [],
        );
        assert!(result.is_err());

        let result = conn.execute(
            "INSERT INTO patients (first_name, last_name, gender, insurance, receipt, registration_date)
             VALUES ('Maral', 'Orazow', 'female', 'present', '456', '01.01.2025 09:00')",
            [],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_created_at_defaults() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute(
            "INSERT INTO patients (first_name, last_name, gender, insurance, receipt, registration_date)
             VALUES ('Aman', 'Mammedow', 'male', 'present', '123', '01.01.2025 09:00')",
            [],
        )
        .unwrap();

        let created_at: Option<String> = conn
            .query_row("SELECT created_at FROM patients", [], |row| row.get(0))
            .unwrap();
        assert!(created_at.is_some());
    }
}
