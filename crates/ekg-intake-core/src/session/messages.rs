//! User-facing text shown by the form.

use chrono::NaiveDateTime;

/// Confirmation after a successful save.
pub fn saved(display_name: &str) -> String {
    format!("Lukman {} üstünlikli hasaba alyndy!", display_name)
}

/// Failure after the store rejected a save.
pub fn save_failed(cause: &dyn std::fmt::Display) -> String {
    format!("Saklamakda ýalňyşlyk: {}", cause)
}

/// Status line shown under the form after a save.
pub fn last_saved_status(at: NaiveDateTime) -> String {
    format!("Soňky hasaba almak: {}", at.format("%H:%M:%S"))
}
