//! Parsing delle date nelle celle importate

use chrono::{DateTime, NaiveDate};

/// Numero seriale Excel corrispondente al 1970-01-01
const EXCEL_UNIX_EPOCH_SERIAL: f64 = 25569.0;
const SECONDS_PER_DAY: f64 = 86400.0;

const DAY_FIRST_FORMATS: [&str; 3] = ["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y"];

/// Interpreta una cella come data di calendario.
///
/// Accetta `YYYY-MM-DD` (anche con suffisso orario), formati giorno-mese-anno
/// e seriali numerici Excel. `None` per celle vuote o non riconosciute.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(serial) = value.parse::<f64>() {
        return from_excel_serial(serial);
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    // "2024-03-01T10:00:00" / "2024-03-01 10:00"
    if let Some(prefix) = value.get(..10) {
        if value[10..].starts_with(['T', ' ']) {
            if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
                return Some(date);
            }
        }
    }

    DAY_FIRST_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Converte un seriale Excel (giorni dal 1899-12-30) nella data UTC
pub fn from_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial <= 0.0 {
        return None;
    }
    let seconds = ((serial - EXCEL_UNIX_EPOCH_SERIAL) * SECONDS_PER_DAY).round() as i64;
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
}
