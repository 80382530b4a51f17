//! Utilidades de validación
//!
//! Este módulo contiene los helpers de parseo y validación compartidos por
//! los controllers y el motor de asignaciones.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Formatos aceptados: XXX1111 o XXX1X11 (placa Mercosur).
    static ref PLATE_PATTERN: Regex =
        Regex::new("[A-Z]{3}[0-9][0-9A-Z][0-9]{2}").expect("plate pattern is a valid regex");
}

/// Validar el formato de una placa
pub fn valid_plate(plate: &str) -> bool {
    PLATE_PATTERN.is_match(plate)
}

/// Parsear un timestamp con los formatos que aceptaba `Date.parse`:
/// RFC 3339, fecha y hora separadas por `T` o espacio, o fecha sola.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    None
}

/// Formatear un timestamp para mensajes al usuario
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_plate() {
        assert!(valid_plate("ABC1234"));
        assert!(valid_plate("ABC1D23"));
        assert!(!valid_plate("abc1234"));
        assert!(!valid_plate("AB12345"));
        assert!(!valid_plate("ABCD123"));
        assert!(!valid_plate(""));
    }

    #[test]
    fn test_parse_datetime_date_only() {
        let parsed = parse_datetime("2022-01-01").expect("date-only parses");
        assert_eq!(format_datetime(parsed), "2022-01-01 00:00:00");
    }

    #[test]
    fn test_parse_datetime_rfc3339() {
        let parsed = parse_datetime("2022-01-01T10:30:00Z").expect("rfc3339 parses");
        assert_eq!(format_datetime(parsed), "2022-01-01 10:30:00");

        let offset = parse_datetime("2022-01-01T10:30:00-03:00").expect("offset parses");
        assert_eq!(format_datetime(offset), "2022-01-01 13:30:00");
    }

    #[test]
    fn test_parse_datetime_naive() {
        assert!(parse_datetime("2022-01-01T10:30:00").is_some());
        assert!(parse_datetime("2022-01-01 10:30:00").is_some());
    }

    #[test]
    fn test_parse_datetime_invalid() {
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("not-a-date").is_none());
        assert!(parse_datetime("2022/01/01").is_none());
        assert!(parse_datetime("2022-13-01").is_none());
    }
}
