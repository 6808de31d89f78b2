//! Display formatters for employee data

use chrono::{Datelike, NaiveDate};

/// Lowercase everything, then uppercase the first letter of every word
///
/// Letters following a non-alphanumeric character start a new word, so
/// hyphenated and apostrophized names are handled too.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphanumeric() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

pub fn full_name(nombre: &str, apellido: &str, segundo_apellido: Option<&str>) -> String {
    let mut parts = vec![nombre, apellido];
    if let Some(segundo) = segundo_apellido
        && !segundo.trim().is_empty()
    {
        parts.push(segundo);
    }
    parts.join(" ")
}

/// `RUT: 12.345.678-9` for Chilean RUTs, `EXT: …` for anything else
///
/// A RUT here is 8-9 characters of digits with an optional trailing K,
/// whose body starts with 1..=35 (two leading digits).
pub fn format_rut(numero_documento: &str) -> String {
    if numero_documento.is_empty() {
        return String::new();
    }
    let ext = || format!("EXT: {numero_documento}");

    let digits = numero_documento
        .strip_suffix(['k', 'K'])
        .unwrap_or(numero_documento);
    let valid_format = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());
    let len = numero_documento.len();
    if !valid_format || !(8..=9).contains(&len) {
        return ext();
    }

    let (body, dv) = numero_documento.split_at(len - 1);
    let lead: u32 = body
        .get(..2.min(body.len()))
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    if !(1..=35).contains(&lead) {
        return ext();
    }

    format!("RUT: {}-{}", group_thousands(body), dv)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Completed years between `birth` and `today`, never negative
pub fn edad_from(birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

/// Chilean phone display: `+56 9 1234 5678`, `+56 2 1234 5678` for
/// eight-digit landlines, `Ext: …` for foreign numbers
pub fn format_phone_cl(phone: &str) -> String {
    if phone.is_empty() {
        return String::new();
    }
    if let Some(digits) = phone.strip_prefix("+56") {
        if digits.len() == 9 && digits.starts_with('9') && digits.is_ascii() {
            return format!("+56 9 {} {}", &digits[1..5], &digits[5..]);
        }
        if digits.len() == 8 && digits.is_ascii() {
            return format!("+56 2 {} {}", &digits[..4], &digits[4..]);
        }
        return phone.to_string();
    }

    let cleaned = crate::util::digits_only(phone);
    if cleaned.len() == 9 && cleaned.starts_with('9') {
        return format!("+56 9 {} {}", &cleaned[1..5], &cleaned[5..]);
    }
    format!("Ext: {phone}")
}

/// `dd-mm-yyyy`
pub fn format_date_cl(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("MARÍA elena"), "María Elena");
        assert_eq!(title_case("josé  PÉREZ"), "José  Pérez");
        assert_eq!(title_case("ana-maría o'higgins"), "Ana-María O'Higgins");
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("juan "), "Juan ");
    }

    #[test]
    fn test_full_name() {
        assert_eq!(full_name("Ana", "Rojas", None), "Ana Rojas");
        assert_eq!(full_name("Ana", "Rojas", Some("  ")), "Ana Rojas");
        assert_eq!(full_name("Ana", "Rojas", Some("Soto")), "Ana Rojas Soto");
    }

    #[test]
    fn test_format_rut() {
        assert_eq!(format_rut("123456789"), "RUT: 12.345.678-9");
        assert_eq!(format_rut("12345678"), "RUT: 1.234.567-8");
        assert_eq!(format_rut("12345678K"), "RUT: 12.345.678-K");
        assert_eq!(format_rut("9876543210"), "EXT: 9876543210");
        assert_eq!(format_rut("AB123456"), "EXT: AB123456");
        // body must start with 1..=35
        assert_eq!(format_rut("487654321"), "EXT: 487654321");
        assert_eq!(format_rut(""), "");
    }

    #[test]
    fn test_edad_from() {
        let birth = NaiveDate::from_ymd_opt(1990, 5, 17).unwrap();
        let before = NaiveDate::from_ymd_opt(2024, 5, 16).unwrap();
        let on = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        assert_eq!(edad_from(birth, before), 33);
        assert_eq!(edad_from(birth, on), 34);
        assert_eq!(edad_from(on, birth), 0);
    }

    #[test]
    fn test_format_phone_cl() {
        assert_eq!(format_phone_cl("+56912345678"), "+56 9 1234 5678");
        assert_eq!(format_phone_cl("+5622345678"), "+56 2 2234 5678");
        assert_eq!(format_phone_cl("+561234"), "+561234");
        assert_eq!(format_phone_cl("912345678"), "+56 9 1234 5678");
        assert_eq!(format_phone_cl("+5491123456789"), "Ext: +5491123456789");
        assert_eq!(format_phone_cl(""), "");
    }

    #[test]
    fn test_format_date_cl() {
        let d = NaiveDate::from_ymd_opt(1990, 5, 7).unwrap();
        assert_eq!(format_date_cl(d), "07-05-1990");
    }
}
