//! Input validators shared by every wizard and by the mock services.
//!
//! All validators are pure. Sanitizers normalize free-form input the way the
//! text fields do on every keystroke; validators decide whether the value may
//! be submitted.

use chrono::NaiveDate;
use std::collections::HashSet;

pub const PLATE_MIN_LEN: usize = 4;
pub const PLATE_MAX_LEN: usize = 12;
pub const PHONE_MIN_DIGITS: usize = 6;
pub const PHONE_MAX_DIGITS: usize = 15;

/// Longest parking session a single purchase may cover.
pub const MAX_SESSION_MINUTES: u32 = 24 * 60;

fn is_plate_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == ' '
}

/// Strips characters that are not letters, digits, hyphens or spaces and
/// uppercases the rest.
pub fn sanitize_plate(input: &str) -> String {
    input
        .chars()
        .filter(|c| is_plate_char(*c))
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Valid if the trimmed plate is 4-12 characters of letters, digits, hyphens
/// or spaces.
pub fn is_valid_plate(plate: &str) -> bool {
    let trimmed = plate.trim();
    let len = trimmed.chars().count();
    (PLATE_MIN_LEN..=PLATE_MAX_LEN).contains(&len) && trimmed.chars().all(is_plate_char)
}

/// Canonical form used to compare plates against saved vehicles.
pub fn normalize_plate(plate: &str) -> String {
    sanitize_plate(plate).trim().to_string()
}

fn digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Valid if the number has 6-15 digits (E.164 range). A leading `+` and any
/// separators are ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    let count = digits(phone).len();
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&count)
}

/// Formats a phone number for display.
///
/// Keeps a leading `+`, treats the first three digits after it as the country
/// code and groups the rest in chunks of three: `+385911234567` becomes
/// `+385 911 234 567`. Numbers without `+` are returned as bare digits.
pub fn format_phone(input: &str) -> String {
    let has_plus = input.trim_start().starts_with('+');
    let digits = digits(input);
    if digits.is_empty() {
        return if has_plus { "+".into() } else { String::new() };
    }
    if !has_plus {
        return digits;
    }
    if digits.len() <= 3 {
        return format!("+{digits}");
    }

    let (country, rest) = digits.split_at(3);
    let groups: Vec<&str> = rest
        .as_bytes()
        .chunks(3)
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .collect();
    format!("+{} {}", country, groups.join(" "))
}

/// Checks a lottery pick: exactly `count` distinct numbers in `1..=max`.
pub fn validate_pick(numbers: &[u8], count: u8, max: u8) -> Result<(), String> {
    if numbers.len() != count as usize {
        return Err(format!("Pick exactly {count} numbers"));
    }
    if let Some(n) = numbers.iter().find(|n| **n == 0 || **n > max) {
        return Err(format!("Number {n} is outside 1-{max}"));
    }
    let unique: HashSet<_> = numbers.iter().collect();
    if unique.len() != numbers.len() {
        return Err("Numbers must not repeat".to_string());
    }
    Ok(())
}

/// A vignette may start today or later.
pub fn validate_start_date(start: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if start < today {
        return Err(format!("Start date {start} is in the past"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plate_bounds() {
        assert!(is_valid_plate("ZG1234AB"));
        assert!(is_valid_plate("  ZG-123 A  "));
        assert!(is_valid_plate("ABCD"));
        assert!(is_valid_plate("ABCDEFGHIJKL"));
        assert!(!is_valid_plate("AB"));
        assert!(!is_valid_plate("THIS-PLATE-IS-WAY-TOO-LONG"));
        assert!(!is_valid_plate("ZG_1234"));
        assert!(!is_valid_plate("    "));
    }

    #[test]
    fn test_sanitize_plate() {
        assert_eq!(sanitize_plate("zg.12#34-ab"), "ZG1234-AB");
        assert_eq!(normalize_plate(" zg 1234 ab "), "ZG 1234 AB");
    }

    #[test]
    fn test_phone_digit_count() {
        assert!(is_valid_phone("+385911234567"));
        assert!(is_valid_phone("091 123 4567"));
        assert!(is_valid_phone("123456"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("+1234567890123456"));
        assert!(!is_valid_phone("+"));
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("+385911234567"), "+385 911 234 567");
        assert_eq!(format_phone("+38591"), "+385 91");
        assert_eq!(format_phone("0911234567"), "0911234567");
        assert_eq!(format_phone("+"), "+");
        assert_eq!(format_phone("+38"), "+38");
    }

    #[test]
    fn test_pick_validation() {
        assert!(validate_pick(&[1, 7, 12, 23, 34, 45], 6, 45).is_ok());
        assert!(validate_pick(&[1, 7, 12], 6, 45).is_err());
        assert!(validate_pick(&[1, 7, 12, 23, 34, 46], 6, 45).is_err());
        assert!(validate_pick(&[0, 7, 12, 23, 34, 45], 6, 45).is_err());
        assert!(validate_pick(&[7, 7, 12, 23, 34, 45], 6, 45).is_err());
    }

    #[test]
    fn test_start_date() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert!(validate_start_date(today, today).is_ok());
        assert!(validate_start_date(today.pred_opt().unwrap(), today).is_err());
    }
}
