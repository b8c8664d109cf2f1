use crate::config::MAX_DECIMAL_PLACES;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

// Anything a numeric field may not contain
static NON_NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.-]").unwrap());

// Enough fractional digits to print any finite f64 exactly (2^-1074).
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Number formatting error types
#[derive(Debug, Clone, PartialEq)]
pub enum NumberFormatError {
    NotANumber(String),
    NonFinite(f64),
    TooManyDecimals(usize),
}

impl std::fmt::Display for NumberFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberFormatError::NotANumber(input) => write!(f, "'{}' is not a number", input),
            NumberFormatError::NonFinite(value) => write!(f, "Cannot format non-finite value {}", value),
            NumberFormatError::TooManyDecimals(places) => write!(
                f,
                "Invalid decimal places: {} (must be 0-{})",
                places, MAX_DECIMAL_PLACES
            ),
        }
    }
}

impl std::error::Error for NumberFormatError {}

/// Format `value` with exactly `decimal_places` fractional digits.
///
/// Rounds half away from zero on the exact binary value, which yields the
/// same digits browsers print for `toFixed`.
///
/// # Examples
/// ```
/// use calclab_form::utils::format_number;
/// assert_eq!(format_number(3.14159, 2).unwrap(), "3.14");
/// assert_eq!(format_number(5.0, 0).unwrap(), "5");
/// assert_eq!(format_number(2.5, 0).unwrap(), "3");
/// ```
pub fn format_number(value: f64, decimal_places: usize) -> Result<String, NumberFormatError> {
    if decimal_places > MAX_DECIMAL_PLACES {
        return Err(NumberFormatError::TooManyDecimals(decimal_places));
    }
    if !value.is_finite() {
        return Err(NumberFormatError::NonFinite(value));
    }

    // -0.0 is not negative here, so it prints as plain zero
    let negative = value < 0.0;
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimal_places))
        .collect();

    let round_up = frac_part
        .as_bytes()
        .get(decimal_places)
        .is_some_and(|d| *d >= b'5');
    if round_up {
        let mut carried = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carried = false;
                break;
            }
        }
        if carried {
            digits.insert(0, b'1');
        }
    }

    let int_len = digits.len() - decimal_places;
    let mut out = String::with_capacity(digits.len() + 2);
    if negative {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|&d| d as char));
    if decimal_places > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|&d| d as char));
    }
    Ok(out)
}

/// Parse field text, then format it like [`format_number`].
pub fn format_number_str(input: &str, decimal_places: usize) -> Result<String, NumberFormatError> {
    let value = parse_number(input).ok_or_else(|| NumberFormatError::NotANumber(input.to_string()))?;
    format_number(value, decimal_places)
}

/// Numeric value of `input` under the browser's string-to-number rules.
///
/// Blank text is zero, `Infinity` is accepted with an optional sign, and
/// unsigned `0x`/`0o`/`0b` literals are integers. `None` stands for NaN.
pub fn coerce_number(input: &str) -> Option<f64> {
    let trimmed = input.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return Some(0.0);
    }
    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
        });
    }

    // f64::from_str also takes "inf" and "nan", which are not numbers here
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Parse a field value into a finite number; blank text is not a number here.
pub fn parse_number(input: &str) -> Option<f64> {
    if input.trim().is_empty() {
        return None;
    }
    coerce_number(input).filter(|v| v.is_finite())
}

/// True iff the value is non-empty and coerces to a number.
///
/// Whitespace-only text and `Infinity` count as numbers, as they do for the
/// page scripts.
pub fn is_valid_number(input: &str) -> bool {
    !input.is_empty() && coerce_number(input).is_some()
}

/// Strip every character outside `[0-9.-]`.
///
/// Returns `Cow::Borrowed` when nothing was removed, so callers can skip
/// writing the value back into the field.
pub fn filter_numeric_input(raw: &str) -> Cow<'_, str> {
    NON_NUMERIC_REGEX.replace_all(raw, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_fixed_decimals() {
        assert_eq!(format_number(3.14159, 2).unwrap(), "3.14");
        assert_eq!(format_number(5.0, 0).unwrap(), "5");
        assert_eq!(format_number(5.0, 3).unwrap(), "5.000");
        assert_eq!(format_number(0.1, 1).unwrap(), "0.1");
        assert_eq!(format_number(123456.789, 1).unwrap(), "123456.8");
    }

    #[test]
    fn rounds_like_to_fixed() {
        // exact ties round away from zero
        assert_eq!(format_number(2.5, 0).unwrap(), "3");
        assert_eq!(format_number(0.5, 0).unwrap(), "1");
        assert_eq!(format_number(-1.5, 0).unwrap(), "-2");
        assert_eq!(format_number(0.125, 2).unwrap(), "0.13");
        // 1.005 is stored as 1.00499999...
        assert_eq!(format_number(1.005, 2).unwrap(), "1.00");
        // carry through every digit
        assert_eq!(format_number(9.999, 2).unwrap(), "10.00");
        assert_eq!(format_number(99.5, 0).unwrap(), "100");
    }

    #[test]
    fn signs() {
        assert_eq!(format_number(-0.0, 2).unwrap(), "0.00");
        assert_eq!(format_number(-2.345, 1).unwrap(), "-2.3");
        assert_eq!(format_number(-0.001, 2).unwrap(), "-0.00");
    }

    #[test]
    fn exactly_n_fraction_digits() {
        for places in [0usize, 1, 2, 7, 20] {
            for value in [0.0, 1.0 / 3.0, -42.4242, 1e15, 7e-9] {
                let out = format_number(value, places).unwrap();
                let frac_len = out.split_once('.').map(|(_, f)| f.len()).unwrap_or(0);
                assert_eq!(frac_len, places, "{} with {} places gave {}", value, places, out);
            }
        }
    }

    #[test]
    fn rejects_what_cannot_be_formatted() {
        assert_eq!(
            format_number(f64::NAN, 2).unwrap_err().to_string(),
            "Cannot format non-finite value NaN"
        );
        assert!(matches!(format_number(f64::INFINITY, 2), Err(NumberFormatError::NonFinite(_))));
        assert_eq!(format_number(1.0, 101), Err(NumberFormatError::TooManyDecimals(101)));
        assert_eq!(
            format_number_str("abc", 2),
            Err(NumberFormatError::NotANumber("abc".to_string()))
        );
        assert_eq!(format_number_str(" 7.25 ", 1).unwrap(), "7.3");
    }

    #[test]
    fn valid_numbers() {
        assert!(!is_valid_number(""));
        assert!(!is_valid_number("abc"));
        assert!(!is_valid_number("NaN"));
        assert!(!is_valid_number("inf"));
        assert!(!is_valid_number("1.2.3"));
        assert!(!is_valid_number("0x"));
        assert!(is_valid_number("0"));
        assert!(is_valid_number("-1.5"));
        assert!(is_valid_number("3"));
        assert!(is_valid_number("1e3"));
        assert!(is_valid_number(".5"));
    }

    #[test]
    fn blank_and_infinite_text_is_valid() {
        assert!(is_valid_number("   "));
        assert!(is_valid_number("\t\n"));
        assert!(is_valid_number("Infinity"));
        assert!(is_valid_number("-Infinity"));
        assert!(is_valid_number(" +Infinity "));
        assert!(!is_valid_number("infinity"));
    }

    #[test]
    fn coercion_follows_browser_rules() {
        assert_eq!(coerce_number("  "), Some(0.0));
        assert_eq!(coerce_number(" 42 "), Some(42.0));
        assert_eq!(coerce_number("0x1F"), Some(31.0));
        assert_eq!(coerce_number("0b101"), Some(5.0));
        assert_eq!(coerce_number("0o17"), Some(15.0));
        assert_eq!(coerce_number("-0x1F"), None);
        assert_eq!(coerce_number("0xZZ"), None);
        assert_eq!(coerce_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(coerce_number("nan"), None);
        assert_eq!(coerce_number("12px"), None);
    }

    #[test]
    fn formatting_text_still_needs_a_finite_value() {
        assert!(format_number_str("   ", 2).is_err());
        assert!(format_number_str("Infinity", 2).is_err());
        assert_eq!(format_number_str("0x10", 1).unwrap(), "16.0");
        assert_eq!(parse_number("-Infinity"), None);
    }

    #[test]
    fn numeric_filter() {
        assert_eq!(filter_numeric_input("12a.-3b"), "12.-3");
        assert_eq!(filter_numeric_input("R$ 1 234,5"), "12345");
        assert!(matches!(filter_numeric_input("-3.5"), Cow::Borrowed("-3.5")));
        assert!(matches!(filter_numeric_input("3,5"), Cow::Owned(_)));
    }
}
