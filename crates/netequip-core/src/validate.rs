// Local input checks run before any request leaves the client.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;

static IPV4_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
    .expect("IPv4 pattern compiles")
});

static IPV6_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}$").expect("IPv6 pattern compiles")
});

static MAC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}$").expect("MAC pattern compiles")
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// A form value that failed a local check.
///
/// `field` is the camelCase form field name, so callers can point at the
/// offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, "is required")
    }
}

// ── Pattern checks ───────────────────────────────────────────────────

/// Dotted-quad IPv4 with every octet in 0..=255.
pub fn is_ipv4(value: &str) -> bool {
    IPV4_REGEX.is_match(value)
}

/// IPv4, or IPv6 written out as eight full groups.
pub fn is_ip_address(value: &str) -> bool {
    is_ipv4(value) || IPV6_REGEX.is_match(value)
}

/// Six hex pairs separated by `:` or `-`.
pub fn is_mac_address(value: &str) -> bool {
    MAC_REGEX.is_match(value)
}

pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

// ── Field checks ─────────────────────────────────────────────────────

pub fn check_max_len(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::new(
            field,
            format!("must be at most {max} characters"),
        )),
        _ => Ok(()),
    }
}

pub fn check_range<T>(
    field: &'static str,
    value: Option<T>,
    range: std::ops::RangeInclusive<T>,
) -> Result<(), ValidationError>
where
    T: PartialOrd + std::fmt::Display,
{
    match value {
        Some(v) if !range.contains(&v) => Err(ValidationError::new(
            field,
            format!("must be between {} and {}", range.start(), range.end()),
        )),
        _ => Ok(()),
    }
}

pub fn check_pattern(
    field: &'static str,
    value: Option<&str>,
    is_valid: fn(&str) -> bool,
    what: &str,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if !is_valid(v) => Err(ValidationError::new(
            field,
            format!("\"{v}\" is not a valid {what}"),
        )),
        _ => Ok(()),
    }
}

/// Non-negative, at most 8 integer digits and 2 fractional digits.
pub fn check_cost(field: &'static str, value: Option<Decimal>) -> Result<(), ValidationError> {
    let Some(cost) = value else {
        return Ok(());
    };
    if cost.is_sign_negative() && !cost.is_zero() {
        return Err(ValidationError::new(field, "must not be negative"));
    }
    if cost.normalize().scale() > 2 {
        return Err(ValidationError::new(
            field,
            "must have at most 2 decimal places",
        ));
    }
    if cost.trunc() >= Decimal::from(100_000_000) {
        return Err(ValidationError::new(field, "must have at most 8 integer digits"));
    }
    Ok(())
}

/// Parse free-form technical parameters.
///
/// Blank input means "no parameters". Anything else must be a JSON object.
pub fn technical_params(field: &'static str, raw: &str) -> Result<Option<Value>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => Ok(Some(value)),
        Ok(_) => Err(ValidationError::new(field, "must be a JSON object")),
        Err(e) => Err(ValidationError::new(field, format!("invalid JSON: {e}"))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn ipv4_pattern() {
        assert!(is_ipv4("10.0.0.1"));
        assert!(is_ipv4("255.255.255.0"));
        assert!(!is_ipv4("999.1.1.1"));
        assert!(!is_ipv4("10.0.0"));
        assert!(!is_ipv4("10.0.0.1 "));
    }

    #[test]
    fn equipment_ip_accepts_full_ipv6() {
        assert!(is_ip_address("2001:0db8:85a3:0000:0000:8a2e:0370:7334"));
        assert!(!is_ip_address("2001:db8::1"));
    }

    #[test]
    fn mac_pattern() {
        assert!(is_mac_address("00:1A:2b:3C:4d:5E"));
        assert!(is_mac_address("00-1A-2B-3C-4D-5E"));
        assert!(!is_mac_address("001A2B3C4D5E"));
    }

    #[test]
    fn technical_params_must_be_object() {
        assert_eq!(technical_params("technicalParams", "  ").unwrap(), None);
        assert_eq!(
            technical_params("technicalParams", r#"{"ports": 24}"#).unwrap(),
            Some(json!({"ports": 24}))
        );
        let err = technical_params("technicalParams", "[1, 2]").unwrap_err();
        assert_eq!(err.reason, "must be a JSON object");
        assert!(technical_params("technicalParams", "{ports: 24}").is_err());
    }

    #[test]
    fn cost_limits() {
        assert!(check_cost("cost", Some(Decimal::new(123_456, 2))).is_ok());
        assert!(check_cost("cost", Some(Decimal::new(-1, 0))).is_err());
        assert!(check_cost("cost", Some(Decimal::new(1_001, 3))).is_err());
        assert!(check_cost("cost", Some(Decimal::new(100_000_000, 0))).is_err());
        assert!(check_cost("cost", Some(Decimal::new(1_500, 3))).is_ok());
    }

    #[test]
    fn max_len_counts_characters() {
        assert!(check_max_len("osiLevel", Some("Уровень 2"), 9).is_ok());
        let err = check_max_len("osiLevel", Some("Уровень 2 и 3"), 9).unwrap_err();
        assert_eq!(err.to_string(), "osiLevel: must be at most 9 characters");
    }
}
