// ── Form state ──
//
// Every entity form is a flat struct of raw strings addressed by the
// camelCase field names the backend uses. Raw input stays untouched until
// submit, when the schema normalizes it into a typed payload with the
// helpers below.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use netequip_api::Id;

use crate::error::CoreError;
use crate::validate::ValidationError;

/// Named-field access to a form's raw values.
pub trait FormFields: Clone + Default + std::fmt::Debug + Send + Sync {
    /// Field names in display order.
    const FIELDS: &'static [&'static str];

    fn get(&self, name: &str) -> Option<&str>;

    fn field_mut(&mut self, name: &str) -> Option<&mut String>;

    /// Replace the raw value of `name`.
    fn set(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        let slot = self
            .field_mut(name)
            .ok_or_else(|| CoreError::UnknownField(name.to_owned()))?;
        value.clone_into(slot);
        Ok(())
    }
}

/// Declare a form struct whose fields are all raw `String`s.
macro_rules! form_fields {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($field:ident => $key:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        $vis struct $name {
            $(pub $field: String,)+
        }

        impl $crate::form::FormFields for $name {
            const FIELDS: &'static [&'static str] = &[$($key),+];

            fn get(&self, name: &str) -> Option<&str> {
                match name {
                    $($key => Some(self.$field.as_str()),)+
                    _ => None,
                }
            }

            fn field_mut(&mut self, name: &str) -> Option<&mut String> {
                match name {
                    $($key => Some(&mut self.$field),)+
                    _ => None,
                }
            }
        }
    };
}

pub(crate) use form_fields;

// ── Normalization ────────────────────────────────────────────────────

/// Trimmed text, `None` when blank.
pub fn text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

pub fn required(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    text(raw).ok_or_else(|| ValidationError::required(field))
}

pub fn require<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::required(field))
}

pub fn parse_id(field: &'static str, raw: &str) -> Result<Option<Id>, ValidationError> {
    parse_int(field, raw)
}

pub fn parse_int<T: FromStr>(field: &'static str, raw: &str) -> Result<Option<T>, ValidationError> {
    let Some(value) = text(raw) else {
        return Ok(None);
    };
    value
        .parse()
        .map(Some)
        .map_err(|_| ValidationError::new(field, format!("\"{value}\" is not a whole number")))
}

pub fn parse_decimal(field: &'static str, raw: &str) -> Result<Option<Decimal>, ValidationError> {
    let Some(value) = text(raw) else {
        return Ok(None);
    };
    Decimal::from_str(&value.replace(',', "."))
        .map(Some)
        .map_err(|_| ValidationError::new(field, format!("\"{value}\" is not a number")))
}

/// `YYYY-MM-DD`.
pub fn parse_date(field: &'static str, raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let Some(value) = text(raw) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::new(field, format!("\"{value}\" is not a date (YYYY-MM-DD)")))
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Local timestamp as typed into a datetime input, seconds optional.
pub fn parse_datetime(
    field: &'static str,
    raw: &str,
) -> Result<Option<NaiveDateTime>, ValidationError> {
    let Some(value) = text(raw) else {
        return Ok(None);
    };
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&value, fmt).ok())
        .map(Some)
        .ok_or_else(|| {
            ValidationError::new(
                field,
                format!("\"{value}\" is not a date and time (YYYY-MM-DDTHH:MM)"),
            )
        })
}

/// Checkbox-style flag. Blank means `false`.
pub fn parse_flag(field: &'static str, raw: &str) -> Result<bool, ValidationError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" | "off" => Ok(false),
        "true" | "1" | "yes" | "on" => Ok(true),
        other => Err(ValidationError::new(
            field,
            format!("\"{other}\" is not true or false"),
        )),
    }
}

pub fn parse_enum<T>(field: &'static str, raw: &str) -> Result<Option<T>, ValidationError>
where
    T: FromStr + strum::IntoEnumIterator + AsRef<str>,
{
    let Some(value) = text(raw) else {
        return Ok(None);
    };
    T::from_str(&value).map(Some).map_err(|_| {
        let allowed: Vec<String> = T::iter().map(|v| v.as_ref().to_owned()).collect();
        ValidationError::new(
            field,
            format!("\"{value}\" is not one of {}", allowed.join(", ")),
        )
    })
}

/// Raw form value for an optional field.
pub(crate) fn raw<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Value formatted for a datetime input.
pub(crate) fn raw_datetime(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M").to_string()
}

/// Value formatted for a date input.
pub(crate) fn raw_date(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use netequip_api::EquipmentStatus;
    use pretty_assertions::assert_eq;

    use super::*;

    form_fields! {
        struct DemoForm {
            full_name => "fullName",
            email => "email",
        }
    }

    #[test]
    fn named_fields_round_trip() {
        let mut form = DemoForm::default();
        form.set("fullName", "Anna").unwrap();
        assert_eq!(form.get("fullName"), Some("Anna"));
        assert_eq!(form.full_name, "Anna");
        assert_eq!(DemoForm::FIELDS, &["fullName", "email"]);

        let err = form.set("phone", "123").unwrap_err();
        assert!(matches!(err, CoreError::UnknownField(ref f) if f == "phone"));
    }

    #[test]
    fn blank_text_is_none() {
        assert_eq!(text("   "), None);
        assert_eq!(text("  core-sw  "), Some("core-sw".into()));
        assert_eq!(required("name", " ").unwrap_err().to_string(), "name: is required");
    }

    #[test]
    fn numbers_and_dates() {
        assert_eq!(parse_id("typeId", " 7 ").unwrap(), Some(7));
        assert_eq!(parse_id("typeId", "").unwrap(), None);
        assert!(parse_int::<i32>("portNumber", "abc").is_err());
        assert_eq!(
            parse_decimal("cost", "1250,50").unwrap(),
            Some(Decimal::new(125_050, 2))
        );
        assert_eq!(
            parse_datetime("date", "2024-05-02T14:30").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 2).and_then(|d| d.and_hms_opt(14, 30, 0))
        );
        assert_eq!(
            parse_datetime("date", "2024-05-02 14:30:15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 2).and_then(|d| d.and_hms_opt(14, 30, 15))
        );
        assert!(parse_date("assignedDate", "02.05.2024").is_err());
    }

    #[test]
    fn flags_and_enums() {
        assert!(parse_flag("isPrimary", "on").unwrap());
        assert!(!parse_flag("isPrimary", "").unwrap());
        assert!(parse_flag("isPrimary", "maybe").is_err());

        assert_eq!(
            parse_enum::<EquipmentStatus>("status", "Retired").unwrap(),
            Some(EquipmentStatus::Retired)
        );
        let err = parse_enum::<EquipmentStatus>("status", "Broken").unwrap_err();
        assert_eq!(
            err.reason,
            "\"Broken\" is not one of Active, Inactive, Maintenance, Retired"
        );
    }
}
