// ── Presentation helpers ──
//
// Pure functions that turn records into display strings: badges, escaping,
// truncation, locale-aware dates and money, overdue classification.

use chrono::{Locale, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use strum::{Display, EnumString};

use netequip_api::{
    DevicePort, EquipmentStatus, IpAddress, Lenient, MaintenanceType, PortStatus,
};

// ── Locale ───────────────────────────────────────────────────────────

/// Display locale for dates and money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize)]
pub enum DisplayLocale {
    #[default]
    #[strum(to_string = "ru-RU", serialize = "ru")]
    #[serde(rename = "ru-RU")]
    RuRu,
    #[strum(to_string = "en-US", serialize = "en")]
    #[serde(rename = "en-US")]
    EnUs,
}

impl DisplayLocale {
    fn chrono(self) -> Locale {
        match self {
            Self::RuRu => Locale::ru_RU,
            Self::EnUs => Locale::en_US,
        }
    }
}

// ── Badges ───────────────────────────────────────────────────────────

/// Colour family of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Secondary,
    Warning,
    Danger,
    Info,
}

/// A short status label with a tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

impl Badge {
    fn new(label: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }

    /// CSS class for the badge, e.g. `badge-success`.
    pub fn class(&self) -> String {
        format!("badge-{}", self.tone)
    }

    /// HTML `<span>` with the label escaped.
    pub fn to_html(&self) -> String {
        format!(
            "<span class=\"badge {}\">{}</span>",
            self.class(),
            escape_html(&self.label)
        )
    }
}

fn lenient_badge<T: Copy + AsRef<str>>(
    value: Option<&Lenient<T>>,
    tone_of: fn(T) -> Tone,
) -> Badge {
    match value {
        Some(Lenient::Known(v)) => {
            let label: &str = v.as_ref();
            Badge::new(label, tone_of(*v))
        }
        Some(Lenient::Unknown(raw)) => Badge::new(raw.as_str(), Tone::Secondary),
        None => Badge::new("", Tone::Secondary),
    }
}

pub fn equipment_status_badge(status: Option<&Lenient<EquipmentStatus>>) -> Badge {
    lenient_badge(status, |s| match s {
        EquipmentStatus::Active => Tone::Success,
        EquipmentStatus::Inactive => Tone::Secondary,
        EquipmentStatus::Maintenance => Tone::Warning,
        EquipmentStatus::Retired => Tone::Danger,
    })
}

pub fn port_status_badge(status: Option<&Lenient<PortStatus>>) -> Badge {
    lenient_badge(status, |s| match s {
        PortStatus::Active => Tone::Success,
        PortStatus::Inactive => Tone::Secondary,
        PortStatus::Reserved => Tone::Warning,
    })
}

pub fn maintenance_type_badge(kind: Option<&Lenient<MaintenanceType>>) -> Badge {
    lenient_badge(kind, |k| match k {
        MaintenanceType::Routine => Tone::Info,
        MaintenanceType::Repair => Tone::Warning,
        MaintenanceType::Upgrade => Tone::Success,
        MaintenanceType::Emergency => Tone::Danger,
        MaintenanceType::Preventive => Tone::Secondary,
    })
}

pub fn primary_badge(ip: &IpAddress) -> Badge {
    if ip.primary() {
        Badge::new("✓ Primary", Tone::Success)
    } else {
        Badge::new("Secondary", Tone::Secondary)
    }
}

// ── Text ─────────────────────────────────────────────────────────────

/// Escape `& < > " '` for safe interpolation into HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Cut `text` to `max` characters, appending `...` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let head: String = text.chars().take(max).collect();
    format!("{head}...")
}

/// `"<equipment> → Port <n>"` for a connected port.
pub fn connection_summary(port: &DevicePort) -> Option<String> {
    if !port.is_connected() {
        return None;
    }
    let equipment = port.connected_to_equipment_name.as_deref().unwrap_or("?");
    let number = port
        .connected_to_port_number
        .map_or_else(|| "?".to_owned(), |n| n.to_string());
    Some(format!("{equipment} → Port {number}"))
}

// ── Dates ────────────────────────────────────────────────────────────

pub fn format_date(date: NaiveDate, locale: DisplayLocale) -> String {
    let fmt = match locale {
        DisplayLocale::RuRu => "%d.%m.%Y",
        DisplayLocale::EnUs => "%B %-d, %Y",
    };
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format_localized(fmt, locale.chrono())
        .to_string()
}

pub fn format_datetime(value: NaiveDateTime, locale: DisplayLocale) -> String {
    let fmt = match locale {
        DisplayLocale::RuRu => "%d.%m.%Y %H:%M",
        DisplayLocale::EnUs => "%B %-d, %Y %H:%M",
    };
    value
        .and_utc()
        .format_localized(fmt, locale.chrono())
        .to_string()
}

/// A planned date is overdue once its midnight has passed.
pub fn is_overdue(next: Option<NaiveDate>, now: NaiveDateTime) -> bool {
    next.is_some_and(|d| d.and_time(NaiveTime::MIN) < now)
}

// ── Money ────────────────────────────────────────────────────────────

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.to_ascii_uppercase().as_str() {
        "RUB" => Some("₽"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        _ => None,
    }
}

fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

/// Amount with two decimals, grouped per locale, with the currency symbol.
pub fn format_currency(amount: Decimal, currency: &str, locale: DisplayLocale) -> String {
    let rounded = amount.round_dp(2);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let symbol = currency_symbol(currency);

    match locale {
        DisplayLocale::RuRu => {
            let number = format!("{sign}{},{frac_part}", group_digits(int_part, "\u{a0}"));
            format!("{number}\u{a0}{}", symbol.unwrap_or(currency))
        }
        DisplayLocale::EnUs => {
            let number = format!("{}.{frac_part}", group_digits(int_part, ","));
            match symbol {
                Some(s) => format!("{sign}{s}{number}"),
                None => format!("{sign}{currency}\u{a0}{number}"),
            }
        }
    }
}
