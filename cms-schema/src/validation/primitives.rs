// Primitive checks - type, length, bounds, formats and date coercion

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use super::IssueKind;
use crate::schema::{Primitive, PrimitiveKind};

const SLUG_PATTERN: &str = r"^[a-z0-9]+(?:-[a-z0-9]+)*$";
const EMAIL_PATTERN: &str = concat!(
    r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@",
    r"[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
    r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
);

/// 2^63, the first float above `i64::MAX`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

pub(crate) const SLUG_MESSAGE: &str =
    "Slug may contain only lowercase letters, numbers and single hyphens";

/// A single primitive failure, positioned at the caller's current path.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fault {
    pub kind: IssueKind,
    pub message: String,
}

impl Fault {
    fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Fault {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn type_mismatch(expected: &str, received: &Value) -> Self {
        Fault::new(
            IssueKind::InvalidType,
            format!("Expected {expected}, received {}", type_name(received)),
        )
    }
}

/// Check `value` against a primitive, returning its normalized form or every
/// constraint it violates.
pub(crate) fn check(primitive: &Primitive, value: &Value) -> Result<Value, Vec<Fault>> {
    match primitive.kind {
        PrimitiveKind::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            other => Err(vec![Fault::type_mismatch("boolean", other)]),
        },
        PrimitiveKind::Number => check_number(primitive, value),
        PrimitiveKind::Date => coerce_date(value)
            .map(|date| Value::String(date.to_rfc3339_opts(SecondsFormat::Millis, true)))
            .map_err(|fault| vec![fault]),
        _ => check_text(primitive, value),
    }
}

fn check_number(primitive: &Primitive, value: &Value) -> Result<Value, Vec<Fault>> {
    let Some(n) = value.as_f64() else {
        return Err(vec![Fault::type_mismatch("number", value)]);
    };
    let rules = &primitive.constraints;
    let mut faults = Vec::new();
    let mut normalized = value.clone();

    // integers are re-emitted as i64 numbers, so `1.0` comes out as `1`
    if rules.integer && !value.is_i64() {
        if n.fract() != 0.0 {
            faults.push(Fault::new(IssueKind::InvalidType, "Expected integer, received float"));
        } else if n < -I64_BOUND {
            faults.push(Fault::new(
                IssueKind::TooSmall,
                format!("Number must be greater than or equal to {}", i64::MIN),
            ));
        } else if n >= I64_BOUND {
            faults.push(Fault::new(
                IssueKind::TooBig,
                format!("Number must be less than or equal to {}", i64::MAX),
            ));
        } else {
            normalized = Value::from(n as i64);
        }
    }
    if let Some(min) = rules.min {
        if n < min {
            faults.push(Fault::new(
                IssueKind::TooSmall,
                format!("Number must be greater than or equal to {min}"),
            ));
        }
    }
    if let Some(max) = rules.max {
        if n > max {
            faults.push(Fault::new(
                IssueKind::TooBig,
                format!("Number must be less than or equal to {max}"),
            ));
        }
    }

    if faults.is_empty() {
        Ok(normalized)
    } else {
        Err(faults)
    }
}

fn check_text(primitive: &Primitive, value: &Value) -> Result<Value, Vec<Fault>> {
    let Some(text) = value.as_str() else {
        return Err(vec![Fault::type_mismatch("string", value)]);
    };
    let rules = &primitive.constraints;
    let mut faults = Vec::new();
    let len = text.chars().count();

    if let Some(min) = rules.min_length {
        if len < min {
            faults.push(Fault::new(
                IssueKind::TooSmall,
                format!("String must contain at least {min} character(s)"),
            ));
        }
    }
    if let Some(max) = rules.max_length {
        if len > max {
            faults.push(Fault::new(
                IssueKind::TooBig,
                format!("String must contain at most {max} character(s)"),
            ));
        }
    }

    let normalized = match primitive.kind {
        PrimitiveKind::Uuid => match parse_uuid(text) {
            Some(canonical) => canonical,
            None => {
                faults.push(Fault::new(IssueKind::InvalidFormat, "Invalid uuid"));
                text.to_string()
            }
        },
        PrimitiveKind::Url => {
            if !is_url(text) {
                faults.push(Fault::new(IssueKind::InvalidFormat, "Invalid url"));
            }
            text.to_string()
        }
        PrimitiveKind::Email => {
            if !is_email(text) {
                faults.push(Fault::new(IssueKind::InvalidFormat, "Invalid email"));
            }
            text.to_string()
        }
        PrimitiveKind::Slug => {
            if !is_slug(text) {
                faults.push(Fault::new(IssueKind::InvalidFormat, SLUG_MESSAGE));
            }
            text.to_string()
        }
        _ => text.to_string(),
    };

    if let Some(pattern) = &rules.pattern {
        if !pattern.regex.is_match(text) {
            faults.push(Fault::new(IssueKind::InvalidFormat, pattern.message.clone()));
        }
    }

    if faults.is_empty() {
        Ok(Value::String(normalized))
    } else {
        Err(faults)
    }
}

/// Canonical 8-4-4-4-12 hyphenated form only, lowercased.
fn parse_uuid(text: &str) -> Option<String> {
    if text.len() != 36 {
        return None;
    }
    let hyphens_in_place = text
        .char_indices()
        .all(|(i, c)| matches!(i, 8 | 13 | 18 | 23) == (c == '-'));
    if !hyphens_in_place {
        return None;
    }
    uuid::Uuid::parse_str(text)
        .ok()
        .map(|id| id.hyphenated().to_string())
}

fn is_url(text: &str) -> bool {
    match url::Url::parse(text) {
        Ok(parsed) => !parsed.cannot_be_a_base() || parsed.scheme() == "mailto",
        Err(_) => false,
    }
}

pub fn is_email(text: &str) -> bool {
    let Some((local, _)) = text.split_once('@') else {
        return false;
    };
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
        .is_match(text)
}

pub fn is_slug(text: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SLUG_PATTERN).expect("slug pattern is a valid regex"))
        .is_match(text)
}

/// Turn free text (usually a title) into a slug accepted by [`is_slug`].
pub fn slugify(input: &str) -> String {
    slug::slugify(input)
}

/// Date coercion: RFC 3339, naive date-time, naive date, or epoch millis.
/// Only years 0000 to 9999 are accepted; RFC 3339 cannot represent others.
fn coerce_date(value: &Value) -> Result<DateTime<Utc>, Fault> {
    let invalid = || Fault::new(IssueKind::InvalidType, "Invalid date");
    let parsed = match value {
        Value::String(text) => parse_date_str(text.trim()),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        other => return Err(Fault::type_mismatch("date", other)),
    };
    parsed
        .filter(|date| (0..=9999).contains(&date.year()))
        .ok_or_else(invalid)
}

fn parse_date_str(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
