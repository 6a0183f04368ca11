use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Single-key wrapper objects the provider has used historically for flat values.
const WRAPPER_KEYS: [&str; 9] = [
    "hex", "date", "email", "phone", "label", "value", "text", "name", "title",
];

/// Stored provider value classified by shape.
///
/// The provider returns the same field as a bare scalar or as a small object
/// depending on API revision (`"https://..."` vs `{ "url": "...", "alt": "..." }`,
/// `"abc"` vs `{ "id": "abc" }`). Classifying once keeps shape checks out of
/// the per-type rules.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFieldValue {
    /// Null, absent, or an empty object.
    Missing,
    /// Bare string.
    Text(String),
    /// Bare JSON number.
    Number(f64),
    /// Bare JSON boolean.
    Bool(bool),
    /// Object carrying `url` (or `src`) with an optional `alt`.
    ImageLike {
        /// Asset URL.
        url: String,
        /// Alternative text, when non-empty.
        alt: Option<String>,
    },
    /// Object carrying a reference `id`.
    RefLike {
        /// Referenced item identifier.
        id: String,
    },
    /// Ordered list of values.
    List(Vec<RawFieldValue>),
    /// Structured value with no recognised shape.
    Opaque(Value),
}

impl RawFieldValue {
    /// Classifies a provider JSON value.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::String(text) => Self::Text(text.clone()),
            Value::Number(number) => number
                .as_f64()
                .map_or_else(|| Self::Opaque(value.clone()), Self::Number),
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Array(entries) => Self::List(entries.iter().map(Self::from_json).collect()),
            Value::Object(object) => Self::from_object(object),
        }
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        if object.is_empty() {
            return Self::Missing;
        }

        let url = object
            .get("url")
            .or_else(|| object.get("src"))
            .and_then(Value::as_str);
        if let Some(url) = url {
            let alt = object
                .get("alt")
                .and_then(Value::as_str)
                .filter(|alt| !alt.is_empty())
                .map(str::to_owned);
            return Self::ImageLike {
                url: url.to_owned(),
                alt,
            };
        }

        if let Some(id) = object.get("id").and_then(Value::as_str) {
            return Self::RefLike { id: id.to_owned() };
        }

        for key in WRAPPER_KEYS {
            if let Some(inner) = object.get(key).filter(|inner| !inner.is_object()) {
                return Self::from_json(inner);
            }
        }

        Self::Opaque(Value::Object(object.clone()))
    }

    /// Returns whether the value should be treated as absent for display.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Text(text) => text.is_empty(),
            Self::List(entries) => entries.is_empty(),
            Self::Number(_)
            | Self::Bool(_)
            | Self::ImageLike { .. }
            | Self::RefLike { .. }
            | Self::Opaque(_) => false,
        }
    }

    /// Returns the flat text form, when the value has one.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Number(number) => Some(format_number(*number)),
            Self::Bool(flag) => Some(flag.to_string()),
            Self::ImageLike { url, .. } => Some(url.clone()),
            Self::RefLike { id } => Some(id.clone()),
            Self::Missing | Self::List(_) | Self::Opaque(_) => None,
        }
    }

    /// Returns the instant a timestamp value denotes.
    ///
    /// Bare numbers are epoch milliseconds.
    #[must_use]
    pub fn as_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Number(millis) => DateTime::from_timestamp_millis(*millis as i64),
            Self::Text(text) => parse_timestamp(text),
            Self::Missing
            | Self::Bool(_)
            | Self::ImageLike { .. }
            | Self::RefLike { .. }
            | Self::List(_)
            | Self::Opaque(_) => None,
        }
    }

    /// Returns list entries in their flat text form.
    ///
    /// A single scalar is treated as a one-element list.
    #[must_use]
    pub fn list_entries(&self) -> Vec<String> {
        match self {
            Self::List(entries) => entries.iter().filter_map(Self::as_text).collect(),
            other => other.as_text().into_iter().collect(),
        }
    }

    /// Converts the classified value back to JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Missing => Value::Null,
            Self::Text(text) => Value::String(text.clone()),
            Self::Number(number) => numeric_json(*number),
            Self::Bool(flag) => Value::Bool(*flag),
            Self::ImageLike { url, alt } => {
                let mut object = Map::new();
                object.insert("url".to_owned(), Value::String(url.clone()));
                if let Some(alt) = alt {
                    object.insert("alt".to_owned(), Value::String(alt.clone()));
                }
                Value::Object(object)
            }
            Self::RefLike { id } => {
                let mut object = Map::new();
                object.insert("id".to_owned(), Value::String(id.clone()));
                Value::Object(object)
            }
            Self::List(entries) => Value::Array(entries.iter().map(Self::to_json).collect()),
            Self::Opaque(value) => value.clone(),
        }
    }
}

/// Flat value held by an edit session for one field.
///
/// Numbers and timestamps stay as edit strings until submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Checkbox state.
    Flag(bool),
    /// Single text input.
    Text(String),
    /// Ordered multi-value input.
    List(Vec<String>),
    /// Structured value with no flat form, carried unchanged.
    Opaque(Value),
}

impl FieldValue {
    /// Returns the text input, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Flag(_) | Self::List(_) | Self::Opaque(_) => None,
        }
    }

    /// Returns the checkbox state; text inputs accept `true` and `on`.
    #[must_use]
    pub fn as_flag(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Text(text) => {
                let text = text.trim();
                text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("on")
            }
            Self::List(_) | Self::Opaque(_) => false,
        }
    }

    /// Returns trimmed entries, dropping blank ones and preserving order.
    pub fn non_blank_entries(&self) -> impl Iterator<Item = &str> {
        let entries: Vec<&str> = match self {
            Self::List(entries) => entries.iter().map(String::as_str).collect(),
            Self::Text(text) => vec![text.as_str()],
            Self::Flag(_) | Self::Opaque(_) => Vec::new(),
        };

        entries
            .into_iter()
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
    }

    /// Converts the edit value to JSON without any type-specific shaping.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Flag(flag) => Value::Bool(flag),
            Self::Text(text) => Value::String(text),
            Self::List(entries) => Value::Array(entries.into_iter().map(Value::String).collect()),
            Self::Opaque(value) => value,
        }
    }
}

/// Formats a number without a trailing `.0` for integral values.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Parses an edit string into a finite number; blank text is not a number.
pub(crate) fn parse_numeric(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Converts a finite number to JSON, preferring integers for integral values.
pub(crate) fn numeric_json(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        return Value::from(value as i64);
    }

    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Parses the timestamp shapes the form and the provider produce.
///
/// Values without an offset are taken as UTC.
pub(crate) fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(value.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(value) = NaiveDateTime::parse_from_str(text, format) {
            return Some(value.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|value| value.and_utc())
}

/// Formats an instant as a millisecond-precision UTC timestamp.
pub(crate) fn format_instant(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
