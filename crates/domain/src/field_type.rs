use serde_json::{Map, Value};

use crate::field_value::{
    FieldValue, RawFieldValue, format_instant, numeric_json, parse_numeric, parse_timestamp,
};

/// Default value for color fields with no stored value.
pub const DEFAULT_COLOR: &str = "#000000";

/// Webflow CMS field types.
///
/// Provider revisions use partially overlapping tag sets; aliases resolve to
/// the same variant. Tags outside the enumeration resolve to [`FieldType::Unknown`],
/// which behaves like plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Single-line or multi-line plain text (`PlainText`, `Text`).
    PlainText,
    /// HTML rich text.
    RichText,
    /// Numeric value.
    Number,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// External URL.
    Link,
    /// Video URL rendered with an inline preview.
    VideoLink,
    /// Timestamp.
    DateTime,
    /// Boolean (`Bool`, `Switch`).
    Switch,
    /// Hex color.
    Color,
    /// Single image (`ImageRef`, `Image`).
    Image,
    /// Image gallery (`ImageRefSet`, `MultiImage`).
    MultiImage,
    /// Single item reference (`ItemRef`, `Reference`).
    Reference,
    /// Multiple item references (`ItemRefSet`, `MultiReference`).
    MultiReference,
    /// Option field storing the selected option id.
    Choice,
    /// File asset.
    File,
    /// Any tag outside the enumeration.
    Unknown,
}

impl FieldType {
    /// Resolves a provider type tag, accepting every known alias.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "plaintext" | "text" => Self::PlainText,
            "richtext" => Self::RichText,
            "number" => Self::Number,
            "email" => Self::Email,
            "phone" => Self::Phone,
            "link" => Self::Link,
            "videolink" => Self::VideoLink,
            "datetime" => Self::DateTime,
            "bool" | "switch" => Self::Switch,
            "color" => Self::Color,
            "imageref" | "image" => Self::Image,
            "imagerefset" | "multiimage" => Self::MultiImage,
            "itemref" | "reference" => Self::Reference,
            "itemrefset" | "multireference" => Self::MultiReference,
            "option" => Self::Choice,
            "file" => Self::File,
            _ => Self::Unknown,
        }
    }

    /// Returns the canonical provider tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "PlainText",
            Self::RichText => "RichText",
            Self::Number => "Number",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Link => "Link",
            Self::VideoLink => "VideoLink",
            Self::DateTime => "DateTime",
            Self::Switch => "Switch",
            Self::Color => "Color",
            Self::Image => "Image",
            Self::MultiImage => "MultiImage",
            Self::Reference => "Reference",
            Self::MultiReference => "MultiReference",
            Self::Choice => "Option",
            Self::File => "File",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns the form input kind used to edit this type.
    #[must_use]
    pub fn input_kind(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Switch => "checkbox",
            Self::Color => "color",
            Self::DateTime => "datetime-local",
            Self::Email => "email",
            Self::Phone => "tel",
            Self::Link | Self::VideoLink | Self::Image | Self::File => "url",
            Self::RichText => "textarea",
            Self::MultiImage | Self::MultiReference => "list",
            Self::PlainText | Self::Reference | Self::Choice | Self::Unknown => "text",
        }
    }

    /// Returns the edit value a new item starts with.
    #[must_use]
    pub fn default_value(&self) -> FieldValue {
        match self {
            Self::Switch => FieldValue::Flag(false),
            Self::Color => FieldValue::Text(DEFAULT_COLOR.to_owned()),
            Self::MultiImage | Self::MultiReference => FieldValue::List(Vec::new()),
            Self::PlainText
            | Self::RichText
            | Self::Number
            | Self::Email
            | Self::Phone
            | Self::Link
            | Self::VideoLink
            | Self::DateTime
            | Self::Image
            | Self::Reference
            | Self::Choice
            | Self::File
            | Self::Unknown => FieldValue::Text(String::new()),
        }
    }

    /// Converts a stored provider value into its flat edit form.
    ///
    /// Never fails: missing and unusable values map to [`Self::default_value`].
    #[must_use]
    pub fn parse_for_edit(&self, raw: &RawFieldValue) -> FieldValue {
        if matches!(raw, RawFieldValue::Missing) {
            return self.default_value();
        }

        match self {
            Self::Number => raw
                .as_text()
                .filter(|text| parse_numeric(text).is_some())
                .map_or_else(
                    || self.default_value(),
                    |text| FieldValue::Text(text.trim().to_owned()),
                ),
            Self::Switch => FieldValue::Flag(parse_flag(raw)),
            Self::DateTime => match raw.as_instant() {
                Some(instant) => FieldValue::Text(format_instant(instant)),
                None => raw
                    .as_text()
                    .map_or_else(|| self.default_value(), FieldValue::Text),
            },
            Self::Color
            | Self::Image
            | Self::File
            | Self::Link
            | Self::VideoLink
            | Self::Reference
            | Self::Choice => raw
                .as_text()
                .map_or_else(|| self.default_value(), FieldValue::Text),
            Self::MultiImage | Self::MultiReference => FieldValue::List(raw.list_entries()),
            Self::PlainText | Self::RichText | Self::Email | Self::Phone | Self::Unknown => raw
                .as_text()
                .map_or_else(|| FieldValue::Opaque(raw.to_json()), FieldValue::Text),
        }
    }

    /// Converts a flat edit value into the provider's submission shape.
    ///
    /// `None` means the field is left unset in the payload. Structured values
    /// are carried unchanged only by the text family; every other type
    /// flattens them through [`Self::parse_for_edit`] first.
    #[must_use]
    pub fn serialize_for_submit(&self, value: &FieldValue) -> Option<Value> {
        if let FieldValue::Opaque(raw) = value {
            if self.carries_structured_values() {
                return Some(raw.clone());
            }

            let flat = self.parse_for_edit(&RawFieldValue::from_json(raw));
            if matches!(flat, FieldValue::Opaque(_)) {
                return None;
            }
            return self.serialize_for_submit(&flat);
        }

        match self {
            Self::Number => value.as_text().and_then(parse_numeric).map(numeric_json),
            Self::DateTime => {
                let text = value.as_text()?.trim();
                if text.is_empty() {
                    return None;
                }

                let submitted = parse_timestamp(text)
                    .map(format_instant)
                    .unwrap_or_else(|| text.to_owned());
                Some(Value::String(submitted))
            }
            Self::Switch => Some(Value::Bool(value.as_flag())),
            Self::Image | Self::File => value
                .as_text()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(url_object),
            Self::MultiImage => Some(Value::Array(
                value.non_blank_entries().map(url_object).collect(),
            )),
            Self::MultiReference => Some(Value::Array(
                value
                    .non_blank_entries()
                    .map(|id| Value::String(id.to_owned()))
                    .collect(),
            )),
            Self::Reference | Self::Choice => value
                .as_text()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| Value::String(id.to_owned())),
            Self::PlainText
            | Self::RichText
            | Self::Email
            | Self::Phone
            | Self::Link
            | Self::VideoLink
            | Self::Color
            | Self::Unknown => Some(value.clone().into_json()),
        }
    }

    fn carries_structured_values(&self) -> bool {
        matches!(
            self,
            Self::PlainText | Self::RichText | Self::Email | Self::Phone | Self::Unknown
        )
    }
}

pub(crate) fn parse_flag(raw: &RawFieldValue) -> bool {
    match raw {
        RawFieldValue::Bool(flag) => *flag,
        RawFieldValue::Text(text) => text.trim().eq_ignore_ascii_case("true"),
        RawFieldValue::Number(number) => *number != 0.0,
        RawFieldValue::Missing
        | RawFieldValue::ImageLike { .. }
        | RawFieldValue::RefLike { .. }
        | RawFieldValue::List(_)
        | RawFieldValue::Opaque(_) => false,
    }
}

fn url_object(url: &str) -> Value {
    let mut object = Map::new();
    object.insert("url".to_owned(), Value::String(url.to_owned()));
    Value::Object(object)
}
