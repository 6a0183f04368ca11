use serde::Serialize;

use crate::field_type::{DEFAULT_COLOR, FieldType, parse_flag};
use crate::field_value::{RawFieldValue, parse_numeric};
use crate::video_source::VideoSource;

const RICH_TEXT_PREVIEW_LIMIT: usize = 150;
const LINK_LABEL_LIMIT: usize = 35;
const REFERENCE_LABEL_LIMIT: usize = 20;
const REFERENCE_PREVIEW_LIMIT: usize = 15;
const REFERENCE_PREVIEW_COUNT: usize = 2;
const GALLERY_PREVIEW_COUNT: usize = 4;
const MAX_FRACTION_DIGITS: usize = 3;

/// Visual tone attached to a boolean display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayTone {
    /// Positive state.
    Success,
    /// Negative state.
    Danger,
}

/// One image in an image or gallery display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageDisplay {
    url: String,
    alt: Option<String>,
}

impl ImageDisplay {
    /// Returns the image URL.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns the alternative text.
    #[must_use]
    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }
}

/// Read-only presentation of a stored field value for list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum FieldDisplay {
    /// No value; rendered as "N/A".
    Empty,
    /// Raw text shown unmodified.
    Text {
        /// Text content.
        text: String,
    },
    /// Boolean with its label and tone.
    Flag {
        /// Stored state.
        value: bool,
        /// `Yes` or `No`.
        label: String,
        /// Tone matching the state.
        tone: DisplayTone,
    },
    /// Grouped decimal number.
    Number {
        /// en-US formatted value.
        formatted: String,
    },
    /// Truncated markup preview with the plain-text length.
    RichText {
        /// Leading markup.
        preview: String,
        /// Character count with tags removed.
        plain_text_length: usize,
    },
    /// UTC date and time.
    DateTime {
        /// `M/D/YYYY`.
        date: String,
        /// `h:MM:SS AM`.
        time: String,
    },
    /// Stored timestamp that could not be parsed.
    InvalidDate,
    /// Classified video preview.
    Video {
        /// Hosting provider and embed target.
        source: VideoSource,
    },
    /// Single image.
    Image {
        /// Image shown.
        image: ImageDisplay,
    },
    /// First images of a gallery.
    Gallery {
        /// Leading images.
        images: Vec<ImageDisplay>,
        /// Number of stored entries.
        total: usize,
        /// Whether entries were left out.
        truncated: bool,
    },
    /// Color swatch.
    Color {
        /// Hex color.
        hex: String,
    },
    /// External link.
    Link {
        /// Target URL.
        href: String,
        /// Shortened URL.
        label: String,
    },
    /// Email link.
    Email {
        /// Address shown.
        address: String,
        /// `mailto:` URL.
        href: String,
    },
    /// Telephone link.
    Phone {
        /// Number shown.
        number: String,
        /// `tel:` URL.
        href: String,
    },
    /// File download.
    File {
        /// File URL.
        href: String,
        /// Last path segment.
        file_name: String,
    },
    /// Single item reference.
    Reference {
        /// Referenced item id.
        id: String,
        /// Shortened id.
        label: String,
    },
    /// Reference count with the first ids.
    References {
        /// Number of references.
        total: usize,
        /// Leading shortened ids.
        preview: Vec<String>,
        /// References not previewed.
        remaining: usize,
    },
    /// Selected option label.
    Badge {
        /// Option text.
        label: String,
    },
}

impl FieldType {
    /// Renders a stored provider value for display.
    ///
    /// Values that cannot be shown for the type render as [`FieldDisplay::Empty`]
    /// or [`FieldDisplay::InvalidDate`]; rendering never fails.
    #[must_use]
    pub fn render_for_display(&self, raw: &RawFieldValue) -> FieldDisplay {
        if raw.is_blank() {
            return FieldDisplay::Empty;
        }

        match self {
            Self::Switch => {
                let value = parse_flag(raw);
                FieldDisplay::Flag {
                    value,
                    label: if value { "Yes" } else { "No" }.to_owned(),
                    tone: if value {
                        DisplayTone::Success
                    } else {
                        DisplayTone::Danger
                    },
                }
            }
            Self::Number => render_number(raw),
            Self::RichText => {
                let text = display_text(raw);
                FieldDisplay::RichText {
                    preview: truncate_with_ellipsis(&text, RICH_TEXT_PREVIEW_LIMIT),
                    plain_text_length: strip_markup(&text).chars().count(),
                }
            }
            Self::DateTime => render_date_time(raw),
            Self::VideoLink => raw
                .as_text()
                .filter(|url| !url.trim().is_empty())
                .map_or(FieldDisplay::Empty, |url| FieldDisplay::Video {
                    source: VideoSource::classify(&url),
                }),
            Self::Image => image_display(raw)
                .map_or(FieldDisplay::Empty, |image| FieldDisplay::Image { image }),
            Self::MultiImage => render_gallery(raw),
            Self::Color => FieldDisplay::Color {
                hex: raw.as_text().unwrap_or_else(|| DEFAULT_COLOR.to_owned()),
            },
            Self::Link => raw.as_text().map_or(FieldDisplay::Empty, |href| {
                FieldDisplay::Link {
                    label: truncate_with_ellipsis(&href, LINK_LABEL_LIMIT),
                    href,
                }
            }),
            Self::Email => raw.as_text().map_or(FieldDisplay::Empty, |address| {
                FieldDisplay::Email {
                    href: format!("mailto:{address}"),
                    address,
                }
            }),
            Self::Phone => raw.as_text().map_or(FieldDisplay::Empty, |number| {
                FieldDisplay::Phone {
                    href: format!("tel:{number}"),
                    number,
                }
            }),
            Self::File => raw.as_text().map_or(FieldDisplay::Empty, |href| {
                let file_name = href
                    .rsplit('/')
                    .next()
                    .filter(|segment| !segment.is_empty())
                    .unwrap_or("File")
                    .to_owned();
                FieldDisplay::File { href, file_name }
            }),
            Self::Reference => raw.as_text().map_or(FieldDisplay::Empty, |id| {
                FieldDisplay::Reference {
                    label: truncate_with_ellipsis(&id, REFERENCE_LABEL_LIMIT),
                    id,
                }
            }),
            Self::MultiReference => render_references(raw),
            Self::Choice => FieldDisplay::Badge {
                label: display_text(raw),
            },
            Self::PlainText | Self::Unknown => FieldDisplay::Text {
                text: display_text(raw),
            },
        }
    }
}

fn render_number(raw: &RawFieldValue) -> FieldDisplay {
    let number = match raw {
        RawFieldValue::Number(number) => Some(*number),
        RawFieldValue::Text(text) => parse_numeric(text),
        _ => None,
    };

    number.map_or(FieldDisplay::Empty, |number| FieldDisplay::Number {
        formatted: group_number(number),
    })
}

fn render_date_time(raw: &RawFieldValue) -> FieldDisplay {
    raw.as_instant().map_or(FieldDisplay::InvalidDate, |instant| FieldDisplay::DateTime {
        date: instant.format("%-m/%-d/%Y").to_string(),
        time: instant.format("%-I:%M:%S %p").to_string(),
    })
}

fn render_gallery(raw: &RawFieldValue) -> FieldDisplay {
    let entries: Vec<&RawFieldValue> = match raw {
        RawFieldValue::List(entries) => entries.iter().collect(),
        other => vec![other],
    };

    let total = entries.len();
    let images = entries
        .into_iter()
        .take(GALLERY_PREVIEW_COUNT)
        .filter_map(image_display)
        .collect();

    FieldDisplay::Gallery {
        images,
        total,
        truncated: total > GALLERY_PREVIEW_COUNT,
    }
}

fn render_references(raw: &RawFieldValue) -> FieldDisplay {
    let entries: Vec<&RawFieldValue> = match raw {
        RawFieldValue::List(entries) => entries.iter().collect(),
        other => vec![other],
    };

    let total = entries.len();
    let preview = entries
        .into_iter()
        .take(REFERENCE_PREVIEW_COUNT)
        .map(|entry| truncate_with_ellipsis(&display_text(entry), REFERENCE_PREVIEW_LIMIT))
        .collect();

    FieldDisplay::References {
        total,
        preview,
        remaining: total.saturating_sub(REFERENCE_PREVIEW_COUNT),
    }
}

fn image_display(raw: &RawFieldValue) -> Option<ImageDisplay> {
    match raw {
        RawFieldValue::ImageLike { url, alt } => Some(ImageDisplay {
            url: url.clone(),
            alt: alt.clone(),
        }),
        RawFieldValue::Text(url) if !url.is_empty() => Some(ImageDisplay {
            url: url.clone(),
            alt: None,
        }),
        _ => None,
    }
}

/// Flat text of a value, falling back to its JSON form.
fn display_text(raw: &RawFieldValue) -> String {
    raw.as_text().unwrap_or_else(|| raw.to_json().to_string())
}

/// Keeps the first `limit` characters and marks the cut with `...`.
pub(crate) fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_owned();
    }

    let prefix: String = text.chars().take(limit).collect();
    format!("{prefix}...")
}

/// Removes `<...>` tags.
pub(crate) fn strip_markup(html: &str) -> String {
    let mut plain = String::with_capacity(html.len());
    let mut in_tag = false;

    for character in html.chars() {
        match character {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => plain.push(character),
            _ => {}
        }
    }

    // An unterminated `<` is not a tag.
    if in_tag {
        if let Some(start) = html.rfind('<') {
            plain.push_str(&html[start..]);
        }
    }

    plain
}

/// Formats a number with en-US thousands separators and up to three fraction digits.
pub(crate) fn group_number(value: f64) -> String {
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    if value.is_sign_negative() && grouped != "0" {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{DisplayTone, FieldDisplay, group_number, strip_markup, truncate_with_ellipsis};
    use crate::field_type::FieldType;
    use crate::field_value::RawFieldValue;
    use crate::video_source::VideoSource;

    fn render(tag: &str, value: &Value) -> FieldDisplay {
        FieldType::from_tag(tag).render_for_display(&RawFieldValue::from_json(value))
    }

    #[test]
    fn blank_values_render_empty() {
        for value in [json!(null), json!(""), json!({}), json!([])] {
            assert_eq!(render("PlainText", &value), FieldDisplay::Empty);
        }
    }

    #[test]
    fn booleans_render_with_tone() {
        assert_eq!(
            render("Bool", &json!(true)),
            FieldDisplay::Flag {
                value: true,
                label: "Yes".to_owned(),
                tone: DisplayTone::Success,
            }
        );
        assert!(matches!(
            render("Switch", &json!("false")),
            FieldDisplay::Flag { value: false, tone: DisplayTone::Danger, .. }
        ));
    }

    #[test]
    fn numbers_are_grouped() {
        assert_eq!(
            render("Number", &json!(1234567.891)),
            FieldDisplay::Number {
                formatted: "1,234,567.891".to_owned()
            }
        );
        assert_eq!(render("Number", &json!("not a number")), FieldDisplay::Empty);
        assert_eq!(group_number(-1000.0), "-1,000");
        assert_eq!(group_number(0.12349), "0.123");
        assert_eq!(group_number(999.0), "999");
    }

    #[test]
    fn rich_text_counts_plain_characters() {
        let display = render("RichText", &json!("<p>Hello <b>world</b></p>"));
        assert_eq!(
            display,
            FieldDisplay::RichText {
                preview: "<p>Hello <b>world</b></p>".to_owned(),
                plain_text_length: 11,
            }
        );

        let long = "a".repeat(200);
        assert!(matches!(
            render("RichText", &json!(long)),
            FieldDisplay::RichText { ref preview, plain_text_length: 200 } if preview.len() == 153
        ));
    }

    #[test]
    fn dates_render_in_utc() {
        assert_eq!(
            render("DateTime", &json!("2024-03-05T14:07:09.000Z")),
            FieldDisplay::DateTime {
                date: "3/5/2024".to_owned(),
                time: "2:07:09 PM".to_owned(),
            }
        );
        assert_eq!(
            render("DateTime", &json!({ "date": "not a date" })),
            FieldDisplay::InvalidDate
        );
    }

    #[test]
    fn video_links_are_classified() {
        assert_eq!(
            render("VideoLink", &json!({ "url": "https://vimeo.com/76979871" })),
            FieldDisplay::Video {
                source: VideoSource::classify("https://vimeo.com/76979871"),
            }
        );
    }

    #[test]
    fn galleries_show_the_first_four_images() {
        let images: Vec<Value> = (0..6)
            .map(|index| json!({ "url": format!("https://cdn/{index}.png") }))
            .collect();
        let display = render("MultiImage", &Value::Array(images));
        assert!(matches!(
            display,
            FieldDisplay::Gallery { ref images, total: 6, truncated: true } if images.len() == 4
        ));
    }

    #[test]
    fn references_preview_the_first_two_ids() {
        let display = render(
            "ItemRefSet",
            &json!(["0123456789abcdefghij", { "id": "short" }, "third"]),
        );
        assert_eq!(
            display,
            FieldDisplay::References {
                total: 3,
                preview: vec!["0123456789abcde...".to_owned(), "short".to_owned()],
                remaining: 1,
            }
        );
    }

    #[test]
    fn links_files_and_contacts() {
        assert!(matches!(
            render("Link", &json!("https://example.com/a/really/long/path/segment")),
            FieldDisplay::Link { ref label, .. } if label == "https://example.com/a/really/long/p..."
        ));
        assert_eq!(
            render("File", &json!({ "url": "https://cdn/docs/report.pdf" })),
            FieldDisplay::File {
                href: "https://cdn/docs/report.pdf".to_owned(),
                file_name: "report.pdf".to_owned(),
            }
        );
        assert_eq!(
            render("Email", &json!({ "email": "a@b.co" })),
            FieldDisplay::Email {
                address: "a@b.co".to_owned(),
                href: "mailto:a@b.co".to_owned(),
            }
        );
        assert_eq!(
            render("Phone", &json!("+1 555")),
            FieldDisplay::Phone {
                number: "+1 555".to_owned(),
                href: "tel:+1 555".to_owned(),
            }
        );
    }

    #[test]
    fn unknown_types_show_the_raw_string() {
        let text = "x".repeat(80);
        assert_eq!(
            render("FooBar", &json!(text.clone())),
            FieldDisplay::Text { text }
        );
        assert_eq!(
            render("Option", &json!({ "label": "Featured" })),
            FieldDisplay::Badge {
                label: "Featured".to_owned()
            }
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let value = serde_json::to_value(render("Link", &json!("https://a.io")))
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(
            value,
            json!({ "kind": "link", "href": "https://a.io", "label": "https://a.io" })
        );
    }

    #[test]
    fn helpers_truncate_and_strip() {
        assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc...");
        assert_eq!(truncate_with_ellipsis("abc", 3), "abc");
        assert_eq!(strip_markup("<i>a</i> < b"), "a < b");
    }
}
