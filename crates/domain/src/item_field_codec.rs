//! Whole-item conversions between stored provider values, edit state and
//! submission payloads, driven by the collection schema.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::cms::{FieldSchema, Item};
use crate::edit_state::{EditState, FieldIssue, ItemSubmission};
use crate::field_value::FieldValue;

/// Builds the initial edit state for a new item: one default per schema slug.
#[must_use]
pub fn build_defaults(schema: &FieldSchema) -> EditState {
    let field_data = schema
        .fields()
        .iter()
        .map(|field| {
            (
                field.slug().as_str().to_owned(),
                field.field_type().default_value(),
            )
        })
        .collect();

    EditState::new(false, false, field_data)
}

/// Builds the edit state for an existing item.
///
/// Stored values the schema does not describe are carried unchanged so an
/// update does not drop them.
#[must_use]
pub fn hydrate(schema: &FieldSchema, item: &Item) -> EditState {
    let mut field_data: BTreeMap<String, FieldValue> = item
        .field_data()
        .iter()
        .filter(|(slug, _)| schema.find(slug).is_none())
        .map(|(slug, value)| (slug.clone(), FieldValue::Opaque(value.clone())))
        .collect();

    for field in schema.fields() {
        let raw = item.field_value(field.slug().as_str());
        field_data.insert(
            field.slug().as_str().to_owned(),
            field.field_type().parse_for_edit(&raw),
        );
    }

    EditState::new(item.is_archived(), item.is_draft(), field_data)
}

/// Converts an edit state into the provider payload.
///
/// Schema fields serialized as unset are omitted; schema fields missing from
/// the state are sent with their default; other slugs pass through unchanged.
#[must_use]
pub fn serialize(schema: &FieldSchema, state: &EditState) -> ItemSubmission {
    let mut field_data = Map::new();

    for field in schema.fields() {
        let slug = field.slug().as_str();
        let field_type = field.field_type();
        let submitted = match state.field(slug) {
            Some(value) => field_type.serialize_for_submit(value),
            None => field_type.serialize_for_submit(&field_type.default_value()),
        };

        if let Some(value) = submitted {
            field_data.insert(slug.to_owned(), value);
        }
    }

    for (slug, value) in state.field_data() {
        if schema.find(slug).is_none() {
            field_data.insert(slug.clone(), value.clone().into_json());
        }
    }

    ItemSubmission::new(state.is_archived(), state.is_draft(), field_data)
}

/// Lists required schema fields that the submission leaves empty.
#[must_use]
pub fn validate_required(schema: &FieldSchema, submission: &ItemSubmission) -> Vec<FieldIssue> {
    schema
        .fields()
        .iter()
        .filter(|field| field.is_required())
        .filter(|field| is_empty_submission(submission.field_data().get(field.slug().as_str())))
        .map(|field| {
            FieldIssue::new(
                field.slug().as_str(),
                field.display_name().as_str(),
                format!("{} is required", field.display_name()),
            )
        })
        .collect()
}

fn is_empty_submission(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(Value::Array(entries)) => entries.is_empty(),
        Some(Value::Object(object)) => object.is_empty(),
        Some(Value::Bool(_) | Value::Number(_)) => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};

    use super::{build_defaults, hydrate, serialize, validate_required};
    use crate::cms::{FieldDescriptor, FieldSchema, Item};
    use crate::edit_state::EditState;
    use crate::field_value::FieldValue;

    fn schema() -> FieldSchema {
        let fields = [
            ("name", "PlainText", true),
            ("price", "Number", false),
            ("featured", "Bool", false),
            ("accent", "Color", false),
            ("published-on", "DateTime", false),
            ("tags", "ItemRefSet", false),
            ("cover", "ImageRef", false),
        ]
        .into_iter()
        .map(|(slug, type_tag, is_required)| {
            FieldDescriptor::new(None, slug, None, type_tag, is_required, None)
                .unwrap_or_else(|_| unreachable!())
        })
        .collect();

        FieldSchema::new(fields).unwrap_or_else(|_| unreachable!())
    }

    fn item(field_data: Value) -> Item {
        let field_data = match field_data {
            Value::Object(object) => object,
            _ => Map::new(),
        };
        Item::new("item-1", field_data, true, false).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn defaults_cover_every_slug() {
        let schema = schema();
        let state = build_defaults(&schema);

        assert_eq!(state.field_data().len(), schema.fields().len());
        assert_eq!(state.field("featured"), Some(&FieldValue::Flag(false)));
        assert_eq!(
            state.field("accent"),
            Some(&FieldValue::Text("#000000".to_owned()))
        );
        assert_eq!(state.field("tags"), Some(&FieldValue::List(Vec::new())));
        assert!(!state.is_draft());
        assert!(!state.is_archived());
    }

    #[test]
    fn hydrate_then_serialize_reproduces_scalar_values() {
        let schema = schema();
        let stored = json!({
            "name": "Launch post",
            "price": 42,
            "featured": true,
            "accent": "#ff8800",
            "published-on": "2024-02-10T08:30:00.000Z",
        });

        let state = hydrate(&schema, &item(stored.clone()));
        assert!(state.is_draft());

        let submission = serialize(&schema, &state);
        for slug in ["name", "price", "featured", "accent", "published-on"] {
            assert_eq!(submission.field_data().get(slug), stored.get(slug), "{slug}");
        }
        assert!(submission.is_draft());
    }

    #[test]
    fn set_values_round_trip_without_blanks() {
        let schema = schema();
        let state = hydrate(&schema, &item(json!({ "tags": ["a", "", "b"] })));

        assert_eq!(state.field_data().len(), schema.fields().len());
        for field in schema.fields() {
            let slug = field.slug().as_str();
            if slug != "tags" {
                assert_eq!(
                    state.field(slug),
                    Some(&field.field_type().default_value()),
                    "{slug}"
                );
            }
        }

        let submission = serialize(&schema, &state);
        assert_eq!(submission.field_data().get("tags"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn client_edit_state_is_shaped_by_field_type() {
        let schema = schema();
        let state: EditState = serde_json::from_value(json!({
            "fieldData": {
                "name": "Launch post",
                "tags": ["a", "  ", null, "b"],
                "featured": 1,
                "price": "",
                "published-on": 1_700_000_000_000_i64,
                "extra": null
            }
        }))
        .unwrap_or_else(|_| unreachable!());

        let submission = serialize(&schema, &state);
        let field_data = submission.field_data();
        assert_eq!(field_data.get("tags"), Some(&json!(["a", "b"])));
        assert_eq!(field_data.get("featured"), Some(&json!(true)));
        assert_eq!(
            field_data.get("published-on"),
            Some(&json!("2023-11-14T22:13:20.000Z"))
        );
        assert!(field_data.get("price").is_none());
        assert_eq!(field_data.get("extra"), Some(&Value::Null));
    }

    #[test]
    fn unset_values_are_omitted() {
        let schema = schema();
        let submission = serialize(&schema, &build_defaults(&schema));

        assert!(submission.field_data().get("price").is_none());
        assert!(submission.field_data().get("published-on").is_none());
        assert!(submission.field_data().get("cover").is_none());
        assert_eq!(submission.field_data().get("featured"), Some(&json!(false)));
    }

    #[test]
    fn unknown_slugs_are_preserved() {
        let schema = schema();
        let state = hydrate(
            &schema,
            &item(json!({ "name": "A", "legacy-meta": { "source": "import" } })),
        );
        let submission = serialize(&schema, &state);

        assert_eq!(
            submission.field_data().get("legacy-meta"),
            Some(&json!({ "source": "import" }))
        );
    }

    #[test]
    fn required_fields_must_be_filled() {
        let schema = schema();
        let empty = serialize(&schema, &build_defaults(&schema));
        let issues = validate_required(&schema, &empty);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].slug(), "name");
        assert_eq!(issues[0].message(), "name is required");

        let filled = serialize(
            &schema,
            &build_defaults(&schema).with_field("name", FieldValue::Text("Post".to_owned())),
        );
        assert!(validate_required(&schema, &filled).is_empty());
    }
}
