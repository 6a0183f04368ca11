use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field_value::FieldValue;

/// Flat per-field values of one create or edit session.
///
/// Updates return a new state so form flows stay pure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditState {
    #[serde(default)]
    is_archived: bool,
    #[serde(default)]
    is_draft: bool,
    #[serde(default)]
    field_data: BTreeMap<String, FieldValue>,
}

impl EditState {
    /// Creates an edit state from its parts.
    #[must_use]
    pub fn new(
        is_archived: bool,
        is_draft: bool,
        field_data: BTreeMap<String, FieldValue>,
    ) -> Self {
        Self {
            is_archived,
            is_draft,
            field_data,
        }
    }

    /// Returns the state with one field replaced.
    #[must_use]
    pub fn with_field(mut self, slug: impl Into<String>, value: FieldValue) -> Self {
        self.field_data.insert(slug.into(), value);
        self
    }

    /// Returns the state with the draft flag replaced.
    #[must_use]
    pub fn with_draft(mut self, is_draft: bool) -> Self {
        self.is_draft = is_draft;
        self
    }

    /// Returns the state with the archived flag replaced.
    #[must_use]
    pub fn with_archived(mut self, is_archived: bool) -> Self {
        self.is_archived = is_archived;
        self
    }

    /// Returns the value held for a field slug.
    #[must_use]
    pub fn field(&self, slug: &str) -> Option<&FieldValue> {
        self.field_data.get(slug)
    }

    /// Returns all field values keyed by slug.
    #[must_use]
    pub fn field_data(&self) -> &BTreeMap<String, FieldValue> {
        &self.field_data
    }

    /// Returns whether the item is archived.
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.is_archived
    }

    /// Returns whether the item is a draft.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.is_draft
    }
}

/// Provider-shaped create or update payload.
///
/// Fields serialized as unset are absent from `field_data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSubmission {
    #[serde(default)]
    is_archived: bool,
    #[serde(default)]
    is_draft: bool,
    #[serde(default)]
    field_data: Map<String, Value>,
}

impl ItemSubmission {
    /// Creates a submission from its parts.
    #[must_use]
    pub fn new(is_archived: bool, is_draft: bool, field_data: Map<String, Value>) -> Self {
        Self {
            is_archived,
            is_draft,
            field_data,
        }
    }

    /// Returns submitted values keyed by slug.
    #[must_use]
    pub fn field_data(&self) -> &Map<String, Value> {
        &self.field_data
    }

    /// Consumes the submission and returns the submitted values.
    #[must_use]
    pub fn into_field_data(self) -> Map<String, Value> {
        self.field_data
    }

    /// Returns the archived flag sent to the provider.
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.is_archived
    }

    /// Returns the draft flag sent to the provider.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.is_draft
    }
}

/// Inline form problem attached to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldIssue {
    slug: String,
    display_name: String,
    message: String,
}

impl FieldIssue {
    /// Creates a field issue.
    #[must_use]
    pub fn new(
        slug: impl Into<String>,
        display_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            display_name: display_name.into(),
            message: message.into(),
        }
    }

    /// Returns the affected field slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }

    /// Returns the affected field label.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}
