use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use flowcms_core::{AppError, AppResult, NonEmptyString};
use serde_json::{Map, Value};

use crate::field_type::FieldType;
use crate::field_value::RawFieldValue;

/// Definition of one field in a collection schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    id: Option<String>,
    slug: NonEmptyString,
    display_name: NonEmptyString,
    type_tag: String,
    field_type: FieldType,
    is_required: bool,
    help_text: Option<String>,
}

impl FieldDescriptor {
    /// Creates a field descriptor; a blank display name falls back to the slug.
    pub fn new(
        id: Option<String>,
        slug: impl Into<String>,
        display_name: Option<String>,
        type_tag: impl Into<String>,
        is_required: bool,
        help_text: Option<String>,
    ) -> AppResult<Self> {
        let slug = NonEmptyString::new(slug)?;
        let display_name = match display_name.filter(|name| !name.trim().is_empty()) {
            Some(name) => NonEmptyString::new(name)?,
            None => slug.clone(),
        };
        let type_tag = type_tag.into();

        Ok(Self {
            id: id.filter(|id| !id.is_empty()),
            field_type: FieldType::from_tag(&type_tag),
            slug,
            display_name,
            type_tag,
            is_required,
            help_text: help_text.filter(|text| !text.trim().is_empty()),
        })
    }

    /// Returns the provider field id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the slug identifying the field within its collection.
    #[must_use]
    pub fn slug(&self) -> &NonEmptyString {
        &self.slug
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &NonEmptyString {
        &self.display_name
    }

    /// Returns the type tag exactly as the provider sent it.
    #[must_use]
    pub fn type_tag(&self) -> &str {
        self.type_tag.as_str()
    }

    /// Returns the field type.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns whether a value is required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Returns the help text.
    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        self.help_text.as_deref()
    }
}

/// Ordered field definitions of one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    fields: Vec<FieldDescriptor>,
}

impl FieldSchema {
    /// Creates a schema, rejecting duplicate slugs.
    pub fn new(fields: Vec<FieldDescriptor>) -> AppResult<Self> {
        let mut seen_slugs = HashSet::new();
        for field in &fields {
            if !seen_slugs.insert(field.slug().as_str()) {
                return Err(AppError::Validation(format!(
                    "duplicate field slug '{}' in collection schema",
                    field.slug()
                )));
            }
        }

        Ok(Self { fields })
    }

    /// Returns fields in provider order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Finds a field by slug.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|field| field.slug().as_str() == slug)
    }

    /// Returns whether the schema has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the distinct type tags that resolved to [`FieldType::Unknown`].
    #[must_use]
    pub fn unknown_type_tags(&self) -> BTreeSet<&str> {
        self.fields
            .iter()
            .filter(|field| field.field_type() == FieldType::Unknown)
            .map(FieldDescriptor::type_tag)
            .collect()
    }
}

/// Stored collection item as returned by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: NonEmptyString,
    field_data: Map<String, Value>,
    is_draft: bool,
    is_archived: bool,
    created_on: Option<DateTime<Utc>>,
    last_updated: Option<DateTime<Utc>>,
    last_published: Option<DateTime<Utc>>,
}

impl Item {
    /// Creates an item without timestamps.
    pub fn new(
        id: impl Into<String>,
        field_data: Map<String, Value>,
        is_draft: bool,
        is_archived: bool,
    ) -> AppResult<Self> {
        Ok(Self {
            id: NonEmptyString::new(id)?,
            field_data,
            is_draft,
            is_archived,
            created_on: None,
            last_updated: None,
            last_published: None,
        })
    }

    /// Attaches provider timestamps.
    #[must_use]
    pub fn with_timestamps(
        mut self,
        created_on: Option<DateTime<Utc>>,
        last_updated: Option<DateTime<Utc>>,
        last_published: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_on = created_on;
        self.last_updated = last_updated;
        self.last_published = last_published;
        self
    }

    /// Returns the provider id.
    #[must_use]
    pub fn id(&self) -> &NonEmptyString {
        &self.id
    }

    /// Returns stored values keyed by field slug.
    #[must_use]
    pub fn field_data(&self) -> &Map<String, Value> {
        &self.field_data
    }

    /// Classifies the stored value of one field.
    #[must_use]
    pub fn field_value(&self, slug: &str) -> RawFieldValue {
        self.field_data
            .get(slug)
            .map_or(RawFieldValue::Missing, RawFieldValue::from_json)
    }

    /// Returns whether the item is a draft.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.is_draft
    }

    /// Returns whether the item is archived.
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.is_archived
    }

    /// Returns when the item was created.
    #[must_use]
    pub fn created_on(&self) -> Option<DateTime<Utc>> {
        self.created_on
    }

    /// Returns the last modification time.
    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Returns the last publish time.
    #[must_use]
    pub fn last_published(&self) -> Option<DateTime<Utc>> {
        self.last_published
    }

    /// Returns the heading shown for the item: `name`, then `title`, then `Untitled`.
    #[must_use]
    pub fn title(&self) -> &str {
        ["name", "title"]
            .iter()
            .filter_map(|key| self.field_data.get(*key).and_then(Value::as_str))
            .find(|text| !text.is_empty())
            .unwrap_or("Untitled")
    }
}

/// CMS collection metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    id: NonEmptyString,
    display_name: String,
    singular_name: String,
    slug: String,
    fields: Vec<FieldDescriptor>,
    last_updated: Option<DateTime<Utc>>,
}

impl Collection {
    /// Creates collection metadata.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        singular_name: impl Into<String>,
        slug: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: NonEmptyString::new(id)?,
            display_name: display_name.into(),
            singular_name: singular_name.into(),
            slug: slug.into(),
            fields: Vec::new(),
            last_updated: None,
        })
    }

    /// Attaches fields embedded in the collection response.
    #[must_use]
    pub fn with_fields(mut self, fields: Vec<FieldDescriptor>) -> Self {
        self.fields = fields;
        self
    }

    /// Sets the last modification time.
    #[must_use]
    pub fn with_last_updated(mut self, last_updated: Option<DateTime<Utc>>) -> Self {
        self.last_updated = last_updated;
        self
    }

    /// Returns the provider id.
    #[must_use]
    pub fn id(&self) -> &NonEmptyString {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the singular name.
    #[must_use]
    pub fn singular_name(&self) -> &str {
        self.singular_name.as_str()
    }

    /// Returns the slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }

    /// Returns fields embedded in the collection response, possibly empty.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the last modification time.
    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

/// Custom domain attached to a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomDomain {
    id: NonEmptyString,
    url: String,
}

impl CustomDomain {
    /// Creates a custom domain entry.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id: NonEmptyString::new(id)?,
            url: url.into(),
        })
    }

    /// Returns the provider id.
    #[must_use]
    pub fn id(&self) -> &NonEmptyString {
        &self.id
    }

    /// Returns the domain URL.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

/// Webflow site metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    id: NonEmptyString,
    display_name: String,
    short_name: String,
    last_published: Option<DateTime<Utc>>,
    custom_domains: Vec<CustomDomain>,
}

impl Site {
    /// Creates site metadata.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        short_name: impl Into<String>,
        last_published: Option<DateTime<Utc>>,
        custom_domains: Vec<CustomDomain>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: NonEmptyString::new(id)?,
            display_name: display_name.into(),
            short_name: short_name.into(),
            last_published,
            custom_domains,
        })
    }

    /// Returns the provider id.
    #[must_use]
    pub fn id(&self) -> &NonEmptyString {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the short name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.short_name.as_str()
    }

    /// Returns the last publish time.
    #[must_use]
    pub fn last_published(&self) -> Option<DateTime<Utc>> {
        self.last_published
    }

    /// Returns the custom domains.
    #[must_use]
    pub fn custom_domains(&self) -> &[CustomDomain] {
        &self.custom_domains
    }
}

/// Provider acknowledgement of a publish request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    custom_domain_ids: Vec<String>,
    published_to_subdomain: bool,
}

impl PublishResult {
    /// Creates a publish acknowledgement.
    #[must_use]
    pub fn new(custom_domain_ids: Vec<String>, published_to_subdomain: bool) -> Self {
        Self {
            custom_domain_ids,
            published_to_subdomain,
        }
    }

    /// Returns custom domain ids queued for publishing.
    #[must_use]
    pub fn custom_domain_ids(&self) -> &[String] {
        &self.custom_domain_ids
    }

    /// Returns whether the `webflow.io` subdomain was published.
    #[must_use]
    pub fn published_to_subdomain(&self) -> bool {
        self.published_to_subdomain
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};

    use super::{FieldDescriptor, FieldSchema, Item};
    use crate::field_type::FieldType;

    fn field(slug: &str, type_tag: &str) -> FieldDescriptor {
        FieldDescriptor::new(None, slug, None, type_tag, false, None)
            .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn descriptor_falls_back_to_slug_for_display_name() {
        let descriptor = FieldDescriptor::new(
            Some("f1".to_owned()),
            "name",
            Some("  ".to_owned()),
            "PlainText",
            true,
            None,
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(descriptor.display_name().as_str(), "name");
        assert_eq!(descriptor.field_type(), FieldType::PlainText);
    }

    #[test]
    fn descriptor_rejects_blank_slug() {
        let result = FieldDescriptor::new(None, " ", None, "PlainText", false, None);
        assert!(result.is_err());
    }

    #[test]
    fn schema_rejects_duplicate_slugs() {
        let result = FieldSchema::new(vec![field("name", "PlainText"), field("name", "RichText")]);
        assert!(result.is_err());
    }

    #[test]
    fn schema_reports_distinct_unknown_tags() {
        let schema = FieldSchema::new(vec![
            field("a", "FooBar"),
            field("b", "FooBar"),
            field("c", "Bool"),
            field("d", "Geo"),
        ])
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            schema.unknown_type_tags().into_iter().collect::<Vec<_>>(),
            vec!["FooBar", "Geo"]
        );
        assert!(schema.find("c").is_some());
        assert!(schema.find("z").is_none());
    }

    #[test]
    fn item_title_prefers_name_then_title() {
        let mut field_data = Map::new();
        field_data.insert("title".to_owned(), json!("Second"));
        let item = Item::new("i1", field_data.clone(), false, false)
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(item.title(), "Second");

        field_data.insert("name".to_owned(), Value::String("First".to_owned()));
        let item = Item::new("i1", field_data, false, false).unwrap_or_else(|_| unreachable!());
        assert_eq!(item.title(), "First");

        let untitled =
            Item::new("i2", Map::new(), false, false).unwrap_or_else(|_| unreachable!());
        assert_eq!(untitled.title(), "Untitled");
    }
}
