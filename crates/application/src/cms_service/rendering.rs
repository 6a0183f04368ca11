use flowcms_core::AppResult;
use flowcms_domain::{FieldDisplay, FieldSchema, Item};

use super::{CmsService, SchemaLoad, require_id};

/// Display form of one schema field of an item.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField {
    /// Field slug.
    pub slug: String,
    /// Field label.
    pub display_name: String,
    /// Provider type tag.
    pub type_tag: String,
    /// Rendered value.
    pub display: FieldDisplay,
}

/// Stored item with its rendered schema fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedItem {
    /// Stored item.
    pub item: Item,
    /// Rendered fields in schema order; empty when no schema is available.
    pub fields: Vec<RenderedField>,
}

/// Items of a collection rendered for a list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemListing {
    /// Schema load outcome used for rendering.
    pub schema: SchemaLoad,
    /// Rendered items in provider order.
    pub items: Vec<RenderedItem>,
}

impl CmsService {
    /// Lists items with each schema field rendered for display.
    ///
    /// The schema and the items are fetched concurrently. Item fetch failures
    /// are returned; a schema failure leaves items unrendered.
    pub async fn render_items(&self, collection_id: &str) -> AppResult<ItemListing> {
        require_id("collectionId", collection_id)?;

        let (schema, items) = futures::join!(
            self.load_schema(collection_id),
            self.provider.list_items(collection_id)
        );
        let items = items?;

        let items = items
            .into_iter()
            .map(|item| RenderedItem {
                fields: schema
                    .schema()
                    .map(|schema| render_fields(schema, &item))
                    .unwrap_or_default(),
                item,
            })
            .collect();

        Ok(ItemListing { schema, items })
    }
}

fn render_fields(schema: &FieldSchema, item: &Item) -> Vec<RenderedField> {
    schema
        .fields()
        .iter()
        .map(|field| RenderedField {
            slug: field.slug().as_str().to_owned(),
            display_name: field.display_name().as_str().to_owned(),
            type_tag: field.type_tag().to_owned(),
            display: field
                .field_type()
                .render_for_display(&item.field_value(field.slug().as_str())),
        })
        .collect()
}
