use chrono::{DateTime, SecondsFormat, Utc};
use flowcms_domain::{
    Collection, CustomDomain, FieldDescriptor, Item, ItemSubmission, PublishResult, Site,
};

use super::types::{
    CollectionResponse, CustomDomainResponse, FieldResponse, ItemPayloadRequest, ItemResponse,
    PublishResultResponse, SiteResponse,
};

impl From<&FieldDescriptor> for FieldResponse {
    fn from(field: &FieldDescriptor) -> Self {
        let field_type = field.field_type();
        Self {
            id: field.id().map(ToOwned::to_owned),
            slug: field.slug().as_str().to_owned(),
            display_name: field.display_name().as_str().to_owned(),
            type_tag: field.type_tag().to_owned(),
            field_type: field_type.as_str().to_owned(),
            input_kind: field_type.input_kind().to_owned(),
            is_required: field.is_required(),
            help_text: field.help_text().map(ToOwned::to_owned),
        }
    }
}

impl From<Collection> for CollectionResponse {
    fn from(collection: Collection) -> Self {
        Self {
            id: collection.id().as_str().to_owned(),
            display_name: collection.display_name().to_owned(),
            singular_name: collection.singular_name().to_owned(),
            slug: collection.slug().to_owned(),
            fields: collection.fields().iter().map(FieldResponse::from).collect(),
            last_updated: collection.last_updated().map(format_timestamp),
        }
    }
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id().as_str().to_owned(),
            title: item.title().to_owned(),
            is_draft: item.is_draft(),
            is_archived: item.is_archived(),
            created_on: item.created_on().map(format_timestamp),
            last_updated: item.last_updated().map(format_timestamp),
            last_published: item.last_published().map(format_timestamp),
            field_data: item.field_data().clone(),
        }
    }
}

impl From<ItemPayloadRequest> for ItemSubmission {
    fn from(payload: ItemPayloadRequest) -> Self {
        ItemSubmission::new(payload.is_archived, payload.is_draft, payload.field_data)
    }
}

impl From<&CustomDomain> for CustomDomainResponse {
    fn from(domain: &CustomDomain) -> Self {
        Self {
            id: domain.id().as_str().to_owned(),
            url: domain.url().to_owned(),
        }
    }
}

impl From<Site> for SiteResponse {
    fn from(site: Site) -> Self {
        Self {
            id: site.id().as_str().to_owned(),
            display_name: site.display_name().to_owned(),
            short_name: site.short_name().to_owned(),
            last_published: site.last_published().map(format_timestamp),
            custom_domains: site
                .custom_domains()
                .iter()
                .map(CustomDomainResponse::from)
                .collect(),
        }
    }
}

impl From<PublishResult> for PublishResultResponse {
    fn from(result: PublishResult) -> Self {
        Self {
            custom_domains: result.custom_domain_ids().to_vec(),
            publish_to_webflow_subdomain: result.published_to_subdomain(),
        }
    }
}

fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
