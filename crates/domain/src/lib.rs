//! Domain entities and the field-type-driven value model of the CMS manager.

#![forbid(unsafe_code)]

mod cms;
mod edit_state;
mod field_display;
mod field_type;
mod field_value;
pub mod item_field_codec;
mod video_source;

pub use cms::{Collection, CustomDomain, FieldDescriptor, FieldSchema, Item, PublishResult, Site};
pub use edit_state::{EditState, FieldIssue, ItemSubmission};
pub use field_display::{DisplayTone, FieldDisplay, ImageDisplay};
pub use field_type::{DEFAULT_COLOR, FieldType};
pub use field_value::{FieldValue, RawFieldValue};
pub use video_source::VideoSource;
