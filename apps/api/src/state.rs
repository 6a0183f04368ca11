use flowcms_application::{CmsService, ItemEditorService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub cms_service: CmsService,
    pub item_editor_service: ItemEditorService,
}

impl AppState {
    pub fn new(cms_service: CmsService) -> Self {
        Self {
            item_editor_service: ItemEditorService::new(cms_service.clone()),
            cms_service,
        }
    }
}
