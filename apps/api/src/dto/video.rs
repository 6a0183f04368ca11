use flowcms_domain::VideoSource;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query of the video preview route.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/video-preview-query.ts"
)]
pub struct VideoPreviewQuery {
    #[serde(default)]
    pub url: String,
}

/// Classified video URL.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/video-preview-response.ts"
)]
pub struct VideoPreviewResponse {
    pub url: String,
    #[ts(type = "unknown")]
    pub source: VideoSource,
}
