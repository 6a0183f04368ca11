use serde::Serialize;

const UNKNOWN_LABEL_LIMIT: usize = 40;

/// Video container extensions played natively and their mime types.
const DIRECT_FILE_TYPES: [(&str, &str); 7] = [
    (".mp4", "video/mp4"),
    (".m4v", "video/mp4"),
    (".webm", "video/webm"),
    (".ogg", "video/ogg"),
    (".mov", "video/quicktime"),
    (".avi", "video/x-msvideo"),
    (".mkv", "video/x-matroska"),
];

/// Hosting provider a video URL points to, with the embed target to preview it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "provider",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum VideoSource {
    /// YouTube watch, short or embed URL.
    #[serde(rename = "youtube")]
    YouTube {
        /// Provider video id.
        video_id: String,
        /// Player iframe URL.
        embed_url: String,
    },
    /// Vimeo video with a numeric id.
    Vimeo {
        /// Provider video id.
        video_id: String,
        /// Player iframe URL.
        embed_url: String,
    },
    /// Video file served directly.
    DirectFile {
        /// Source URL.
        url: String,
        /// Mime type guessed from the extension.
        mime_type: String,
        /// Last path segment.
        file_name: String,
    },
    /// Dailymotion video page.
    Dailymotion {
        /// Provider video id.
        video_id: String,
        /// Player iframe URL.
        embed_url: String,
    },
    /// Facebook video page, embedded through the video plugin.
    Facebook {
        /// Source URL.
        url: String,
        /// Plugin iframe URL.
        embed_url: String,
    },
    /// TikTok video; only linked, never embedded.
    #[serde(rename = "tiktok")]
    TikTok {
        /// Source URL.
        url: String,
    },
    /// Any other URL, shown as a link.
    Unknown {
        /// Source URL.
        url: String,
        /// Link text, truncated for long URLs.
        label: String,
    },
}

impl VideoSource {
    /// Classifies a video URL. Rules are tried in order and the first match wins;
    /// a provider rule that cannot extract an id falls through to the next rule.
    #[must_use]
    pub fn classify(url: &str) -> Self {
        let url = url.trim();

        if let Some(source) = youtube(url) {
            return source;
        }
        if let Some(source) = vimeo(url) {
            return source;
        }
        if let Some(source) = direct_file(url) {
            return source;
        }
        if let Some(source) = dailymotion(url) {
            return source;
        }

        if url.contains("facebook.com") && url.contains("/videos/") {
            let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
            return Self::Facebook {
                url: url.to_owned(),
                embed_url: format!(
                    "https://www.facebook.com/plugins/video.php?href={encoded}&show_text=0&width=320"
                ),
            };
        }

        if url.contains("tiktok.com") {
            return Self::TikTok {
                url: url.to_owned(),
            };
        }

        Self::Unknown {
            url: url.to_owned(),
            label: truncate_label(url),
        }
    }

    /// Returns the provider video id, when the source has one.
    #[must_use]
    pub fn video_id(&self) -> Option<&str> {
        match self {
            Self::YouTube { video_id, .. }
            | Self::Vimeo { video_id, .. }
            | Self::Dailymotion { video_id, .. } => Some(video_id.as_str()),
            Self::DirectFile { .. }
            | Self::Facebook { .. }
            | Self::TikTok { .. }
            | Self::Unknown { .. } => None,
        }
    }

    /// Returns the iframe URL, when the source can be embedded.
    #[must_use]
    pub fn embed_url(&self) -> Option<&str> {
        match self {
            Self::YouTube { embed_url, .. }
            | Self::Vimeo { embed_url, .. }
            | Self::Dailymotion { embed_url, .. }
            | Self::Facebook { embed_url, .. } => Some(embed_url.as_str()),
            Self::DirectFile { .. } | Self::TikTok { .. } | Self::Unknown { .. } => None,
        }
    }
}

fn youtube(url: &str) -> Option<VideoSource> {
    if !url.contains("youtube.com") && !url.contains("youtu.be") {
        return None;
    }

    let video_id = if let Some(rest) = segment_after(url, "youtu.be/") {
        cut_at(rest, &['?', '&'])
    } else if let Some(rest) = segment_after(url, "watch?v=") {
        cut_at(rest, &['&'])
    } else if let Some(rest) = segment_after(url, "embed/") {
        cut_at(rest, &['?'])
    } else {
        return None;
    };

    if video_id.is_empty() {
        return None;
    }

    Some(VideoSource::YouTube {
        video_id: video_id.to_owned(),
        embed_url: format!("https://www.youtube.com/embed/{video_id}"),
    })
}

fn vimeo(url: &str) -> Option<VideoSource> {
    let video_id = cut_at(segment_after(url, "vimeo.com/")?, &['?', '/']);
    if video_id.is_empty() || !video_id.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    Some(VideoSource::Vimeo {
        video_id: video_id.to_owned(),
        embed_url: format!("https://player.vimeo.com/video/{video_id}"),
    })
}

fn direct_file(url: &str) -> Option<VideoSource> {
    let lowered = url.to_ascii_lowercase();
    let (_, mime_type) = DIRECT_FILE_TYPES
        .iter()
        .find(|(extension, _)| lowered.ends_with(extension))?;

    let file_name = url.rsplit('/').next().unwrap_or(url);
    Some(VideoSource::DirectFile {
        url: url.to_owned(),
        mime_type: (*mime_type).to_owned(),
        file_name: file_name.to_owned(),
    })
}

fn dailymotion(url: &str) -> Option<VideoSource> {
    if !url.contains("dailymotion.com") {
        return None;
    }

    let video_id = cut_at(segment_after(url, "/video/")?, &['?', '_']);
    if video_id.is_empty() {
        return None;
    }

    Some(VideoSource::Dailymotion {
        video_id: video_id.to_owned(),
        embed_url: format!("https://www.dailymotion.com/embed/video/{video_id}"),
    })
}

/// Returns the text after the first occurrence of `marker`.
fn segment_after<'a>(url: &'a str, marker: &str) -> Option<&'a str> {
    url.find(marker).map(|index| &url[index + marker.len()..])
}

fn cut_at<'a>(segment: &'a str, delimiters: &[char]) -> &'a str {
    segment
        .find(|character| delimiters.contains(&character))
        .map_or(segment, |index| &segment[..index])
}

fn truncate_label(url: &str) -> String {
    if url.chars().count() > UNKNOWN_LABEL_LIMIT {
        let prefix: String = url.chars().take(UNKNOWN_LABEL_LIMIT).collect();
        format!("{prefix}...")
    } else {
        url.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::VideoSource;

    #[test]
    fn youtube_short_links_extract_the_id() {
        let source = VideoSource::classify("https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(
            source,
            VideoSource::YouTube {
                video_id: "dQw4w9WgXcQ".to_owned(),
                embed_url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_owned(),
            }
        );
    }

    #[test]
    fn youtube_watch_and_embed_links_extract_the_id() {
        let watch = VideoSource::classify("https://www.youtube.com/watch?v=abc123&t=42");
        assert_eq!(watch.video_id(), Some("abc123"));

        let embed = VideoSource::classify("https://www.youtube.com/embed/xyz789?autoplay=1");
        assert_eq!(embed.video_id(), Some("xyz789"));
    }

    #[test]
    fn youtube_without_an_id_falls_through() {
        let source = VideoSource::classify("https://www.youtube.com/channel/somebody");
        assert!(matches!(source, VideoSource::Unknown { .. }));
    }

    #[test]
    fn vimeo_requires_a_numeric_id() {
        let numeric = VideoSource::classify("https://vimeo.com/76979871");
        assert_eq!(
            numeric,
            VideoSource::Vimeo {
                video_id: "76979871".to_owned(),
                embed_url: "https://player.vimeo.com/video/76979871".to_owned(),
            }
        );

        let named = VideoSource::classify("https://vimeo.com/abc");
        assert!(matches!(named, VideoSource::Unknown { .. }));
    }

    #[test]
    fn direct_files_are_detected_by_extension() {
        let source = VideoSource::classify("https://cdn.example.com/media/Clip.MOV");
        assert_eq!(
            source,
            VideoSource::DirectFile {
                url: "https://cdn.example.com/media/Clip.MOV".to_owned(),
                mime_type: "video/quicktime".to_owned(),
                file_name: "Clip.MOV".to_owned(),
            }
        );

        let bare = VideoSource::classify("clip.mp4");
        assert!(matches!(
            bare,
            VideoSource::DirectFile { ref file_name, .. } if file_name == "clip.mp4"
        ));
    }

    #[test]
    fn dailymotion_ids_drop_the_slug_suffix() {
        let source =
            VideoSource::classify("https://www.dailymotion.com/video/x7tgad0_some-title?play=1");
        assert_eq!(source.video_id(), Some("x7tgad0"));
        assert_eq!(
            source.embed_url(),
            Some("https://www.dailymotion.com/embed/video/x7tgad0")
        );
    }

    #[test]
    fn facebook_videos_embed_the_encoded_page_url() {
        let source = VideoSource::classify("https://www.facebook.com/page/videos/123/");
        assert_eq!(
            source.embed_url(),
            Some(
                "https://www.facebook.com/plugins/video.php?href=https%3A%2F%2Fwww.facebook.com%2Fpage%2Fvideos%2F123%2F&show_text=0&width=320"
            )
        );
    }

    #[test]
    fn tiktok_is_linked_only() {
        let source = VideoSource::classify("https://www.tiktok.com/@user/video/1");
        assert!(matches!(source, VideoSource::TikTok { .. }));
        assert_eq!(source.embed_url(), None);
    }

    #[test]
    fn unknown_urls_get_a_truncated_label() {
        let short = VideoSource::classify("  https://example.com/page  ");
        assert_eq!(
            short,
            VideoSource::Unknown {
                url: "https://example.com/page".to_owned(),
                label: "https://example.com/page".to_owned(),
            }
        );

        let long = VideoSource::classify("https://example.com/a/very/long/path/to/some/video/page");
        assert!(
            matches!(long, VideoSource::Unknown { ref label, .. } if label == "https://example.com/a/very/long/path/to/...")
        );
    }

    #[test]
    fn serializes_with_provider_tag() {
        let value = serde_json::to_value(VideoSource::classify("https://youtu.be/abc"))
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(
            value,
            json!({
                "provider": "youtube",
                "videoId": "abc",
                "embedUrl": "https://www.youtube.com/embed/abc",
            })
        );
    }
}
