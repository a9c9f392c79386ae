//! Defines the `TrackMetadata` struct shared across commands and notifiers,
//! and the conversion from `yt-dlp` output.

use std::process::Output;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use dashmap::DashMap;
use serde::Deserialize;
use url::Url;

use crate::commands::music::utils::music_manager::MusicError;

/// Thread-safe cache of fetched metadata keyed by the track's resolved URL,
/// so repeated `!play` of the same link skips the `yt-dlp` round trip.
pub static AUDIO_CACHE: LazyLock<Arc<DashMap<Url, TrackMetadata>>> =
    LazyLock::new(|| Arc::new(DashMap::new()));

/// Display metadata for a playable track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMetadata {
    pub title: String,
    /// The resolved page URL, if `yt-dlp` reported one.
    pub url: Option<String>,
    pub duration: Option<Duration>,
    pub thumbnail: Option<String>,
    /// Name of the user who requested the track.
    pub requested_by: Option<String>,
}

/// The subset of `yt-dlp --dump-json` output we care about.
#[derive(Debug, Deserialize)]
struct YtDlpMetadata {
    title: Option<String>,
    duration: Option<f64>,
    thumbnail: Option<String>,
    webpage_url: Option<String>,
}

impl TrackMetadata {
    /// Creates metadata from `yt-dlp` output, adding the requestor's name.
    pub fn from_youtube(output: Output, requested_by: String) -> Result<Self, MusicError> {
        let mut metadata = Self::try_from(output)?;
        metadata.requested_by = Some(requested_by);
        Ok(metadata)
    }

    /// Decodes the JSON document `yt-dlp -j` prints for a single video.
    pub fn from_json(bytes: &[u8]) -> Result<Self, MusicError> {
        let raw: YtDlpMetadata = serde_json::from_slice(bytes).map_err(|e| {
            MusicError::AudioSourceError(format!("Failed to parse video metadata: {}", e))
        })?;

        let metadata = TrackMetadata {
            title: raw.title.unwrap_or_else(|| "Unknown Title".to_string()),
            url: raw.webpage_url,
            duration: raw.duration.map(Duration::from_secs_f64),
            thumbnail: raw.thumbnail,
            requested_by: None,
        };

        if let Some(url) = &metadata.url {
            if let Ok(url) = Url::parse(url) {
                AUDIO_CACHE.insert(url, metadata.clone());
            }
        }

        Ok(metadata)
    }
}

impl TryFrom<Output> for TrackMetadata {
    type Error = MusicError;

    fn try_from(value: Output) -> Result<Self, Self::Error> {
        Self::from_json(&value.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_yt_dlp_json() {
        let json = br#"{
            "title": "Never Gonna Give You Up",
            "duration": 213.0,
            "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq720.jpg",
            "webpage_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        }"#;

        let metadata = TrackMetadata::from_json(json).unwrap();
        assert_eq!(metadata.title, "Never Gonna Give You Up");
        assert_eq!(metadata.duration, Some(Duration::from_secs(213)));
        assert_eq!(
            metadata.url.as_deref(),
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        );
        assert_eq!(metadata.requested_by, None);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let metadata = TrackMetadata::from_json(b"{}").unwrap();
        assert_eq!(metadata.title, "Unknown Title");
        assert_eq!(metadata.url, None);
        assert_eq!(metadata.duration, None);
    }

    #[test]
    fn malformed_output_is_an_audio_source_error() {
        let result = TrackMetadata::from_json(b"not json");
        assert!(matches!(result, Err(MusicError::AudioSourceError(_))));
    }

    #[test]
    fn decoded_metadata_lands_in_the_cache() {
        let json = br#"{"title": "Cached", "webpage_url": "https://example.com/cached-track"}"#;
        TrackMetadata::from_json(json).unwrap();

        let key = Url::parse("https://example.com/cached-track").unwrap();
        let hit = AUDIO_CACHE.get(&key).expect("metadata should be cached");
        assert_eq!(hit.title, "Cached");
    }
}
