//! Resolves URLs and search terms to track metadata with the `yt-dlp`
//! command-line tool.

use std::process::{Command, Output};

use serenity::async_trait;
use tracing::info;
use url::Url;

use super::TrackResolver;
use super::track_metadata::{AUDIO_CACHE, TrackMetadata};
use crate::commands::music::utils::music_manager::MusicError;

pub struct YoutubeApi;

#[async_trait]
impl TrackResolver for YoutubeApi {
    /// Fetches metadata for a direct media URL.
    ///
    /// Checks the metadata cache first; the cache is keyed by the resolved
    /// page URL, so only exact re-requests hit it.
    async fn by_url(&self, url: &str, requested_by: String) -> Result<TrackMetadata, MusicError> {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(cached) = AUDIO_CACHE.get(&parsed) {
                let mut metadata = cached.clone();
                metadata.requested_by = Some(requested_by);
                return Ok(metadata);
            }
        }

        info!("Fetching metadata for URL: {}", url);
        let output = run_yt_dlp(url.to_string()).await?;
        TrackMetadata::from_youtube(output, requested_by)
    }

    /// Fetches metadata for the first YouTube search result, or `None` when
    /// the search matched nothing.
    async fn by_search(
        &self,
        search_term: &str,
        requested_by: String,
    ) -> Result<Option<TrackMetadata>, MusicError> {
        info!("Searching for track: {}", search_term);
        let output = run_yt_dlp(format!("ytsearch1:{}", search_term)).await?;

        if search_missed(&output.stdout) {
            return Ok(None);
        }

        TrackMetadata::from_youtube(output, requested_by).map(Some)
    }
}

/// yt-dlp exits cleanly with empty output when a search has no hits.
fn search_missed(stdout: &[u8]) -> bool {
    stdout.iter().all(u8::is_ascii_whitespace)
}

/// Runs `yt-dlp` off the async runtime; a metadata fetch takes seconds.
async fn run_yt_dlp(target: String) -> Result<Output, MusicError> {
    tokio::task::spawn_blocking(move || {
        let output = Command::new("yt-dlp")
            .args([
                "-j",            // Output as JSON
                "--no-playlist", // Don't process playlists
                &target,
            ])
            .output()
            .map_err(|e| {
                MusicError::AudioSourceError(format!("Failed to get video metadata: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MusicError::AudioSourceError(format!(
                "yt-dlp failed for '{}': {}",
                target,
                stderr.trim()
            )));
        }

        Ok(output)
    })
    .await
    .map_err(|e| MusicError::AudioSourceError(format!("yt-dlp task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_output_means_the_search_missed() {
        assert!(search_missed(b""));
        assert!(search_missed(b"  \n\t"));
    }

    #[test]
    fn json_output_means_a_hit() {
        assert!(!search_missed(br#"{"title": "Song"}"#));
    }
}
