//! Classifying play requests and resolving them to track metadata.

pub mod track_metadata;
pub(crate) mod youtube;

use std::sync::LazyLock;

use regex::Regex;
use serenity::async_trait;

use self::track_metadata::TrackMetadata;
use crate::commands::music::utils::music_manager::MusicError;

/// Resolves a play query to track metadata. The production implementation
/// shells out to `yt-dlp`; tests substitute a mock.
#[async_trait]
pub trait TrackResolver: Send + Sync {
    async fn by_url(&self, url: &str, requested_by: String) -> Result<TrackMetadata, MusicError>;

    /// `Ok(None)` means the search matched nothing.
    async fn by_search(
        &self,
        term: &str,
        requested_by: String,
    ) -> Result<Option<TrackMetadata>, MusicError>;
}

/// Known media hosts treated as direct links even without an explicit scheme,
/// with an optional `www.` prefix.
static MEDIA_HOST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(www\.)?(youtube\.com|youtu\.be|soundcloud\.com|vimeo\.com)").unwrap()
});

/// What the user asked `!play` for: a direct media locator or a search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayQuery {
    DirectUrl(String),
    Search(String),
}

impl PlayQuery {
    /// Classifies raw user input. Pure; trims the input first.
    ///
    /// Empty input classifies as a search term; callers reject empty queries
    /// before invoking playback.
    pub fn classify(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Self::DirectUrl(trimmed.to_string());
        }
        if MEDIA_HOST_REGEX.is_match(trimmed) {
            return Self::DirectUrl(trimmed.to_string());
        }
        Self::Search(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("https://youtu.be/dQw4w9WgXcQ"; "https short link")]
    #[test_case("http://example.com/file.mp3"; "http direct file")]
    #[test_case("  https://www.youtube.com/watch?v=abc  "; "padded https url")]
    fn scheme_prefixed_input_is_a_direct_url(input: &str) {
        assert_eq!(
            PlayQuery::classify(input),
            PlayQuery::DirectUrl(input.trim().to_string())
        );
    }

    #[test_case("youtube.com/watch?v=abc")]
    #[test_case("www.youtube.com/watch?v=abc")]
    #[test_case("YOUTU.BE/dQw4w9WgXcQ")]
    #[test_case("SoundCloud.com/artist/track")]
    #[test_case("vimeo.com/12345")]
    fn known_media_hosts_match_case_insensitively(input: &str) {
        assert_eq!(
            PlayQuery::classify(input),
            PlayQuery::DirectUrl(input.to_string())
        );
    }

    #[test]
    fn free_text_is_a_search_term_after_trimming() {
        assert_eq!(
            PlayQuery::classify("  some song name "),
            PlayQuery::Search("some song name".to_string())
        );
    }

    #[test]
    fn empty_input_is_an_empty_search_term() {
        assert_eq!(PlayQuery::classify("   "), PlayQuery::Search(String::new()));
    }

    #[test]
    fn host_match_requires_start_of_input() {
        assert_eq!(
            PlayQuery::classify("watch youtube.com videos"),
            PlayQuery::Search("watch youtube.com videos".to_string())
        );
    }

    #[test]
    fn direct_url_keeps_the_exact_trimmed_string() {
        let input = "https://youtu.be/dQw4w9WgXcQ";
        match PlayQuery::classify(input) {
            PlayQuery::DirectUrl(url) => assert_eq!(url, input),
            other => panic!("expected DirectUrl, got {other:?}"),
        }
    }
}
