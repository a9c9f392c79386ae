//! User-facing reply and status-message text.

use super::format_duration;
use crate::commands::COMMANDS;
use crate::commands::music::audio_sources::track_metadata::TrackMetadata;
use crate::config::COMMAND_PREFIX;

fn duration_str(metadata: &TrackMetadata) -> String {
    metadata
        .duration
        .map(format_duration)
        .unwrap_or_else(|| "0:00".to_string())
}

pub fn help_text() -> String {
    let lines: Vec<String> = COMMANDS
        .iter()
        .map(|command| {
            let aliases = if command.aliases.is_empty() {
                String::new()
            } else {
                format!(" ({})", command.aliases.join(", "))
            };
            format!(
                "{}{}{}: {}",
                COMMAND_PREFIX, command.name, aliases, command.description
            )
        })
        .collect();
    format!("Available commands:\n```{}```", lines.join("\n"))
}

pub fn play_usage() -> String {
    format!(
        "Tell me what to play. Example: `{}play never gonna give you up`",
        COMMAND_PREFIX
    )
}

pub fn voice_channel_required() -> String {
    "You need to be in a voice channel to use this command.".to_string()
}

pub fn searching() -> String {
    "🔍 **Searching...**".to_string()
}

pub fn downloading() -> String {
    "⬇️ **Downloading...**".to_string()
}

pub fn downloading_named(title: &str) -> String {
    format!("⬇️ **Downloading:** `{}`", title)
}

pub fn nothing_found(query: &str) -> String {
    format!(
        "Nothing found for \"{}\". Try a different search or a URL.",
        query
    )
}

pub fn now_playing(metadata: &TrackMetadata) -> String {
    format!(
        "▶️ **Now playing:** `{}` ({})",
        metadata.title,
        duration_str(metadata)
    )
}

pub fn queued(metadata: &TrackMetadata, position: usize) -> String {
    format!(
        "📋 **Queued:** `{}` ({}) at position #{}",
        metadata.title,
        duration_str(metadata),
        position
    )
}

pub fn playback_finished(metadata: &TrackMetadata) -> String {
    format!("✅ **Finished:** `{}`", metadata.title)
}

pub fn playback_errored(metadata: &TrackMetadata) -> String {
    format!("⚠️ **Playback failed:** `{}`", metadata.title)
}

pub fn playback_failed() -> String {
    "Couldn't play that. Try another search or link.".to_string()
}

pub fn nothing_playing() -> String {
    "Nothing is playing.".to_string()
}

pub fn already_paused() -> String {
    "Already paused.".to_string()
}

pub fn not_paused() -> String {
    "Nothing is paused.".to_string()
}

pub fn paused() -> String {
    "Paused.".to_string()
}

pub fn resumed() -> String {
    "Resumed.".to_string()
}

pub fn skipped(metadata: &TrackMetadata) -> String {
    format!("⏭️ Skipping `{}`...", metadata.title)
}

pub fn queue_empty() -> String {
    "The queue is empty.".to_string()
}

pub fn queue_list(tracks: &[TrackMetadata]) -> String {
    let lines: Vec<String> = tracks
        .iter()
        .enumerate()
        .map(|(index, track)| format!("{}. {} ({})", index + 1, track.title, duration_str(track)))
        .collect();
    format!("Up next:\n```{}```", lines.join("\n"))
}

pub fn now_playing_reply(metadata: &TrackMetadata) -> String {
    let requested = metadata
        .requested_by
        .as_deref()
        .map(|name| format!(", requested by {}", name))
        .unwrap_or_default();
    format!(
        "Now playing: `{}` ({}){}",
        metadata.title,
        duration_str(metadata),
        requested
    )
}

pub fn guild_not_allowed() -> String {
    "This server isn't authorized to use this bot.".to_string()
}

pub fn command_failed() -> String {
    "Something went wrong running that command.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn metadata() -> TrackMetadata {
        TrackMetadata {
            title: "Test Song".to_string(),
            url: Some("https://example.com/song".to_string()),
            duration: Some(Duration::from_secs(185)),
            thumbnail: None,
            requested_by: Some("tester".to_string()),
        }
    }

    #[test]
    fn now_playing_contains_title_and_duration() {
        let text = now_playing(&metadata());
        assert!(text.contains("Test Song"));
        assert!(text.contains("3:05"));
    }

    #[test]
    fn missing_duration_renders_as_zero() {
        let mut meta = metadata();
        meta.duration = None;
        assert!(now_playing(&meta).contains("0:00"));
    }

    #[test]
    fn queued_shows_the_position() {
        let text = queued(&metadata(), 3);
        assert!(text.contains("#3"));
        assert!(text.contains("Queued"));
    }

    #[test]
    fn finished_contains_only_the_title() {
        let text = playback_finished(&metadata());
        assert!(text.contains("Test Song"));
        assert!(!text.contains("3:05"));
    }

    #[test]
    fn help_lists_every_command_with_prefix() {
        let text = help_text();
        for command in COMMANDS {
            assert!(
                text.contains(&format!("{}{}", COMMAND_PREFIX, command.name)),
                "help text is missing {}",
                command.name
            );
        }
    }

    #[test]
    fn queue_list_numbers_tracks_from_one() {
        let tracks = vec![metadata(), metadata()];
        let text = queue_list(&tracks);
        assert!(text.contains("1. Test Song"));
        assert!(text.contains("2. Test Song"));
    }

    #[test]
    fn playing_reply_names_the_requestor() {
        assert_eq!(
            now_playing_reply(&metadata()),
            "Now playing: `Test Song` (3:05), requested by tester"
        );
    }
}
