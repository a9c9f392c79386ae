//! Shared helpers for the music commands.

pub(crate) mod event_handlers;
pub(crate) mod messages;
pub mod music_manager;
pub mod status_tracker;

use std::time::Duration;

/// Format a duration into a human-readable string
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs();
    let minutes = seconds / 60;
    let seconds = seconds % 60;

    if minutes >= 60 {
        let hours = minutes / 60;
        let minutes = minutes % 60;
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_seconds_only() {
        assert_eq!(format_duration(Duration::from_secs(5)), "0:05");
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_duration(Duration::from_secs(185)), "3:05");
    }

    #[test]
    fn formats_hours() {
        assert_eq!(format_duration(Duration::from_secs(3723)), "1:02:03");
    }
}
