//! Songbird track lifecycle notifiers that feed the status tracker.

use std::sync::Arc;
use std::time::Duration;

use serenity::all::ChannelId;
use serenity::async_trait;
use serenity::model::id::GuildId;
use songbird::tracks::TrackHandle;
use songbird::{Event, EventContext, Songbird, TrackEvent};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::status_tracker::StatusTracker;
use crate::commands::music::audio_sources::track_metadata::TrackMetadata;

/// How long the bot stays in an idle voice channel before disconnecting.
const IDLE_DISCONNECT_AFTER: Duration = Duration::from_secs(60);

/// Attaches the Play/End/Error notifiers for one enqueued track.
pub fn attach_track_events(
    handle: &TrackHandle,
    guild_id: GuildId,
    channel_id: ChannelId,
    metadata: TrackMetadata,
    status: Arc<StatusTracker>,
    manager: Arc<Songbird>,
) {
    let track_id = handle.uuid();

    let _ = handle.add_event(
        Event::Track(TrackEvent::Play),
        TrackStartNotifier {
            channel_id,
            track_id,
            metadata: metadata.clone(),
            status: Arc::clone(&status),
        },
    );

    let _ = handle.add_event(
        Event::Track(TrackEvent::End),
        TrackEndNotifier {
            guild_id,
            channel_id,
            track_id,
            metadata: metadata.clone(),
            status: Arc::clone(&status),
            manager,
        },
    );

    let _ = handle.add_event(
        Event::Track(TrackEvent::Error),
        TrackErrorNotifier {
            channel_id,
            track_id,
            metadata,
            status,
        },
    );
}

/// Rewrites the status message when its track starts playing.
struct TrackStartNotifier {
    channel_id: ChannelId,
    track_id: Uuid,
    metadata: TrackMetadata,
    status: Arc<StatusTracker>,
}

#[async_trait]
impl songbird::EventHandler for TrackStartNotifier {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<Event> {
        if let EventContext::Track(_) = ctx {
            info!("Track '{}' started playing", self.metadata.title);
            self.status
                .mark_playing(self.channel_id, self.track_id, &self.metadata)
                .await;
        }
        None
    }
}

/// Finalizes the status message when its track ends, and leaves the voice
/// channel once the queue has been idle long enough.
struct TrackEndNotifier {
    guild_id: GuildId,
    channel_id: ChannelId,
    track_id: Uuid,
    metadata: TrackMetadata,
    status: Arc<StatusTracker>,
    manager: Arc<Songbird>,
}

#[async_trait]
impl songbird::EventHandler for TrackEndNotifier {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<Event> {
        if let EventContext::Track(_) = ctx {
            info!(
                "Track '{}' finished in guild {}",
                self.metadata.title, self.guild_id
            );
            self.status
                .mark_finished(self.channel_id, self.track_id, &self.metadata)
                .await;
            self.schedule_idle_disconnect();
        }
        None
    }
}

impl TrackEndNotifier {
    fn schedule_idle_disconnect(&self) {
        let manager = Arc::clone(&self.manager);
        let guild_id = self.guild_id;

        tokio::spawn(async move {
            tokio::time::sleep(IDLE_DISCONNECT_AFTER).await;

            let Some(call) = manager.get(guild_id) else {
                return;
            };
            let idle = call.lock().await.queue().is_empty();
            if !idle {
                return;
            }

            info!(
                "Queue idle for {:?} in guild {}, leaving voice channel",
                IDLE_DISCONNECT_AFTER, guild_id
            );
            if let Err(e) = manager.remove(guild_id).await {
                debug!("Failed to leave voice channel for guild {}: {}", guild_id, e);
            }
        });
    }
}

/// Clears the registry entry for a track the driver could not play.
struct TrackErrorNotifier {
    channel_id: ChannelId,
    track_id: Uuid,
    metadata: TrackMetadata,
    status: Arc<StatusTracker>,
}

#[async_trait]
impl songbird::EventHandler for TrackErrorNotifier {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<Event> {
        if let EventContext::Track(_) = ctx {
            warn!("Playback error for track '{}'", self.metadata.title);
            self.status
                .mark_errored(self.channel_id, self.track_id, &self.metadata)
                .await;
        }
        None
    }
}
