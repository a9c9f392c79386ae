//! Tracks the editable status message for each in-flight track.
//!
//! One `!play` request sends one status message; the tracker keeps its handle
//! keyed by (text channel, track) and rewrites it as the track moves through
//! queued, playing, and finished. Entries are removed when a track finishes
//! or errors, so the map only ever holds in-flight notifications. Nothing is
//! persisted; a restart simply forgets pending edits.

use std::sync::Arc;

use dashmap::DashMap;
use serenity::all::{ChannelId, EditMessage, Http, MessageId};
use serenity::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::messages;
use crate::commands::music::audio_sources::track_metadata::TrackMetadata;

/// A previously sent message that can later be edited in place.
#[async_trait]
pub trait StatusHandle: Send + Sync {
    async fn edit(&self, content: String) -> serenity::Result<()>;
}

/// `StatusHandle` backed by a real Discord message.
pub struct DiscordStatusMessage {
    http: Arc<Http>,
    channel_id: ChannelId,
    message_id: MessageId,
}

impl DiscordStatusMessage {
    pub fn new(http: Arc<Http>, channel_id: ChannelId, message_id: MessageId) -> Self {
        Self {
            http,
            channel_id,
            message_id,
        }
    }
}

#[async_trait]
impl StatusHandle for DiscordStatusMessage {
    async fn edit(&self, content: String) -> serenity::Result<()> {
        self.channel_id
            .edit_message(
                &self.http,
                self.message_id,
                EditMessage::new().content(content),
            )
            .await
            .map(|_| ())
    }
}

/// Registry of status messages for in-flight tracks.
///
/// Constructed once at startup and shared by `Arc` between the gateway
/// handler and the track lifecycle notifiers.
pub struct StatusTracker {
    entries: DashMap<(ChannelId, Uuid), Arc<dyn StatusHandle>>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Inserts an entry for the (channel, track) pair. Last registration wins.
    pub fn register(&self, channel_id: ChannelId, track_id: Uuid, handle: Arc<dyn StatusHandle>) {
        self.entries.insert((channel_id, track_id), handle);
    }

    /// Test hook; the bot itself observes entries only through the `mark_*`
    /// calls.
    #[doc(hidden)]
    pub fn is_tracked(&self, channel_id: ChannelId, track_id: Uuid) -> bool {
        self.entries.contains_key(&(channel_id, track_id))
    }

    /// Rewrites the status message to "now playing". A missing entry is a
    /// silent no-op.
    pub async fn mark_playing(
        &self,
        channel_id: ChannelId,
        track_id: Uuid,
        metadata: &TrackMetadata,
    ) {
        let Some(handle) = self.get(channel_id, track_id) else {
            return;
        };
        Self::best_effort_edit(&handle, messages::now_playing(metadata)).await;
    }

    /// Removes the entry unconditionally, then applies a "finished" edit.
    /// Idempotent: a second call for the same pair does nothing.
    pub async fn mark_finished(
        &self,
        channel_id: ChannelId,
        track_id: Uuid,
        metadata: &TrackMetadata,
    ) {
        let Some((_, handle)) = self.entries.remove(&(channel_id, track_id)) else {
            return;
        };
        Self::best_effort_edit(&handle, messages::playback_finished(metadata)).await;
    }

    /// Removes the entry for a track that errored out, so it cannot go stale,
    /// and rewrites the message to say playback failed.
    pub async fn mark_errored(
        &self,
        channel_id: ChannelId,
        track_id: Uuid,
        metadata: &TrackMetadata,
    ) {
        let Some((_, handle)) = self.entries.remove(&(channel_id, track_id)) else {
            return;
        };
        Self::best_effort_edit(&handle, messages::playback_errored(metadata)).await;
    }

    fn get(&self, channel_id: ChannelId, track_id: Uuid) -> Option<Arc<dyn StatusHandle>> {
        self.entries
            .get(&(channel_id, track_id))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Status edits are cosmetic; a deleted message or revoked permission
    /// must never disturb playback.
    async fn best_effort_edit(handle: &Arc<dyn StatusHandle>, content: String) {
        if let Err(e) = handle.edit(content).await {
            debug!("Status message edit failed: {}", e);
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}
