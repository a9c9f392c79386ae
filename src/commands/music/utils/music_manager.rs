//! Voice connection plumbing around songbird and its built-in track queue.

use std::sync::Arc;

use serenity::client::Context;
use serenity::model::id::{ChannelId, GuildId, UserId};
use serenity::prelude::Mutex as SerenityMutex;
use songbird::input::YoutubeDl;
use songbird::tracks::{Track, TrackHandle, TrackQueue};
use songbird::{Call, Songbird};
use thiserror::Error;

use crate::HTTP_CLIENT;
use crate::commands::music::audio_sources::track_metadata::TrackMetadata;

/// Errors that can occur during music operations
#[derive(Error, Debug)]
pub enum MusicError {
    #[error("Not in a guild")]
    NotInGuild,

    #[error("Failed to join voice channel: {0}")]
    JoinError(String),

    #[error("Not connected to a voice channel")]
    NotConnected,

    #[error("Failed to get voice manager")]
    NoVoiceManager,

    #[error("User is not in a voice channel")]
    UserNotInVoiceChannel,

    #[error("Audio source error: {0}")]
    AudioSourceError(String),
}

/// Result type for music operations
pub type MusicResult<T> = Result<T, MusicError>;

/// Static access to songbird's voice state; per-guild queue ordering and
/// playback live inside songbird, not here.
pub struct MusicManager;

impl MusicManager {
    /// Get the songbird voice client from the context
    pub async fn get_songbird(ctx: &Context) -> MusicResult<Arc<Songbird>> {
        songbird::get(ctx).await.ok_or(MusicError::NoVoiceManager)
    }

    /// Get the current voice channel call handle
    pub async fn get_call(
        ctx: &Context,
        guild_id: GuildId,
    ) -> MusicResult<Arc<SerenityMutex<Call>>> {
        let songbird = Self::get_songbird(ctx).await?;
        songbird.get(guild_id).ok_or(MusicError::NotConnected)
    }

    /// Clone of this guild's built-in track queue, if connected.
    pub async fn get_queue(ctx: &Context, guild_id: GuildId) -> MusicResult<TrackQueue> {
        let call = Self::get_call(ctx, guild_id).await?;
        let queue = call.lock().await.queue().clone();
        Ok(queue)
    }

    /// Join a voice channel
    pub async fn join_channel(
        ctx: &Context,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> MusicResult<Arc<SerenityMutex<Call>>> {
        let songbird = Self::get_songbird(ctx).await?;

        let handle = songbird
            .join(guild_id, channel_id)
            .await
            .map_err(|e| MusicError::JoinError(e.to_string()))?;

        Ok(handle)
    }

    /// Get the voice channel ID that the user is currently in
    pub fn get_user_voice_channel(
        ctx: &Context,
        guild_id: GuildId,
        user_id: UserId,
    ) -> MusicResult<ChannelId> {
        let guild = ctx.cache.guild(guild_id).ok_or(MusicError::NotInGuild)?;

        let voice_state = guild
            .voice_states
            .get(&user_id)
            .ok_or(MusicError::UserNotInVoiceChannel)?;

        voice_state
            .channel_id
            .ok_or(MusicError::UserNotInVoiceChannel)
    }

    /// Enqueues a lazy `yt-dlp` input for the track on this call's queue,
    /// attaching the metadata as the track's user data.
    ///
    /// Returns the track handle and the queue length right after insertion
    /// (the current track counts, so length 1 means playback starts now).
    pub async fn enqueue(
        call: &Arc<SerenityMutex<Call>>,
        metadata: TrackMetadata,
    ) -> MusicResult<(TrackHandle, usize)> {
        let url = metadata.url.clone().ok_or_else(|| {
            MusicError::AudioSourceError(format!("Track '{}' has no playable URL", metadata.title))
        })?;

        let input = YoutubeDl::new(HTTP_CLIENT.clone(), url);
        let mut track = Track::from(input);
        track.user_data = Arc::new(metadata);

        let mut handler = call.lock().await;
        let handle = handler.enqueue(track).await;
        let queue_len = handler.queue().len();

        Ok((handle, queue_len))
    }
}
