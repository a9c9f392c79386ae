use serenity::all::Message;
use serenity::client::Context;

use super::audio_sources::track_metadata::TrackMetadata;
use super::utils::messages;
use super::utils::music_manager::{MusicError, MusicManager};
use crate::Error;
use crate::commands::Sendable;

/// Show the track playing right now
pub async fn playing(ctx: &Context, msg: &Message, target: &Sendable) -> Result<(), Error> {
    let guild_id = msg.guild_id.ok_or(MusicError::NotInGuild)?;

    let queue = match MusicManager::get_queue(ctx, guild_id).await {
        Ok(queue) => queue,
        Err(_) => {
            target.send(&ctx.http, messages::nothing_playing()).await?;
            return Ok(());
        }
    };

    let Some(current) = queue.current() else {
        target.send(&ctx.http, messages::nothing_playing()).await?;
        return Ok(());
    };

    let metadata = current.data::<TrackMetadata>();
    target
        .send(&ctx.http, messages::now_playing_reply(&metadata))
        .await?;

    Ok(())
}
