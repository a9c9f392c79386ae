use serenity::all::Message;
use serenity::client::Context;
use songbird::tracks::PlayMode;

use super::utils::messages;
use super::utils::music_manager::{MusicError, MusicManager};
use crate::Error;
use crate::commands::Sendable;

/// Pause the current track
pub async fn pause(ctx: &Context, msg: &Message, target: &Sendable) -> Result<(), Error> {
    let guild_id = msg.guild_id.ok_or(MusicError::NotInGuild)?;

    if MusicManager::get_user_voice_channel(ctx, guild_id, msg.author.id).is_err() {
        target
            .send(&ctx.http, messages::voice_channel_required())
            .await?;
        return Ok(());
    }

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

    let info = current.get_info().await?;
    match info.playing {
        PlayMode::Pause => {
            target.send(&ctx.http, messages::already_paused()).await?;
        }
        _ => {
            queue.pause()?;
            target.send(&ctx.http, messages::paused()).await?;
        }
    }

    Ok(())
}
