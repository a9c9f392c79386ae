use serenity::all::Message;
use serenity::client::Context;

use super::audio_sources::track_metadata::TrackMetadata;
use super::utils::messages;
use super::utils::music_manager::{MusicError, MusicManager};
use crate::Error;
use crate::commands::Sendable;

/// Show the upcoming tracks
pub async fn queue(ctx: &Context, msg: &Message, target: &Sendable) -> Result<(), Error> {
    let guild_id = msg.guild_id.ok_or(MusicError::NotInGuild)?;

    let queue = match MusicManager::get_queue(ctx, guild_id).await {
        Ok(queue) => queue,
        Err(_) => {
            target.send(&ctx.http, messages::queue_empty()).await?;
            return Ok(());
        }
    };

    // current_queue() includes the playing track at index 0; only the
    // pending tracks belong in the listing.
    let pending: Vec<TrackMetadata> = queue
        .current_queue()
        .iter()
        .skip(1)
        .map(|handle| handle.data::<TrackMetadata>().as_ref().clone())
        .collect();

    if pending.is_empty() {
        target.send(&ctx.http, messages::queue_empty()).await?;
    } else {
        target
            .send(&ctx.http, messages::queue_list(&pending))
            .await?;
    }

    Ok(())
}
