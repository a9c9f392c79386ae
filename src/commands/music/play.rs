//! The `!play` request handler.

use std::sync::Arc;

use serenity::all::{ChannelId, Message};
use serenity::client::Context;
use serenity::model::id::GuildId;
use tracing::{debug, error, info};

use super::audio_sources::track_metadata::TrackMetadata;
use super::audio_sources::{PlayQuery, TrackResolver, youtube::YoutubeApi};
use super::utils::event_handlers::attach_track_events;
use super::utils::messages;
use super::utils::music_manager::{MusicError, MusicManager};
use super::utils::status_tracker::{DiscordStatusMessage, StatusHandle, StatusTracker};
use crate::Error;
use crate::commands::Sendable;

struct PlayRequest {
    guild_id: GuildId,
    voice_channel: ChannelId,
    text_channel: ChannelId,
    requested_by: String,
    query: PlayQuery,
}

/// Resolve the query, enqueue the track, and keep the status message updated
/// through the track's lifecycle.
pub async fn play(
    ctx: &Context,
    msg: &Message,
    target: &Sendable,
    args: &[String],
    tracker: &Arc<StatusTracker>,
) -> Result<(), Error> {
    let guild_id = msg.guild_id.ok_or(MusicError::NotInGuild)?;

    let query = args.join(" ");
    let query = query.trim();
    if query.is_empty() {
        target.send(&ctx.http, messages::play_usage()).await?;
        return Ok(());
    }

    let voice_channel = match MusicManager::get_user_voice_channel(ctx, guild_id, msg.author.id) {
        Ok(channel_id) => channel_id,
        Err(_) => {
            target
                .send(&ctx.http, messages::voice_channel_required())
                .await?;
            return Ok(());
        }
    };

    info!("Play request in guild {}: {}", guild_id, query);
    let request = PlayRequest {
        guild_id,
        voice_channel,
        text_channel: target.channel_id(),
        requested_by: msg.author.name.clone(),
        query: PlayQuery::classify(query),
    };

    let initial = match &request.query {
        PlayQuery::DirectUrl(_) => messages::downloading(),
        PlayQuery::Search(_) => messages::searching(),
    };
    let status_message: Option<Arc<dyn StatusHandle>> = match target.send(&ctx.http, initial).await
    {
        Ok(sent) => Some(Arc::new(DiscordStatusMessage::new(
            ctx.http.clone(),
            sent.channel_id,
            sent.id,
        ))),
        Err(e) => {
            debug!("Could not send play status message: {}", e);
            None
        }
    };

    // The request handler is the error boundary: external failures become a
    // generic retry suggestion, never a raw error in chat.
    if let Err(e) = fulfill_request(ctx, &YoutubeApi, request, &status_message, tracker).await {
        error!("Play request failed in guild {}: {}", guild_id, e);
        update_status(&status_message, messages::playback_failed()).await;
    }

    Ok(())
}

async fn fulfill_request(
    ctx: &Context,
    resolver: &dyn TrackResolver,
    request: PlayRequest,
    status_message: &Option<Arc<dyn StatusHandle>>,
    tracker: &Arc<StatusTracker>,
) -> Result<(), Error> {
    let Some(metadata) = resolve_query(
        resolver,
        &request.query,
        request.requested_by.clone(),
        status_message,
    )
    .await?
    else {
        // Nothing resolved: no track enqueued, no registry entry.
        return Ok(());
    };

    // Join the user's voice channel unless already connected
    let call = match MusicManager::get_call(ctx, request.guild_id).await {
        Ok(call) => call,
        Err(_) => {
            MusicManager::join_channel(ctx, request.guild_id, request.voice_channel).await?
        }
    };

    let (handle, queue_len) = MusicManager::enqueue(&call, metadata.clone()).await?;

    let manager = MusicManager::get_songbird(ctx).await?;
    attach_track_events(
        &handle,
        request.guild_id,
        request.text_channel,
        metadata.clone(),
        Arc::clone(tracker),
        manager,
    );

    if let Some(status_handle) = status_message {
        tracker.register(request.text_channel, handle.uuid(), Arc::clone(status_handle));
    }

    update_status(status_message, enqueue_reply(&metadata, queue_len)).await;

    Ok(())
}

/// Resolves the query to track metadata, narrating progress on the status
/// message. `None` means a search matched nothing; the caller enqueues and
/// registers nothing in that case.
async fn resolve_query(
    resolver: &dyn TrackResolver,
    query: &PlayQuery,
    requested_by: String,
    status_message: &Option<Arc<dyn StatusHandle>>,
) -> Result<Option<TrackMetadata>, Error> {
    match query {
        PlayQuery::DirectUrl(url) => Ok(Some(resolver.by_url(url, requested_by).await?)),
        PlayQuery::Search(term) => match resolver.by_search(term, requested_by).await? {
            Some(metadata) => {
                update_status(status_message, messages::downloading_named(&metadata.title))
                    .await;
                Ok(Some(metadata))
            }
            None => {
                update_status(status_message, messages::nothing_found(term)).await;
                Ok(None)
            }
        },
    }
}

/// Status text for a freshly enqueued track. The built-in queue length
/// includes the current track, so length 1 means playback starts now.
fn enqueue_reply(metadata: &TrackMetadata, queue_len: usize) -> String {
    let position = queue_len.saturating_sub(1);
    if position == 0 {
        messages::now_playing(metadata)
    } else {
        messages::queued(metadata, position)
    }
}

/// Best-effort edit of the play status message; failures are cosmetic and
/// deliberately discarded here.
async fn update_status(status_message: &Option<Arc<dyn StatusHandle>>, content: String) {
    if let Some(message) = status_message {
        if let Err(e) = message.edit(content).await {
            debug!("Status message edit failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use mockall::mock;
    use mockall::predicate::function;
    use serenity::async_trait;

    mock! {
        Resolver {}

        #[async_trait]
        impl TrackResolver for Resolver {
            async fn by_url(
                &self,
                url: &str,
                requested_by: String,
            ) -> Result<TrackMetadata, MusicError>;

            async fn by_search(
                &self,
                term: &str,
                requested_by: String,
            ) -> Result<Option<TrackMetadata>, MusicError>;
        }
    }

    mock! {
        Status {}

        #[async_trait]
        impl StatusHandle for Status {
            async fn edit(&self, content: String) -> serenity::Result<()>;
        }
    }

    fn metadata(title: &str) -> TrackMetadata {
        TrackMetadata {
            title: title.to_string(),
            url: Some(format!("https://example.com/{title}")),
            duration: Some(Duration::from_secs(185)),
            thumbnail: None,
            requested_by: Some("tester".to_string()),
        }
    }

    #[tokio::test]
    async fn zero_search_results_report_nothing_found_and_yield_no_track() {
        let mut resolver = MockResolver::new();
        resolver
            .expect_by_search()
            .times(1)
            .returning(|_, _| Ok(None));

        let mut handle = MockStatus::new();
        handle
            .expect_edit()
            .with(function(|content: &String| {
                content.contains("Nothing found")
            }))
            .times(1)
            .returning(|_| Ok(()));

        let status: Option<Arc<dyn StatusHandle>> = Some(Arc::new(handle));
        let resolved = resolve_query(
            &resolver,
            &PlayQuery::Search("no such song".to_string()),
            "tester".to_string(),
            &status,
        )
        .await
        .unwrap();

        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn search_hits_narrate_the_download_with_the_title() {
        let mut resolver = MockResolver::new();
        resolver
            .expect_by_search()
            .times(1)
            .returning(|_, _| Ok(Some(metadata("Found Song"))));

        let mut handle = MockStatus::new();
        handle
            .expect_edit()
            .with(function(|content: &String| {
                content.contains("Downloading") && content.contains("Found Song")
            }))
            .times(1)
            .returning(|_| Ok(()));

        let status: Option<Arc<dyn StatusHandle>> = Some(Arc::new(handle));
        let resolved = resolve_query(
            &resolver,
            &PlayQuery::Search("found song".to_string()),
            "tester".to_string(),
            &status,
        )
        .await
        .unwrap();

        assert_eq!(resolved.map(|m| m.title), Some("Found Song".to_string()));
    }

    #[tokio::test]
    async fn direct_urls_resolve_without_searching() {
        let mut resolver = MockResolver::new();
        resolver
            .expect_by_url()
            .times(1)
            .returning(|_, _| Ok(metadata("Linked")));
        resolver.expect_by_search().never();

        let resolved = resolve_query(
            &resolver,
            &PlayQuery::DirectUrl("https://example.com/Linked".to_string()),
            "tester".to_string(),
            &None,
        )
        .await
        .unwrap();

        assert!(resolved.is_some());
    }

    #[tokio::test]
    async fn resolver_failures_propagate_to_the_error_boundary() {
        let mut resolver = MockResolver::new();
        resolver
            .expect_by_url()
            .times(1)
            .returning(|_, _| Err(MusicError::AudioSourceError("yt-dlp failed".to_string())));

        let result = resolve_query(
            &resolver,
            &PlayQuery::DirectUrl("https://example.com/broken".to_string()),
            "tester".to_string(),
            &None,
        )
        .await;

        assert!(result.is_err());
    }

    #[test]
    fn first_queue_slot_reads_now_playing() {
        let text = enqueue_reply(&metadata("Song"), 1);
        assert!(text.contains("Now playing"));
        assert!(text.contains("Song"));
    }

    #[test]
    fn later_queue_slots_read_queued_with_their_position() {
        let text = enqueue_reply(&metadata("Song"), 3);
        assert!(text.contains("Queued"));
        assert!(text.contains("#2"));
    }

    #[test]
    fn empty_queue_snapshot_still_reads_now_playing() {
        assert!(enqueue_reply(&metadata("Song"), 0).contains("Now playing"));
    }
}
