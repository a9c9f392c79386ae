//! Gateway event handling: command routing, the guild allow-list, and
//! startup logging.

use std::sync::Arc;

use serenity::all::{Guild, Message, Ready};
use serenity::async_trait;
use serenity::prelude::{Context, EventHandler};
use tracing::{debug, error, info, warn};

use crate::commands::music::utils::messages;
use crate::commands::music::utils::status_tracker::StatusTracker;
use crate::commands::{self, ParsedCommand, Sendable, music};
use crate::config::{COMMAND_PREFIX, Config};

pub struct Bot {
    config: Config,
    status: Arc<StatusTracker>,
}

impl Bot {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            status: Arc::new(StatusTracker::new()),
        }
    }
}

#[async_trait]
impl EventHandler for Bot {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Connected as {}", ready.user.name);
    }

    async fn guild_create(&self, ctx: Context, guild: Guild, _is_new: Option<bool>) {
        if self.config.is_guild_allowed(guild.id) {
            return;
        }

        warn!(
            "Joined unauthorized guild '{}' ({}), leaving",
            guild.name, guild.id
        );
        if let Err(e) = guild.id.leave(&ctx.http).await {
            error!("Failed to leave guild {}: {}", guild.id, e);
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let Some(parsed) = commands::parse_command(&msg.content, COMMAND_PREFIX) else {
            return;
        };
        let Some(guild_id) = msg.guild_id else {
            return;
        };

        // Resolve the reply capability once; unsupported channel kinds are
        // not serviced.
        let Some(target) = Sendable::resolve(&ctx, &msg).await else {
            debug!("Ignoring command in unsupported channel {}", msg.channel_id);
            return;
        };

        if !self.config.is_guild_allowed(guild_id) {
            if let Err(e) = target.send(&ctx.http, messages::guild_not_allowed()).await {
                debug!("Failed to send allow-list notice: {}", e);
            }
            return;
        }

        let ParsedCommand { name, args } = parsed;
        let result = match name.as_str() {
            "help" | "commands" => music::help(&ctx, &target).await,
            "play" | "p" => music::play(&ctx, &msg, &target, &args, &self.status).await,
            "pause" => music::pause(&ctx, &msg, &target).await,
            "resume" => music::resume(&ctx, &msg, &target).await,
            "skip" => music::skip(&ctx, &msg, &target).await,
            "queue" => music::queue(&ctx, &msg, &target).await,
            "playing" => music::playing(&ctx, &msg, &target).await,
            // Unknown command names are ignored
            _ => return,
        };

        if let Err(e) = result {
            error!("Command '{}' failed: {}", name, e);
            if let Err(send_err) = target.send(&ctx.http, messages::command_failed()).await {
                debug!("Failed to report command failure: {}", send_err);
            }
        }
    }
}
