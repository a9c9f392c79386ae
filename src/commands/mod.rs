//! Command-line parsing and the fixed command table.

pub mod music;

use serenity::all::{Channel, ChannelId, ChannelType, Http, Message};
use serenity::client::Context;

/// A command with its aliases, as shown by `!help`.
pub struct CommandInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "help",
        aliases: &["commands"],
        description: "Show all available commands",
    },
    CommandInfo {
        name: "play",
        aliases: &["p"],
        description: "Join your voice channel and play audio",
    },
    CommandInfo {
        name: "pause",
        aliases: &[],
        description: "Pause the current track",
    },
    CommandInfo {
        name: "resume",
        aliases: &[],
        description: "Resume the paused track",
    },
    CommandInfo {
        name: "skip",
        aliases: &[],
        description: "Skip the current track",
    },
    CommandInfo {
        name: "queue",
        aliases: &[],
        description: "Show the upcoming tracks",
    },
    CommandInfo {
        name: "playing",
        aliases: &[],
        description: "Show the track playing right now",
    },
];

/// A command name plus its positional arguments, parsed from one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Parses a raw message line into a command.
///
/// Returns `None` when the line does not start with the prefix or nothing
/// follows it. The command name is case-folded; arguments keep their case.
pub fn parse_command(content: &str, prefix: &str) -> Option<ParsedCommand> {
    let rest = content.strip_prefix(prefix)?.trim();
    if rest.is_empty() {
        return None;
    }

    let mut parts = rest.split_whitespace();
    let name = parts.next()?.to_lowercase();
    let args = parts.map(str::to_string).collect();

    Some(ParsedCommand { name, args })
}

/// Channel kinds the bot replies into, resolved once per inbound message.
///
/// Anything that is not a guild text channel or thread is not serviced.
pub enum Sendable {
    Text(ChannelId),
    Thread(ChannelId),
}

impl Sendable {
    pub async fn resolve(ctx: &Context, msg: &Message) -> Option<Self> {
        let channel = msg.channel(ctx).await.ok()?;
        match channel {
            Channel::Guild(channel) => match channel.kind {
                ChannelType::Text | ChannelType::News => Some(Self::Text(channel.id)),
                ChannelType::PublicThread
                | ChannelType::PrivateThread
                | ChannelType::NewsThread => Some(Self::Thread(channel.id)),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn channel_id(&self) -> ChannelId {
        match self {
            Self::Text(id) | Self::Thread(id) => *id,
        }
    }

    pub async fn send(
        &self,
        http: &Http,
        content: impl Into<String>,
    ) -> serenity::Result<Message> {
        self.channel_id().say(http, content).await
    }
}
