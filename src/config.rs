//! Environment-driven configuration: the bot token and the guild allow-list.

use std::collections::HashSet;
use std::env;

use serenity::all::GuildId;
use thiserror::Error;
use tracing::warn;

/// Prefix that marks a message as a command.
pub const COMMAND_PREFIX: &str = "!";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing DISCORD_TOKEN. Create a .env file with DISCORD_TOKEN=<bot token>")]
    MissingToken,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    allowed_guilds: HashSet<GuildId>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = env::var("DISCORD_TOKEN").map_err(|_| ConfigError::MissingToken)?;
        if token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        let allowed_guilds = env::var("ALLOWED_GUILD_IDS")
            .map(|raw| Self::parse_guild_list(&raw))
            .unwrap_or_default();

        Ok(Self {
            token,
            allowed_guilds,
        })
    }

    /// An empty allow-list means every guild is allowed (development mode).
    pub fn is_guild_allowed(&self, guild_id: GuildId) -> bool {
        self.allowed_guilds.is_empty() || self.allowed_guilds.contains(&guild_id)
    }

    fn parse_guild_list(raw: &str) -> HashSet<GuildId> {
        raw.split(',')
            .filter_map(|part| {
                let part = part.trim();
                if part.is_empty() {
                    return None;
                }
                match part.parse::<u64>() {
                    Ok(id) if id != 0 => Some(GuildId::new(id)),
                    _ => {
                        warn!("Ignoring invalid guild id in ALLOWED_GUILD_IDS: {}", part);
                        None
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config_with_guilds(raw: &str) -> Config {
        Config {
            token: "test-token".to_string(),
            allowed_guilds: Config::parse_guild_list(raw),
        }
    }

    #[test]
    fn parses_comma_separated_ids_with_noise() {
        let parsed = Config::parse_guild_list(" 123, 456 ,,abc, 789 ");
        let expected: HashSet<GuildId> =
            [GuildId::new(123), GuildId::new(456), GuildId::new(789)]
                .into_iter()
                .collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn empty_allow_list_allows_every_guild() {
        let config = config_with_guilds("");
        assert!(config.is_guild_allowed(GuildId::new(42)));
    }

    #[test]
    fn populated_allow_list_is_exclusive() {
        let config = config_with_guilds("123,456");
        assert!(config.is_guild_allowed(GuildId::new(123)));
        assert!(!config.is_guild_allowed(GuildId::new(789)));
    }
}
