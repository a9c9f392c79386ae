//! A prefix-command Discord bot that plays YouTube audio through songbird,
//! resolving URLs and search terms with the `yt-dlp` command-line tool.

use std::sync::LazyLock;

pub mod commands;
pub mod config;
pub mod events;

/// Boxed error type used at command-handler boundaries.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Shared HTTP client handed to songbird's lazy `YoutubeDl` inputs.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);
