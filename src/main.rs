use dotenv::dotenv;
use serenity::all::{ClientBuilder, GatewayIntents};
use songbird::SerenityInit;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use jukebox::Error;
use jukebox::config::Config;
use jukebox::events::Bot;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jukebox=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let intents = GatewayIntents::non_privileged()
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_VOICE_STATES;

    let token = config.token.clone();
    let mut client = ClientBuilder::new(token, intents)
        .event_handler(Bot::new(config))
        .register_songbird()
        .await?;

    client.start().await.map_err(Into::into)
}
