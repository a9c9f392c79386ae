pub(crate) mod pause;
pub(crate) mod play;
pub(crate) mod playing;
pub(crate) mod queue;
pub(crate) mod resume;
pub(crate) mod skip;

pub mod audio_sources;
pub mod utils;

use serenity::client::Context;

use crate::Error;
use crate::commands::Sendable;
use utils::messages;

pub use pause::pause;
pub use play::play;
pub use playing::playing;
pub use queue::queue;
pub use resume::resume;
pub use skip::skip;

/// Show all available commands
pub async fn help(ctx: &Context, target: &Sendable) -> Result<(), Error> {
    target.send(&ctx.http, messages::help_text()).await?;
    Ok(())
}
