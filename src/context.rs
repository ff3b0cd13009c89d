use std::sync::Arc;

use async_trait::async_trait;
use twilight_http::Client;
use twilight_model::channel::message::Embed;
use twilight_model::id::Id;
use twilight_model::id::marker::ChannelMarker;
use twilight_model::user::User;

/// What the execution wrapper needs from the host per invocation: the raw
/// input text, whether the invoker is a bot, a destination for error report
/// embeds, and a working indicator.
///
/// [`ChannelContext`] is the ready twilight-backed implementation; tests and
/// hosts with their own delivery mechanism implement this directly.
#[async_trait]
pub trait CogContext: Send + Sync {
    /// Name of the invoked command, used in log entries.
    fn command(&self) -> &str;

    /// The raw text that triggered the invocation. Used as the fallback
    /// description of error reports.
    fn content(&self) -> &str;

    fn author_is_bot(&self) -> bool;

    /// Delivers an error report embed to the invocation's destination.
    async fn send_embed(&self, embed: Embed) -> anyhow::Result<()>;

    /// Signals that the command is being worked on.
    async fn start_typing(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Invocation context backed by a channel message: reports go to the
/// triggering channel and the typing indicator is fired there.
pub struct ChannelContext {
    pub http: Arc<Client>,
    pub channel_id: Id<ChannelMarker>,
    pub author: User,
    pub command: String,
    pub content: String,
}

#[async_trait]
impl CogContext for ChannelContext {
    fn command(&self) -> &str {
        &self.command
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn author_is_bot(&self) -> bool {
        self.author.bot
    }

    async fn send_embed(&self, embed: Embed) -> anyhow::Result<()> {
        self.http.create_message(self.channel_id).embeds(&[embed])?.await?;
        Ok(())
    }

    async fn start_typing(&self) -> anyhow::Result<()> {
        self.http.create_typing_trigger(self.channel_id).await?;
        Ok(())
    }
}
