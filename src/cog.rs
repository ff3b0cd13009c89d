use async_trait::async_trait;

use crate::arguments::Arguments;
use crate::context::CogContext;
use crate::errors::{CogError, ErrorReport};

/// A command implementation plugged into the execution skeleton.
///
/// Implement [`parse_args`](Self::parse_args) to convert the argument
/// mapping into whatever parameters the action needs (typically stored on
/// `self`) and [`execute`](Self::execute) to perform the action, then call
/// the provided [`run`](Self::run) from the host's command handler.
///
/// `run` normalizes the two recognized error categories into embed reports;
/// anything else returned by the hooks is not its responsibility and
/// propagates to the caller unmodified.
#[async_trait]
pub trait Cog: Send {
    /// Converts the parsed argument mapping into domain parameters, or
    /// returns an [`ArgumentError`](crate::errors::ArgumentError).
    fn parse_args(&mut self, ctx: &dyn CogContext, args: &Arguments) -> Result<(), CogError>;

    /// Performs the action, or returns an
    /// [`ExecutionError`](crate::errors::ExecutionError).
    async fn execute(&mut self, ctx: &dyn CogContext) -> Result<(), CogError>;

    /// Policy hook for invocations made by another bot. The default rejects.
    fn on_execute_by_bot(&self) -> bool {
        tracing::warn!("invoked by a bot, not executing");
        false
    }

    /// Runs one invocation end to end: policy check, token parsing,
    /// argument conversion, execution, and error reporting. At most one
    /// report embed is delivered per invocation, and the execute step never
    /// runs after a failed argument conversion.
    async fn run(&mut self, ctx: &dyn CogContext, tokens: &[String]) -> anyhow::Result<()> {
        tracing::debug!(command = ctx.command(), args = ?tokens, "command invoked");

        if ctx.author_is_bot() && !self.on_execute_by_bot() {
            return Ok(());
        }

        if let Err(err) = ctx.start_typing().await {
            tracing::debug!(command = ctx.command(), "failed to start typing indicator: {err:#}");
        }

        let args = Arguments::parse(tokens);
        match self.parse_args(ctx, &args) {
            Ok(()) => {}
            Err(CogError::Argument(err)) => return send_report(ctx, err.report()).await,
            Err(other) => return Err(other.into()),
        }

        match self.execute(ctx).await {
            Ok(()) => Ok(()),
            Err(CogError::Execution(err)) => send_report(ctx, err.report()).await,
            Err(other) => Err(other.into()),
        }
    }
}

async fn send_report(ctx: &dyn CogContext, report: &ErrorReport) -> anyhow::Result<()> {
    tracing::warn!(command = ctx.command(), report = %report, "reporting error");
    ctx.send_embed(report.to_embed(ctx.content())).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use twilight_model::channel::message::Embed;

    use super::*;
    use crate::errors::{ArgumentError, ExecutionError};

    #[derive(Default)]
    struct MockContext {
        content: String,
        author_is_bot: bool,
        sent: Mutex<Vec<Embed>>,
        typing_started: AtomicUsize,
    }

    impl MockContext {
        fn with_content(content: &str) -> Self {
            Self {
                content: content.to_owned(),
                ..Self::default()
            }
        }

        fn sent(&self) -> Vec<Embed> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CogContext for MockContext {
        fn command(&self) -> &str {
            "mock"
        }

        fn content(&self) -> &str {
            &self.content
        }

        fn author_is_bot(&self) -> bool {
            self.author_is_bot
        }

        async fn send_embed(&self, embed: Embed) -> anyhow::Result<()> {
            self.sent.lock().unwrap().push(embed);
            Ok(())
        }

        async fn start_typing(&self) -> anyhow::Result<()> {
            self.typing_started.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Records which hooks ran and fails whichever stage it is told to.
    #[derive(Default)]
    struct ProbeCog {
        fail_parse: Option<CogError>,
        fail_execute: Option<CogError>,
        allow_bots: bool,
        parsed: usize,
        executed: usize,
    }

    #[async_trait]
    impl Cog for ProbeCog {
        fn parse_args(&mut self, _ctx: &dyn CogContext, _args: &Arguments) -> Result<(), CogError> {
            self.parsed += 1;
            match self.fail_parse.take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        async fn execute(&mut self, _ctx: &dyn CogContext) -> Result<(), CogError> {
            self.executed += 1;
            match self.fail_execute.take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        fn on_execute_by_bot(&self) -> bool {
            self.allow_bots
        }
    }

    #[tokio::test]
    async fn successful_invocation_sends_nothing() {
        let ctx = MockContext::with_content("!probe a=1");
        let mut cog = ProbeCog::default();
        cog.run(&ctx, &["a=1".to_owned()]).await.unwrap();
        assert_eq!(cog.parsed, 1);
        assert_eq!(cog.executed, 1);
        assert_eq!(ctx.typing_started.load(Ordering::SeqCst), 1);
        assert!(ctx.sent().is_empty());
    }

    #[tokio::test]
    async fn argument_error_reports_once_and_skips_execute() {
        let ctx = MockContext::with_content("!probe bad");
        let mut cog = ProbeCog {
            fail_parse: Some(ArgumentError::new().with_title("Bad Input").into()),
            ..ProbeCog::default()
        };
        cog.run(&ctx, &["bad".to_owned()]).await.unwrap();
        assert_eq!(cog.executed, 0);

        let sent = ctx.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title.as_deref(), Some("⚠️Bad Input"));
        // description falls back to the raw command text
        assert_eq!(sent[0].description.as_deref(), Some("!probe bad"));
    }

    #[tokio::test]
    async fn execution_error_reports_once() {
        let ctx = MockContext::with_content("!probe");
        let mut cog = ProbeCog {
            fail_execute: Some(ExecutionError::new().with_cause("target", 42).into()),
            ..ProbeCog::default()
        };
        cog.run(&ctx, &[]).await.unwrap();

        let sent = ctx.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title.as_deref(), Some("⚠️Execution Error"));
        assert_eq!(sent[0].fields[0].name, "target");
        assert_eq!(sent[0].fields[0].value, "42");
    }

    #[tokio::test]
    async fn unrecognized_parse_error_propagates_without_report() {
        let ctx = MockContext::with_content("!probe");
        let mut cog = ProbeCog {
            fail_parse: Some(CogError::Other(anyhow::anyhow!("database down"))),
            ..ProbeCog::default()
        };
        let err = cog.run(&ctx, &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "database down");
        assert_eq!(cog.executed, 0);
        assert!(ctx.sent().is_empty());
    }

    #[tokio::test]
    async fn execution_error_in_parse_stage_propagates() {
        let ctx = MockContext::with_content("!probe");
        let mut cog = ProbeCog {
            fail_parse: Some(ExecutionError::new().into()),
            ..ProbeCog::default()
        };
        assert!(cog.run(&ctx, &[]).await.is_err());
        assert!(ctx.sent().is_empty());
    }

    #[tokio::test]
    async fn bot_invocations_rejected_by_default() {
        let ctx = MockContext {
            author_is_bot: true,
            ..MockContext::default()
        };
        let mut cog = ProbeCog::default();
        cog.run(&ctx, &[]).await.unwrap();
        assert_eq!(cog.parsed, 0);
        assert_eq!(ctx.typing_started.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn bot_invocations_admitted_by_override() {
        let ctx = MockContext {
            author_is_bot: true,
            ..MockContext::default()
        };
        let mut cog = ProbeCog {
            allow_bots: true,
            ..ProbeCog::default()
        };
        cog.run(&ctx, &[]).await.unwrap();
        assert_eq!(cog.parsed, 1);
        assert_eq!(cog.executed, 1);
    }

    #[tokio::test]
    async fn hooks_receive_parsed_arguments() {
        struct LimitCog {
            limit: Option<u64>,
        }

        #[async_trait]
        impl Cog for LimitCog {
            fn parse_args(&mut self, _ctx: &dyn CogContext, args: &Arguments) -> Result<(), CogError> {
                let limit = match args.get("limit") {
                    Some(value) => value
                        .parse()
                        .map_err(|err| ArgumentError::new().with_cause("limit", err))?,
                    None => 10,
                };
                self.limit = Some(limit);
                Ok(())
            }

            async fn execute(&mut self, _ctx: &dyn CogContext) -> Result<(), CogError> {
                Ok(())
            }
        }

        let ctx = MockContext::with_content("!limit limit=25");
        let mut cog = LimitCog { limit: None };
        cog.run(&ctx, &["limit=25".to_owned()]).await.unwrap();
        assert_eq!(cog.limit, Some(25));

        let ctx = MockContext::with_content("!limit limit=x");
        let mut cog = LimitCog { limit: None };
        cog.run(&ctx, &["limit=x".to_owned()]).await.unwrap();
        assert_eq!(ctx.sent().len(), 1);
    }
}
