use std::fmt::Display;

use twilight_model::channel::ChannelType;
use twilight_model::channel::message::Embed;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, UserMarker};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder};

/// Glyph prefixed to every report title, unless the title already carries it.
pub const WARNING_GLYPH: &str = "⚠️";

fn prefix_glyph(title: &str) -> String {
    if title.starts_with(WARNING_GLYPH) {
        title.to_owned()
    } else {
        format!("{WARNING_GLYPH}{title}")
    }
}

/// A user-facing error payload: a glyph-prefixed title, an optional
/// description, and ordered named causes.
///
/// Reports are built at the point of failure and consumed immediately by the
/// reporting step of [`Cog::run`](crate::cog::Cog::run); they are never
/// persisted or retried.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    title: String,
    description: Option<String>,
    causes: Vec<(String, String)>,
}

impl ErrorReport {
    pub fn new(title: &str) -> Self {
        Self {
            title: prefix_glyph(title),
            description: None,
            causes: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn causes(&self) -> &[(String, String)] {
        &self.causes
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = prefix_glyph(title);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn push_cause(&mut self, key: impl Into<String>, value: impl Display) {
        self.causes.push((key.into(), value.to_string()));
    }

    /// Renders this report as an embed. `fallback_description` (typically
    /// the raw command text) is used when no description was set.
    pub fn to_embed(&self, fallback_description: &str) -> Embed {
        let description = self.description.as_deref().unwrap_or(fallback_description);
        let mut builder = EmbedBuilder::new().title(self.title.clone()).description(description);
        for (key, value) in &self.causes {
            builder = builder.field(EmbedFieldBuilder::new(key.clone(), value.clone()));
        }
        builder.build()
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[title={}, description={}",
            self.title,
            self.description.as_deref().unwrap_or("")
        )?;
        for (key, value) in &self.causes {
            write!(f, ", {key}={value}")?;
        }
        f.write_str("]")
    }
}

/// Raised when the argument mapping could not be converted into valid domain
/// parameters. Return this from [`Cog::parse_args`](crate::cog::Cog::parse_args).
#[derive(Debug, Clone)]
pub struct ArgumentError {
    report: ErrorReport,
}

impl ArgumentError {
    pub fn new() -> Self {
        Self {
            report: ErrorReport::new("Argument Error"),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.report.set_title(title);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.report.set_description(description);
        self
    }

    pub fn with_cause(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.report.push_cause(key, value);
        self
    }

    pub fn report(&self) -> &ErrorReport {
        &self.report
    }
}

impl Default for ArgumentError {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ArgumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.report, f)
    }
}

impl std::error::Error for ArgumentError {}

/// Raised when the domain action itself failed in an expected way. Return
/// this from [`Cog::execute`](crate::cog::Cog::execute).
#[derive(Debug, Clone)]
pub struct ExecutionError {
    report: ErrorReport,
}

impl ExecutionError {
    pub fn new() -> Self {
        Self {
            report: ErrorReport::new("Execution Error"),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.report.set_title(title);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.report.set_description(description);
        self
    }

    pub fn with_cause(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.report.push_cause(key, value);
        self
    }

    pub fn report(&self) -> &ErrorReport {
        &self.report
    }

    /// A referenced channel does not exist or is not visible to the bot.
    pub fn channel_not_found(channel_id: Id<ChannelMarker>) -> Self {
        Self::new().with_title("Channel NotFound").with_cause("channel_id", channel_id)
    }

    /// A referenced user does not exist or is not visible to the bot.
    pub fn user_not_found(user_id: Id<UserMarker>) -> Self {
        Self::new().with_title("User NotFound").with_cause("user_id", user_id)
    }

    /// A referenced channel exists but is of the wrong kind for the command.
    pub fn channel_type_incorrect(channel_mention: &str, required: ChannelType) -> Self {
        Self::new()
            .with_title("ChannelType is incorrect")
            .with_cause("channel", channel_mention)
            .with_cause("required", required.name())
    }
}

impl Default for ExecutionError {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.report, f)
    }
}

impl std::error::Error for ExecutionError {}

/// Error returned by the [`Cog`](crate::cog::Cog) hooks.
///
/// Only the `Argument` and `Execution` variants receive the structured
/// embed-reporting treatment; `Other` carries anything else and propagates
/// unmodified to the host's own top-level handling.
#[derive(Debug)]
pub enum CogError {
    Argument(ArgumentError),
    Execution(ExecutionError),
    Other(anyhow::Error),
}

impl From<ArgumentError> for CogError {
    fn from(err: ArgumentError) -> Self {
        Self::Argument(err)
    }
}

impl From<ExecutionError> for CogError {
    fn from(err: ExecutionError) -> Self {
        Self::Execution(err)
    }
}

impl From<anyhow::Error> for CogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err)
    }
}

impl From<CogError> for anyhow::Error {
    fn from(err: CogError) -> Self {
        match err {
            CogError::Argument(err) => anyhow::Error::new(err),
            CogError::Execution(err) => anyhow::Error::new(err),
            CogError::Other(err) => err,
        }
    }
}

impl Display for CogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Argument(err) => Display::fmt(err, f),
            Self::Execution(err) => Display::fmt(err, f),
            Self::Other(err) => write!(f, "{err:#}"),
        }
    }
}
