//! Boilerplate reduction for command "cogs" on top of the twilight
//! ecosystem.
//!
//! The key things that make up the library are:
//!
//! - The [`Cog`] trait: a reusable execution skeleton. A command type
//!   implements [`Cog::parse_args`] and [`Cog::execute`] and calls the
//!   provided [`Cog::run`], which handles bot-author policy, `key=value`
//!   token parsing, and uniform error reporting via embeds.
//!
//! - The [`Arguments`] mapping: built once per invocation from the raw
//!   tokens, with typed accessors (`get_bool`, `get_list`, `get_datetime`
//!   and friends) for pulling values out with defaults.
//!
//! - The error model: [`ArgumentError`] and [`ExecutionError`] carry a
//!   glyph-prefixed title, a description, and ordered cause fields, and are
//!   rendered as a titled embed panel. Anything else returned by a hook
//!   propagates to the host untouched.
//!
//! - Date-range helpers in [`range`]: `before`/`after` readers with
//!   ordering validation, plus format-scan utilities in [`datetime`].

pub mod arguments;
pub mod cog;
pub mod context;
pub mod datetime;
pub mod errors;
pub mod range;

pub use arguments::Arguments;
pub use cog::Cog;
pub use context::{ChannelContext, CogContext};
pub use datetime::{to_utc_naive, try_strftime, try_strftime_naive, try_strptime};
pub use errors::{ArgumentError, CogError, ErrorReport, ExecutionError};
pub use range::{BeforeAfter, CreatedAt, corrected_before_after_str, get_before_after, get_before_after_fmts};
