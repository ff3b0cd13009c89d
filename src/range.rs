//! `before`/`after` date-range reading for time-filtered commands.

use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, UserMarker};
use twilight_util::snowflake::Snowflake;

use crate::arguments::Arguments;
use crate::datetime::try_strftime;
use crate::errors::ArgumentError;

pub const BEFORE_KEY: &str = "before";
pub const AFTER_KEY: &str = "after";

const ORDERING_MESSAGE: &str = "before must be a future than after.";

/// A pair of optional date bounds. Invariant: when both are present,
/// `after <= before`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BeforeAfter {
    pub before: Option<PrimitiveDateTime>,
    pub after: Option<PrimitiveDateTime>,
}

impl BeforeAfter {
    fn validate(self) -> Result<Self, ArgumentError> {
        if let (Some(before), Some(after)) = (self.before, self.after)
            && after > before
        {
            return Err(ArgumentError::new().with_cause(BEFORE_KEY, ORDERING_MESSAGE));
        }
        Ok(self)
    }

    /// Labels each bound with `offset` without converting; the parsed values
    /// are assumed to have been local to that offset already.
    pub fn assume_offset(self, offset: UtcOffset) -> (Option<OffsetDateTime>, Option<OffsetDateTime>) {
        (
            self.before.map(|dt| dt.assume_offset(offset)),
            self.after.map(|dt| dt.assume_offset(offset)),
        )
    }
}

fn read_bound(args: &Arguments, key: &str, fmt: &str) -> Result<Option<PrimitiveDateTime>, ArgumentError> {
    args.get_datetime(key, fmt)
        .map_err(|err| ArgumentError::new().with_cause(key, format!("{err:#}")))
}

/// Reads the `before` and `after` keys with a single format. An unparseable
/// bound or an inverted range (`after > before` with both present) is an
/// argument error; absent bounds are returned as `None` independently.
pub fn get_before_after(args: &Arguments, fmt: &str) -> Result<BeforeAfter, ArgumentError> {
    BeforeAfter {
        before: read_bound(args, BEFORE_KEY, fmt)?,
        after: read_bound(args, AFTER_KEY, fmt)?,
    }
    .validate()
}

/// Multi-format variant of [`get_before_after`]: each bound takes the first
/// format that parses, and a bound with no matching format is treated as
/// absent rather than an error. The ordering check is unchanged.
pub fn get_before_after_fmts(args: &Arguments, fmts: &[&str]) -> Result<BeforeAfter, ArgumentError> {
    BeforeAfter {
        before: args.get_datetime_fmts(BEFORE_KEY, fmts),
        after: args.get_datetime_fmts(AFTER_KEY, fmts),
    }
    .validate()
}

/// An entity with a creation timestamp, used to default a missing `after`
/// bound. Snowflake ids encode their creation time.
pub trait CreatedAt {
    fn created_at(&self) -> OffsetDateTime;
}

impl CreatedAt for OffsetDateTime {
    fn created_at(&self) -> OffsetDateTime {
        *self
    }
}

fn snowflake_created_at(id: &impl Snowflake) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(id.timestamp()) * 1_000_000)
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

impl CreatedAt for Id<GuildMarker> {
    fn created_at(&self) -> OffsetDateTime {
        snowflake_created_at(self)
    }
}

impl CreatedAt for Id<ChannelMarker> {
    fn created_at(&self) -> OffsetDateTime {
        snowflake_created_at(self)
    }
}

impl CreatedAt for Id<UserMarker> {
    fn created_at(&self) -> OffsetDateTime {
        snowflake_created_at(self)
    }
}

/// Produces display strings for a possibly-absent range: a missing `before`
/// becomes "now" in `offset` and a missing `after` becomes the owner's
/// creation time shifted to `offset`. A bound that no candidate format can
/// render is dropped silently.
pub fn corrected_before_after_str(
    before: Option<OffsetDateTime>,
    after: Option<OffsetDateTime>,
    owner: &impl CreatedAt,
    offset: UtcOffset,
    fmts: &[&str],
) -> (Option<String>, Option<String>) {
    let before = before.unwrap_or_else(|| OffsetDateTime::now_utc().to_offset(offset));
    let after = after.unwrap_or_else(|| owner.created_at().to_offset(offset));
    (try_strftime(before, fmts), try_strftime(after, fmts))
}
