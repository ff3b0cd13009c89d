use std::collections::HashMap;

use anyhow::Context;
use time::PrimitiveDateTime;

use crate::datetime::{parse_datetime, try_strptime};

/// The value recorded for a bare token used as a presence flag.
pub const PRESENCE_FLAG: &str = "True";

/// A key/value mapping built once per invocation from the raw command tokens.
///
/// A token containing `=` contributes `key -> value`, splitting on the last
/// `=` so that `a=b=c` maps `a=b` to `c`. Any other non-empty token becomes a
/// presence flag (`token -> "True"`). Building the mapping is total: no token
/// sequence can fail to parse.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    map: HashMap<String, String>,
}

impl Arguments {
    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for token in tokens {
            let token = token.as_ref();
            if token.is_empty() {
                continue;
            }
            match token.rsplit_once('=') {
                Some((key, value)) => map.insert(key.to_owned(), value.to_owned()),
                None => map.insert(token.to_owned(), PRESENCE_FLAG.to_owned()),
            };
        }
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Reads a boolean. An absent key yields `default`; a present key yields
    /// `false` only when the stored value equals `"false"` case-insensitively.
    ///
    /// Any other stored value (`"no"`, `"0"`, ...) is `true`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.map.get(key) {
            Some(value) => !value.eq_ignore_ascii_case("false"),
            None => default,
        }
    }

    /// Splits the stored value on `delimiter`. An absent key yields `None`.
    pub fn get_list(&self, key: &str, delimiter: char) -> Option<Vec<&str>> {
        self.map.get(key).map(|value| value.split(delimiter).collect())
    }

    /// Like [`get_list`](Self::get_list), applying `transform` to every
    /// piece. An absent key yields `Ok(None)`; a failing transform surfaces
    /// its error.
    pub fn get_list_with<T, F>(&self, key: &str, delimiter: char, mut transform: F) -> anyhow::Result<Option<Vec<T>>>
    where
        F: FnMut(&str) -> anyhow::Result<T>,
    {
        match self.map.get(key) {
            Some(value) => value
                .split(delimiter)
                .map(|piece| transform(piece))
                .collect::<anyhow::Result<Vec<_>>>()
                .map(Some),
            None => Ok(None),
        }
    }

    /// Parses the stored value with a single format in `format_description`
    /// syntax. An absent key yields `Ok(None)`; a value that does not match
    /// the format surfaces the parse error.
    pub fn get_datetime(&self, key: &str, fmt: &str) -> anyhow::Result<Option<PrimitiveDateTime>> {
        let Some(value) = self.map.get(key) else {
            return Ok(None);
        };
        let parsed = parse_datetime(value, fmt).with_context(|| format!("failed to parse `{key}`"))?;
        Ok(Some(parsed))
    }

    /// Tries each format in order and returns the first successful parse.
    /// Per-attempt failures are swallowed; an absent key or no matching
    /// format yields `None`.
    pub fn get_datetime_fmts(&self, key: &str, fmts: &[&str]) -> Option<PrimitiveDateTime> {
        self.map.get(key).and_then(|value| try_strptime(value, fmts))
    }
}
