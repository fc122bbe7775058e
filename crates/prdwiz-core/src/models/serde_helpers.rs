//! Serde helpers shared by the model types.

use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer};

/// Deserialize an optional enum-like value where an empty (or blank) string
/// means "not chosen yet".
///
/// Drafts arrive from forms where an unset select box is sent as `""`; that
/// has to land as `None` so the validators can report it.
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}
