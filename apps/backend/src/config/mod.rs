//! Environment-driven configuration.
//!
//! All lookups go through a `Fn(&str) -> Option<String>` so parsing can be
//! exercised without touching the process environment.

pub mod server;

use crate::error::AppError;

/// Lookup against the real process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// First non-blank value among `names`, trimmed.
pub(crate) fn first_set<F>(lookup: &F, names: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Parse an optional variable, falling back to `default` when unset.
pub(crate) fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match first_set(lookup, &[name]) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{name} has an invalid value"))),
        None => Ok(default),
    }
}
