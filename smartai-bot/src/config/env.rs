//! Environment lookup helpers shared by config sections.

use smartai_core::BotError;
use std::env;
use std::str::FromStr;

/// First non-empty value among `names`, in order.
pub(crate) fn first_non_empty(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

/// Required variable (with aliases); `BotError::Config` naming the primary variable when missing.
pub(crate) fn required(names: &[&str]) -> Result<String, BotError> {
    first_non_empty(names).ok_or_else(|| BotError::Config(format!("{} not set", names[0])))
}

/// Parses `name` when set; `default` when unset or empty; `BotError::Config` when unparsable.
pub(crate) fn parse_or<T: FromStr>(name: &str, default: T) -> Result<T, BotError> {
    match first_non_empty(&[name]) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| BotError::Config(format!("{} has an invalid value: {}", name, raw))),
    }
}

/// Boolean flag accepting true/false, 1/0, yes/no, on/off.
pub(crate) fn flag_or(name: &str, default: bool) -> Result<bool, BotError> {
    match first_non_empty(&[name]).map(|v| v.to_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(BotError::Config(format!("{} must be a boolean, got: {}", name, v))),
        },
    }
}
