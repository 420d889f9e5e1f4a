//! Reduction of daemon errors to readable, lower-cased messages.
//!
//! The primary input is the structured `{code, message}` error carried in
//! [`RemoteError::Daemon`]. Some channels only hand over a Go-style
//! stringified map (`map[code:-5 message:Block not found]`); those go through
//! [`parse_legacy_error_map`], a compatibility fallback that is a heuristic
//! and not a grammar.

use std::collections::HashMap;
use std::fmt;

use crate::error::{CoreError, RpcError};

use super::protocol::RemoteError;

const LEGACY_MAP_PREFIX: &str = "map[";

// ==============================================================================
// Normalized Error
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    /// Daemon message, lower-cased.
    pub message: String,
    pub code: Option<i64>,
    /// Caller hint appended in parentheses, e.g. a flag the node may need.
    pub warning: Option<String>,
}

impl NormalizedError {
    fn new(message: &str, code: Option<i64>, warning: Option<&str>) -> Self {
        Self {
            message: message.to_lowercase(),
            code,
            warning: warning.map(str::to_owned),
        }
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.warning {
            Some(warning) => write!(f, "{} ({warning})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for NormalizedError {}

// ==============================================================================
// Normalization
// ==============================================================================

/// Turn a daemon error into [`CoreError::Remote`]; any error that is not
/// daemon-shaped is returned unchanged.
pub fn normalize(err: CoreError, warning: Option<&str>) -> CoreError {
    match err {
        CoreError::Rpc(RpcError::Remote(RemoteError::Daemon { code, message })) => {
            CoreError::Remote(NormalizedError::new(&message, Some(code), warning))
        }
        other => match normalize_text(&other.to_string(), warning) {
            Some(normalized) => CoreError::Remote(normalized),
            None => other,
        },
    }
}

/// Legacy path: extract the `message` of a stringified `map[...]` error.
pub fn normalize_text(text: &str, warning: Option<&str>) -> Option<NormalizedError> {
    let fields = parse_legacy_error_map(text)?;
    let message = fields.get("message")?;
    let code = fields.get("code").and_then(|code| code.parse().ok());
    Some(NormalizedError::new(message, code, warning))
}

/// Split `map[k1:v1 k2:v2 ...]` into its key/value pairs.
///
/// Values may contain spaces, so a space inside a value only ends it when the
/// remaining text still mentions `code:` or `message:`. A value that itself
/// contains one of those substrings is split early; that case has no defined
/// answer and is left as is.
pub fn parse_legacy_error_map(text: &str) -> Option<HashMap<String, String>> {
    let inner = text.strip_prefix(LEGACY_MAP_PREFIX)?;
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    let mut fields = HashMap::new();
    let mut key = String::new();
    let mut current = String::new();
    let mut in_value = false;

    for (i, c) in inner.char_indices() {
        match c {
            ':' if !in_value => {
                key = current.trim().to_owned();
                current.clear();
                in_value = true;
            }
            ' ' if !in_value => {
                if !key.is_empty() && !current.is_empty() {
                    fields.insert(key.clone(), std::mem::take(&mut current));
                }
            }
            ' ' if mentions_next_key(&inner[i + 1..]) => {
                fields.insert(key.clone(), std::mem::take(&mut current));
                in_value = false;
            }
            _ => current.push(c),
        }
    }

    if !key.is_empty() && !current.is_empty() {
        fields.insert(key, current);
    }

    Some(fields)
}

fn mentions_next_key(rest: &str) -> bool {
    rest.contains("code:") || rest.contains("message:")
}
