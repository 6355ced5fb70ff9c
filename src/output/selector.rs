//! Output selection
//!
//! Resolves the user's "what to return" choice once, when the command is
//! built, instead of matching strings for every page.

use crate::error::{Error, Result};
use crate::types::{lookup_path, JsonValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to emit for a call
///
/// Textual forms:
/// - `*` selects the whole response
/// - `^Name` echoes the bound request parameter `Name`
/// - anything else is a dot path into the response, e.g. `Reservations` or
///   `Result.Items`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutputSelector {
    /// Emit each response unchanged
    #[default]
    WholeResponse,
    /// Emit one field of each response; arrays are enumerated
    NamedField(String),
    /// Emit the value bound to a request parameter
    ParameterEcho(String),
}

impl OutputSelector {
    /// Whether the selector reads responses (and so applies to every page)
    pub fn per_page(&self) -> bool {
        !matches!(self, Self::ParameterEcho(_))
    }

    /// Project one response
    ///
    /// Arrays are flattened into their elements. A missing or null field
    /// yields nothing.
    pub fn project(&self, response: &JsonValue, request: &JsonValue) -> Vec<JsonValue> {
        match self {
            Self::WholeResponse => vec![response.clone()],
            Self::NamedField(path) => flatten(lookup_path(response, path)),
            Self::ParameterEcho(name) => flatten(lookup_path(request, name)),
        }
    }
}

fn flatten(value: Option<&JsonValue>) -> Vec<JsonValue> {
    match value {
        None | Some(JsonValue::Null) => Vec::new(),
        Some(JsonValue::Array(items)) => items.clone(),
        Some(other) => vec![other.clone()],
    }
}

impl FromStr for OutputSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::selector(s, "selector cannot be empty"));
        }
        if trimmed == "*" {
            return Ok(Self::WholeResponse);
        }
        if let Some(name) = trimmed.strip_prefix('^') {
            if name.is_empty() {
                return Err(Error::selector(s, "parameter name is empty"));
            }
            return Ok(Self::ParameterEcho(name.to_string()));
        }
        if trimmed.split('.').any(str::is_empty) {
            return Err(Error::selector(s, "field path has an empty segment"));
        }
        Ok(Self::NamedField(trimmed.to_string()))
    }
}

impl TryFrom<String> for OutputSelector {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<OutputSelector> for String {
    fn from(selector: OutputSelector) -> Self {
        selector.to_string()
    }
}

impl fmt::Display for OutputSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WholeResponse => f.write_str("*"),
            Self::NamedField(path) => f.write_str(path),
            Self::ParameterEcho(name) => write!(f, "^{name}"),
        }
    }
}
