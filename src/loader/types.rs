//! Loader types
//!
//! Declarative operation definition types for YAML parsing.

use crate::output::OutputSelector;
use crate::types::{JsonObject, Method};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Operation Definition
// ============================================================================

/// One paginated list/describe operation
///
/// ```yaml
/// name: describe-instances
/// base_url: https://compute.example.com
/// path: /v1/instances:describe
/// method: POST
/// params:
///   Filters:
///     - Name: state
///       Values: [running]
/// pagination:
///   cursor_param: NextToken
///   cursor_path: NextToken
///   page_size_param: MaxResults
///   max_page_size: 1000
/// items_path: Reservations
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OperationDefinition {
    /// Operation name, also the key for stored cursors
    pub name: String,
    /// Base URL of the service endpoint
    pub base_url: String,
    /// Path appended to the base URL
    #[serde(default)]
    pub path: String,
    /// HTTP method; GET and DELETE send parameters as query strings
    #[serde(default)]
    pub method: Method,
    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Default request parameters; command-line parameters override them
    #[serde(default)]
    pub params: JsonObject,
    /// Cursor and page-size field mapping
    pub pagination: PaginationDefinition,
    /// Path to the array of items in each response
    pub items_path: String,
    /// Default output selection; falls back to `items_path`
    #[serde(default)]
    pub select: Option<OutputSelector>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl OperationDefinition {
    /// Output selector used when the caller does not pick one
    pub fn default_selector(&self) -> OutputSelector {
        self.select
            .clone()
            .unwrap_or_else(|| OutputSelector::NamedField(self.items_path.clone()))
    }
}

fn default_timeout() -> u64 {
    30
}

// ============================================================================
// Pagination Definition
// ============================================================================

/// Where the cursor and page size live in requests and responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PaginationDefinition {
    /// Request parameter carrying the cursor (e.g. `NextToken`)
    pub cursor_param: String,
    /// Path to the next cursor in the response
    pub cursor_path: String,
    /// Request parameter carrying the page size (e.g. `MaxResults`)
    #[serde(default)]
    pub page_size_param: Option<String>,
    /// Largest page size the service accepts
    #[serde(default)]
    pub max_page_size: Option<u32>,
}
