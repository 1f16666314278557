//! Query defaults
//!
//! Values the CLI falls back to when a flag is not given.

use serde::Deserialize;

/// Defaults for report queries
///
/// # Example
///
/// ```toml
/// [query]
/// suite_id = "examplersid"
/// limit = 50
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueryDefaults {
    /// Report suite used when `--suite` is omitted
    pub suite_id: Option<String>,

    /// Rows per page used when `--limit` is omitted
    pub limit: Option<u32>,
}
