//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for debate results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full transcript followed by the verdict (default)
    #[default]
    Full,
    /// Only the verdict
    Verdict,
    /// JSON output
    Json,
}
