//! Editor configuration.
//!
//! Every field has a default, so hosts may pass a partial object (or nothing).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::codegen::BASE_DELAY_MS;
use crate::export::EXPORT_FILE_NAME;

/// Grid size used when none is configured.
pub const DEFAULT_GRID_SIZE: u32 = 5;

/// Configuration for a [`MergeEditor`](crate::editor::MergeEditor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Initial number of rows and columns (must be at least 1)
    pub grid_size: u32,
    /// Base per-character reveal delay in milliseconds
    pub base_delay_ms: u64,
    /// File name offered for the exported document
    pub file_name: String,
}

impl EditorConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            base_delay_ms: BASE_DELAY_MS,
            file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}
