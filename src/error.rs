//! Structured error types for gridmerge.

/// All errors that can occur while editing, generating, or exporting a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridMergeError {
    /// The selection's distinct cells do not fill its bounding rectangle.
    #[error("selection must be rectangular")]
    NotRectangular,

    /// A cell of the candidate rectangle already belongs to a merged region.
    #[error("selection overlaps existing merge")]
    Overlap {
        /// Row of the first conflicting cell.
        row: u32,
        /// Column of the first conflicting cell.
        col: u32,
    },

    /// A position lies outside the current grid.
    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: u32, col: u32, size: u32 },

    /// Invalid cell reference.
    #[error("Invalid cell reference: {0}")]
    CellRef(String),

    /// Grid size that cannot be applied.
    #[error("Invalid grid size: {0}")]
    InvalidSize(String),

    /// Export requested before any markup was generated.
    #[error("nothing has been generated yet")]
    NothingGenerated,

    /// Host file-save mechanism failed.
    #[error("Export error: {0}")]
    Export(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl GridMergeError {
    /// True for the two validation failures a user should be warned about.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::NotRectangular | Self::Overlap { .. })
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridMergeError>;

#[cfg(target_arch = "wasm32")]
impl From<GridMergeError> for wasm_bindgen::JsValue {
    fn from(e: GridMergeError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
