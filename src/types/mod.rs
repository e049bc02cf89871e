//! Data types for the merge editor.

mod position;
mod region;
mod selection;

pub use position::*;
pub use region::*;
pub use selection::*;
