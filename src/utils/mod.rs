//! Shared utility functions.
//!
//! - `html`: HTML escaping for safe rendering
//! - `format`: Human-readable formatting (sizes, etc.)

mod format;
mod html;

pub use format::format_size;
pub use html::html_escape;
