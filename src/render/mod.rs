//! Rendering module for converting document results to output formats.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::to_toc;
