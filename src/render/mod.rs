//! Rendering module for writing outlines in output formats.

mod json;
mod markdown;

pub use json::{fragments_from_json, fragments_to_json, to_json, write_json, JsonFormat};
pub use markdown::to_markdown;
