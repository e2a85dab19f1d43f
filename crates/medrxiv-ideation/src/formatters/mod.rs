//! Output formatting.

mod markdown;

pub use markdown::render_summary;
