//! Report persistence and text rendering

pub mod render;
pub mod writer;

pub use render::render_text;
pub use writer::ReportWriter;
