mod columns;
mod highlighter;
mod marker;

pub use columns::{format_set, ChangedColumns};
pub use highlighter::{compare_line, Highlighter, LineDiff};
pub use marker::{Marker, DEFAULT_SGR};
