// Tabular collaborators: CSV upload parsing and enhanced-file export.
// Thin plumbing over the csv crate; no generation logic lives here.

pub mod reader;
pub mod writer;
