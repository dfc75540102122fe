//! Debate artifact persistence.
//!
//! Provides [`FileDebateExporter`], which writes the transcript, verdict
//! and graphs into an output directory, and [`read_transcript`] to load an
//! exported transcript back.

mod file_exporter;

pub use file_exporter::{
    FileDebateExporter, GRAPH_FILE, TIMELINE_FILE, TRANSCRIPT_FILE, VERDICT_FILE, read_transcript,
};
