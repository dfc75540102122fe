//! Debate export port
//!
//! Persistence of the three debate artifacts: the transcript, the verdict
//! and the graph description.

use debate_domain::{GraphDescription, TranscriptRecord, Turn, VerdictRecord};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Destination for debate artifacts
pub trait DebateExporter: Send + Sync {
    /// Persist the ordered transcript (possibly partial after an abort)
    fn export_transcript(&self, records: &[TranscriptRecord]) -> Result<(), ExportError>;

    /// Persist the verdict
    fn export_verdict(&self, record: &VerdictRecord) -> Result<(), ExportError>;

    /// Persist the static node graph
    fn export_graph(&self, graph: &GraphDescription) -> Result<(), ExportError>;

    /// Persist the runtime turn chain. Optional for adapters.
    fn export_timeline(&self, _turns: &[Turn]) -> Result<(), ExportError> {
        Ok(())
    }
}

/// Exporter that discards everything
pub struct NoExport;

impl DebateExporter for NoExport {
    fn export_transcript(&self, _records: &[TranscriptRecord]) -> Result<(), ExportError> {
        Ok(())
    }

    fn export_verdict(&self, _record: &VerdictRecord) -> Result<(), ExportError> {
        Ok(())
    }

    fn export_graph(&self, _graph: &GraphDescription) -> Result<(), ExportError> {
        Ok(())
    }
}

/// In-memory exporter that keeps the last exported artifacts
#[derive(Default)]
pub struct MemoryExporter {
    transcript: Mutex<Option<Vec<TranscriptRecord>>>,
    verdict: Mutex<Option<VerdictRecord>>,
    graph: Mutex<Option<GraphDescription>>,
}

impl MemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> Option<Vec<TranscriptRecord>> {
        self.transcript.lock().ok().and_then(|t| t.clone())
    }

    pub fn verdict(&self) -> Option<VerdictRecord> {
        self.verdict.lock().ok().and_then(|v| v.clone())
    }

    pub fn graph(&self) -> Option<GraphDescription> {
        self.graph.lock().ok().and_then(|g| g.clone())
    }
}

impl DebateExporter for MemoryExporter {
    fn export_transcript(&self, records: &[TranscriptRecord]) -> Result<(), ExportError> {
        if let Ok(mut slot) = self.transcript.lock() {
            *slot = Some(records.to_vec());
        }
        Ok(())
    }

    fn export_verdict(&self, record: &VerdictRecord) -> Result<(), ExportError> {
        if let Ok(mut slot) = self.verdict.lock() {
            *slot = Some(record.clone());
        }
        Ok(())
    }

    fn export_graph(&self, graph: &GraphDescription) -> Result<(), ExportError> {
        if let Ok(mut slot) = self.graph.lock() {
            *slot = Some(graph.clone());
        }
        Ok(())
    }
}
