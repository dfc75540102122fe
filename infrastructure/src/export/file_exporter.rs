//! File-backed implementation of the [`DebateExporter`] port.

use debate_application::ports::debate_exporter::{DebateExporter, ExportError};
use debate_domain::{GraphDescription, TranscriptRecord, Turn, VerdictRecord};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const TRANSCRIPT_FILE: &str = "transcript.jsonl";
pub const VERDICT_FILE: &str = "verdict.json";
pub const GRAPH_FILE: &str = "debate_graph.dot";
pub const TIMELINE_FILE: &str = "debate_timeline.dot";

/// Writes debate artifacts into one directory:
///
/// | File | Content |
/// |------|---------|
/// | `transcript.jsonl` | one `{index, speaker, text}` object per line |
/// | `verdict.json` | `{topic, winner, justification, scores}` |
/// | `debate_graph.dot` | static node graph |
/// | `debate_timeline.dot` | round-by-round turn chain |
#[derive(Debug, Clone)]
pub struct FileDebateExporter {
    dir: PathBuf,
}

impl FileDebateExporter {
    /// Create the output directory and clear artifacts left by a previous
    /// session, so an aborted run never shows a stale verdict.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        for name in [TRANSCRIPT_FILE, VERDICT_FILE, GRAPH_FILE, TIMELINE_FILE] {
            let path = dir.join(name);
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn transcript_path(&self) -> PathBuf {
        self.dir.join(TRANSCRIPT_FILE)
    }

    pub fn verdict_path(&self) -> PathBuf {
        self.dir.join(VERDICT_FILE)
    }

    fn write_text(&self, name: &str, content: &str) -> Result<(), ExportError> {
        let path = self.dir.join(name);
        fs::write(&path, content)?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

impl DebateExporter for FileDebateExporter {
    fn export_transcript(&self, records: &[TranscriptRecord]) -> Result<(), ExportError> {
        let path = self.transcript_path();
        let mut writer = BufWriter::new(File::create(&path)?);
        for record in records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        info!("Transcript ({} turns) saved to {}", records.len(), path.display());
        Ok(())
    }

    fn export_verdict(&self, record: &VerdictRecord) -> Result<(), ExportError> {
        let json = serde_json::to_string_pretty(record)?;
        self.write_text(VERDICT_FILE, &json)?;
        info!("Verdict saved to {}", self.verdict_path().display());
        Ok(())
    }

    fn export_graph(&self, graph: &GraphDescription) -> Result<(), ExportError> {
        self.write_text(GRAPH_FILE, &graph.to_dot())
    }

    fn export_timeline(&self, turns: &[Turn]) -> Result<(), ExportError> {
        self.write_text(TIMELINE_FILE, &GraphDescription::timeline(turns).to_dot())
    }
}

/// Load an exported transcript. Blank lines are skipped.
pub fn read_transcript(path: impl AsRef<Path>) -> Result<Vec<TranscriptRecord>, ExportError> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}
