use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One model call made on behalf of a pipeline operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationLog {
    pub id: String,
    pub timestamp: String,
    pub operation: String,
    pub model: String,
    pub temperature: f32,
    pub latency_ms: u64,
    pub prompt_chars: usize,
    pub output_chars: usize,
    pub success: bool,
    pub error: Option<String>,
}

impl OperationLog {
    pub fn summary(&self) -> String {
        let outcome = match &self.error {
            None => "ok".to_string(),
            Some(e) => format!("failed: {}", e),
        };
        format!(
            "[{}] model={} temperature={:.1} latency={:.1}s prompt={} chars output={} chars | {}",
            self.operation,
            self.model,
            self.temperature,
            self.latency_ms as f64 / 1000.0,
            self.prompt_chars,
            self.output_chars,
            outcome,
        )
    }
}

/// Appends operation records as JSON lines to `<dir>/runs.jsonl`.
#[derive(Debug, Clone)]
pub struct RunLogger {
    dir: PathBuf,
}

impl RunLogger {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).context("Failed to create logs directory")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join("runs.jsonl")
    }

    pub fn write(&self, entry: &OperationLog) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path())
            .context("Failed to open log file")?;

        let json = serde_json::to_string(entry).context("Failed to serialize operation log")?;
        writeln!(file, "{}", json).context("Failed to write log")?;

        Ok(())
    }
}
