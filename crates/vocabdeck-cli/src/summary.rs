use std::fmt;

/// Outcome tally for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub audio_included: usize,
    /// Words whose definition lookup failed, in processing order.
    pub failed: Vec<String>,
}

impl RunSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Summary ===")?;
        writeln!(f, "Total words processed: {}", self.total)?;
        writeln!(f, "Successfully added: {} words", self.succeeded)?;
        writeln!(f, "Audio files included: {}", self.audio_included)?;
        write!(f, "Failed: {} words", self.failed.len())?;
        if !self.failed.is_empty() {
            write!(f, "\nFailed words: {}", self.failed.join(", "))?;
        }
        Ok(())
    }
}
