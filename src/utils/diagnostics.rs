use crate::domain::model::Diagnostic;
use crate::domain::ports::DiagnosticSink;
use std::sync::Mutex;

/// Forwards diagnostics to the `tracing` subscriber as warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::MalformedLine { line_number, .. } => {
                tracing::warn!(line = line_number, "⚠️ {}", diagnostic);
            }
            Diagnostic::RecordRejected { line_number, .. } => {
                tracing::warn!(line = ?line_number, "⚠️ {}", diagnostic);
            }
            Diagnostic::OutputPathSubstituted { .. } => {
                tracing::warn!("📁 {}", diagnostic);
            }
        }
    }
}

/// Keeps every diagnostic in memory so callers can inspect them after a run.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    events: Mutex<Vec<Diagnostic>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemoryDiagnostics {
    fn emit(&self, diagnostic: &Diagnostic) {
        tracing::debug!("{}", diagnostic);
        if let Ok(mut events) = self.events.lock() {
            events.push(diagnostic.clone());
        }
    }
}
