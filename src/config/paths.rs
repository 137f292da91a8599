use crate::domain::model::Diagnostic;
use crate::domain::ports::DiagnosticSink;
use std::path::{Path, PathBuf};

/// Returns `requested` when its parent directory exists, otherwise `fallback`.
///
/// A substitution is reported as `Diagnostic::OutputPathSubstituted` and is never an error.
pub fn resolve_output_path(
    requested: &Path,
    fallback: &Path,
    diagnostics: &dyn DiagnosticSink,
) -> PathBuf {
    if parent_directory_exists(requested) {
        return requested.to_path_buf();
    }

    diagnostics.emit(&Diagnostic::OutputPathSubstituted {
        requested: requested.to_path_buf(),
        fallback: fallback.to_path_buf(),
    });
    fallback.to_path_buf()
}

fn parent_directory_exists(path: &Path) -> bool {
    match path.parent() {
        // bare file name: relative to the working directory
        Some(parent) if parent.as_os_str().is_empty() => true,
        Some(parent) => parent.is_dir(),
        None => true,
    }
}
