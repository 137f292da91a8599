use crate::domain::model::{CustomerRecord, Diagnostic};
use crate::domain::ports::DiagnosticSink;
use crate::utils::error::{EntertainerError, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A decoded line together with its 1-based position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine {
    pub line_number: usize,
    pub record: CustomerRecord,
}

/// Lazy, single-pass reader of line-delimited JSON customer records.
///
/// Every line yields exactly one item. Lines that are not a JSON object,
/// including blank lines in the middle of the file, yield the empty record
/// and a `MalformedLine` diagnostic, as do lines that are not valid UTF-8.
/// Iteration ends at end of file. Only a failed read is yielded as an error item.
pub struct RecordSource {
    path: PathBuf,
    reader: Box<dyn BufRead + Send>,
    line_number: usize,
    finished: bool,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl RecordSource {
    /// Opens `path` immediately so a missing file fails before any processing.
    pub fn open(path: impl AsRef<Path>, diagnostics: Arc<dyn DiagnosticSink>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => EntertainerError::ResourceNotFound { path: path.clone() },
            _ => EntertainerError::IoError(e),
        })?;

        tracing::debug!("Opened customer data file: {}", path.display());
        Ok(Self::from_reader(path, BufReader::new(file), diagnostics))
    }

    pub fn from_reader<R: Read + Send + 'static>(
        label: impl Into<PathBuf>,
        reader: BufReader<R>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            path: label.into(),
            reader: Box::new(reader),
            line_number: 0,
            finished: false,
            diagnostics,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    fn decode(&self, line: &[u8]) -> CustomerRecord {
        let line = match std::str::from_utf8(line) {
            Ok(text) => text.trim_end(),
            Err(e) => return self.malformed(format!("line is not valid UTF-8: {}", e)),
        };
        match serde_json::from_str::<serde_json::Value>(line) {
            Ok(serde_json::Value::Object(data)) => CustomerRecord { data },
            Ok(other) => self.malformed(format!("expected a JSON object, found {}", other)),
            Err(e) => self.malformed(e.to_string()),
        }
    }

    fn malformed(&self, reason: String) -> CustomerRecord {
        self.diagnostics.emit(&Diagnostic::MalformedLine {
            line_number: self.line_number,
            reason,
        });
        CustomerRecord::empty()
    }
}

impl Iterator for RecordSource {
    type Item = Result<SourceLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut line = Vec::new();
        match self.reader.read_until(b'\n', &mut line) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) => {
                self.line_number += 1;
                let record = self.decode(&line);
                Some(Ok(SourceLine {
                    line_number: self.line_number,
                    record,
                }))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(EntertainerError::IoError(e)))
            }
        }
    }
}

impl fmt::Debug for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSource")
            .field("path", &self.path)
            .field("line_number", &self.line_number)
            .field("finished", &self.finished)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::diagnostics::MemoryDiagnostics;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CUSTOMERS: &str = r#"{"latitude": "53.521111", "user_id": 20, "name": "Enid Enright", "longitude": "-9.831111"}
{"latitude": "51.92893", "user_id": 1, "name": "Alice Cahill", "longitude": "-10.27699"}
not json at all

[1, 2, 3]
{"latitude": "52.986375", "user_id": 12, "name": "Christina McArdle", "longitude": "-6.043701"}
{"user_id": 99}"#;

    fn source_for(content: &str) -> (RecordSource, Arc<MemoryDiagnostics>) {
        let diagnostics = Arc::new(MemoryDiagnostics::new());
        let reader = BufReader::new(std::io::Cursor::new(content.to_string().into_bytes()));
        (
            RecordSource::from_reader("memory", reader, diagnostics.clone()),
            diagnostics,
        )
    }

    #[test]
    fn test_every_line_yields_one_record() {
        let (source, _) = source_for(CUSTOMERS);
        let lines: Vec<SourceLine> = source.collect::<Result<_>>().unwrap();

        assert_eq!(lines.len(), 7);
        assert_eq!(
            lines.iter().map(|l| l.line_number).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6, 7]
        );
    }

    #[test]
    fn test_first_line_decodes_to_record() {
        let (mut source, _) = source_for(CUSTOMERS);
        let first = source.next().unwrap().unwrap();

        let expected: CustomerRecord = serde_json::from_value(json!({
            "latitude": "53.521111", "user_id": 20, "name": "Enid Enright", "longitude": "-9.831111"
        }))
        .unwrap();
        assert_eq!(first.record, expected);
    }

    #[test]
    fn test_malformed_blank_and_non_object_lines_become_empty_records() {
        let (source, diagnostics) = source_for(CUSTOMERS);
        let lines: Vec<SourceLine> = source.collect::<Result<_>>().unwrap();

        let empty: Vec<usize> = lines
            .iter()
            .filter(|l| l.record.is_empty())
            .map(|l| l.line_number)
            .collect();
        assert_eq!(empty, vec![3, 4, 5]);

        let malformed: Vec<usize> = diagnostics
            .events()
            .iter()
            .filter_map(|d| match d {
                Diagnostic::MalformedLine { line_number, .. } => Some(*line_number),
                _ => None,
            })
            .collect();
        assert_eq!(malformed, vec![3, 4, 5]);
    }

    #[test]
    fn test_invalid_utf8_line_becomes_empty_record_and_iteration_continues() {
        let mut content = br#"{"user_id": 4, "name": "Ian Kehoe"}"#.to_vec();
        content.extend_from_slice(b"\n{\"user_id\": 7, \"name\": \"Se\xe1n\"}\n");
        content.extend_from_slice(br#"{"user_id": 5, "name": "Nora Dempsey"}"#);

        let diagnostics = Arc::new(MemoryDiagnostics::new());
        let reader = BufReader::new(std::io::Cursor::new(content));
        let source = RecordSource::from_reader("memory", reader, diagnostics.clone());
        let lines: Vec<SourceLine> = source.collect::<Result<_>>().unwrap();

        assert_eq!(lines.len(), 3);
        assert!(!lines[0].record.is_empty());
        assert!(lines[1].record.is_empty());
        assert_eq!(lines[2].record.get("user_id"), Some(&json!(5)));

        match &diagnostics.events()[..] {
            [Diagnostic::MalformedLine { line_number, reason }] => {
                assert_eq!(*line_number, 2);
                assert!(reason.contains("UTF-8"), "{}", reason);
            }
            other => panic!("unexpected diagnostics: {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let (mut source, diagnostics) = source_for("");
        assert!(source.next().is_none());
        assert!(source.next().is_none());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_crlf_line_endings_decode() {
        let (source, diagnostics) =
            source_for("{\"user_id\": 1, \"name\": \"A\"}\r\n{\"user_id\": 2, \"name\": \"B\"}\r\n");
        let lines: Vec<SourceLine> = source.collect::<Result<_>>().unwrap();

        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| !l.record.is_empty()));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_open_missing_file_fails_fast() {
        let diagnostics = Arc::new(MemoryDiagnostics::new());
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not_exist.txt");

        let err = RecordSource::open(&missing, diagnostics).unwrap_err();

        match err {
            EntertainerError::ResourceNotFound { path } => assert_eq!(path, missing),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_open_reads_file_lazily() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"user_id": 1, "name": "A", "latitude": "1", "longitude": "2"}}"#).unwrap();
        writeln!(file, r#"{{"user_id": 2, "name": "B", "latitude": "3", "longitude": "4"}}"#).unwrap();

        let diagnostics = Arc::new(MemoryDiagnostics::new());
        let mut source = RecordSource::open(file.path(), diagnostics).unwrap();

        assert_eq!(source.path(), file.path());
        assert!(source.next().is_some());
        assert_eq!(source.lines_read(), 1);
        assert!(source.next().is_some());
        assert!(source.next().is_none());
        assert_eq!(source.lines_read(), 2);
    }
}
