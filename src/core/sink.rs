use crate::domain::model::{Coordinate, OutputRecord};
use crate::domain::ports::Storage;
use crate::utils::error::{EntertainerError, Result};
use serde::Serialize;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Context printed above the console table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportHeader {
    pub destination: Coordinate,
    pub max_travel_distance: f64,
}

/// Writes the selected customers to the console and to the output file.
pub struct ResultSink<S: Storage, W: Write + Send = Stdout> {
    storage: S,
    output_path: PathBuf,
    header: ReportHeader,
    console: Mutex<W>,
}

impl<S: Storage, W: Write + Send> ResultSink<S, W> {
    pub fn with_console(storage: S, output_path: PathBuf, header: ReportHeader, console: W) -> Self {
        Self {
            storage,
            output_path,
            header,
            console: Mutex::new(console),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Renders the console report, then replaces the output file content.
    pub async fn emit(&self, records: &[OutputRecord]) -> Result<String> {
        {
            let mut console = self.console.lock().map_err(|_| EntertainerError::ProcessingError {
                message: "console writer lock poisoned".to_string(),
            })?;
            render_report(&mut *console, &self.header, records)?;
            console.flush()?;
        }

        let data = encode_lines(records)?;
        tracing::debug!(
            "Writing {} records ({} bytes) to {}",
            records.len(),
            data.len(),
            self.output_path.display()
        );
        self.storage.write_file(&self.output_path, &data).await?;

        Ok(self.output_path.display().to_string())
    }

    pub fn into_console(self) -> W {
        self.console
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub fn render_report<W: Write + ?Sized>(
    out: &mut W,
    header: &ReportHeader,
    records: &[OutputRecord],
) -> io::Result<()> {
    writeln!(
        out,
        "Customers within {:?}km Distance of latitude: {:?} and longitude: {:?}",
        header.max_travel_distance, header.destination.latitude, header.destination.longitude
    )?;
    writeln!(out, "{:<10} {:<10}", "USER_ID", "NAME")?;
    for record in records {
        writeln!(out, "{:<10} {:<10}", record.user_id, record.name)?;
    }
    Ok(())
}

/// One JSON object per line, `{"user_id": 12, "name": "..."}`.
pub fn encode_lines(records: &[OutputRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    for record in records {
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedFormatter);
        record.serialize(&mut serializer)?;
        buffer.push(b'\n');
    }
    Ok(buffer)
}

/// Compact JSON with a space after every `:` and `,`.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex as AsyncMutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<AsyncMutex<HashMap<PathBuf, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &Path) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
            self.files.lock().await.insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }
    }

    fn header() -> ReportHeader {
        ReportHeader {
            destination: Coordinate::new(53.339428, -6.257664),
            max_travel_distance: 100.0,
        }
    }

    fn records() -> Vec<OutputRecord> {
        vec![
            OutputRecord {
                user_id: 4,
                name: "Ian Kehoe".to_string(),
            },
            OutputRecord {
                user_id: 12,
                name: "Christina McArdle".to_string(),
            },
        ]
    }

    #[test]
    fn test_encode_lines_matches_file_format() {
        let data = encode_lines(&records()).unwrap();
        assert_eq!(
            String::from_utf8(data).unwrap(),
            "{\"user_id\": 4, \"name\": \"Ian Kehoe\"}\n{\"user_id\": 12, \"name\": \"Christina McArdle\"}\n"
        );
    }

    #[test]
    fn test_encoded_lines_decode_back() {
        let mut input = records();
        input.push(OutputRecord {
            user_id: -3,
            name: "Seán \"Quote\" Ó Briain".to_string(),
        });

        let text = String::from_utf8(encode_lines(&input).unwrap()).unwrap();
        let decoded: Vec<OutputRecord> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(decoded, input);
    }

    #[test]
    fn test_encode_empty_collection() {
        assert!(encode_lines(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_render_report_layout() {
        let mut out = Vec::new();
        render_report(&mut out, &header(), &records()).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Customers within 100.0km Distance of latitude: 53.339428 and longitude: -6.257664"
        );
        assert_eq!(lines[1], "USER_ID    NAME      ");
        assert_eq!(lines[2], "4          Ian Kehoe ");
        assert_eq!(lines[3], "12         Christina McArdle");
        assert_eq!(lines.len(), 4);
    }

    #[tokio::test]
    async fn test_emit_writes_console_and_file() {
        let storage = MockStorage::default();
        let path = PathBuf::from("out/output.txt");
        let sink = ResultSink::with_console(storage.clone(), path.clone(), header(), Vec::<u8>::new());

        let written = sink.emit(&records()).await.unwrap();

        assert_eq!(written, "out/output.txt");
        let file = storage.get_file(&path).await.unwrap();
        assert_eq!(file, encode_lines(&records()).unwrap());

        let console = String::from_utf8(sink.into_console()).unwrap();
        assert!(console.contains("Christina McArdle"));
    }
}
