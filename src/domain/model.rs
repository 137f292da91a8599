use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A point on the globe in degrees. Values are not range-restricted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude_radians(&self) -> f64 {
        self.latitude.to_radians()
    }

    pub fn longitude_radians(&self) -> f64 {
        self.longitude.to_radians()
    }
}

/// One decoded input line. A line that fails to decode becomes the empty record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerRecord {
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl CustomerRecord {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }
}

impl fmt::Display for CustomerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::Value::Object(self.data.clone()))
    }
}

/// A record that passed validation, with its coordinates already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCustomer {
    pub user_id: i64,
    pub name: String,
    pub coordinate: Coordinate,
}

impl ValidCustomer {
    pub fn into_output(self) -> OutputRecord {
        OutputRecord {
            user_id: self.user_id,
            name: self.name,
        }
    }
}

/// The projected form that is reported and persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub user_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    MissingField(&'static str),
    InvalidCoordinate {
        field: &'static str,
        value: serde_json::Value,
    },
    InvalidUserId(serde_json::Value),
    InvalidName(serde_json::Value),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing field '{}'", field),
            Self::InvalidCoordinate { field, value } => {
                write!(f, "'{}' is not a number: {}", field, value)
            }
            Self::InvalidUserId(value) => write!(f, "'user_id' is not an integer: {}", value),
            Self::InvalidName(value) => write!(f, "'name' is not a string: {}", value),
        }
    }
}

/// Non-fatal events observed during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    MalformedLine {
        line_number: usize,
        reason: String,
    },
    RecordRejected {
        line_number: Option<usize>,
        record: CustomerRecord,
        reason: RejectionReason,
    },
    OutputPathSubstituted {
        requested: PathBuf,
        fallback: PathBuf,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine {
                line_number,
                reason,
            } => write!(
                f,
                "Encountered invalid JSON input on line {}: {}. Rendering as \"{{}}\"",
                line_number, reason
            ),
            Self::RecordRejected {
                line_number: Some(line),
                record,
                reason,
            } => write!(
                f,
                "Omitting invalid customer record on line {} ({}): {}",
                line, reason, record
            ),
            Self::RecordRejected {
                line_number: None,
                record,
                reason,
            } => write!(f, "Omitting invalid customer record ({}): {}", reason, record),
            Self::OutputPathSubstituted {
                requested,
                fallback,
            } => write!(
                f,
                "Given output file path: {} does not exist. Defaulting to: {}",
                requested.display(),
                fallback.display()
            ),
        }
    }
}

/// Outcome of the transform phase: the sorted selection plus counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformResult {
    pub selected: Vec<OutputRecord>,
    pub records_read: usize,
    pub rejected: usize,
    pub out_of_range: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub output_path: String,
    pub result: TransformResult,
}
