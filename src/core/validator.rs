use crate::domain::model::{Coordinate, CustomerRecord, Diagnostic, RejectionReason, ValidCustomer};
use crate::domain::ports::DiagnosticSink;
use serde_json::Value;
use std::sync::Arc;

pub const REQUIRED_FIELDS: [&str; 4] = ["latitude", "longitude", "name", "user_id"];

/// Checks decoded customer records and reports every rejection to a diagnostic sink.
pub struct RecordValidator {
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl RecordValidator {
    pub fn new(diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self { diagnostics }
    }

    pub fn validate(&self, record: &CustomerRecord) -> bool {
        self.accept(record, None).is_some()
    }

    /// Returns the parsed customer, or `None` after emitting a `RecordRejected` diagnostic.
    pub fn accept(
        &self,
        record: &CustomerRecord,
        line_number: Option<usize>,
    ) -> Option<ValidCustomer> {
        match inspect(record) {
            Ok(customer) => Some(customer),
            Err(reason) => {
                self.diagnostics.emit(&Diagnostic::RecordRejected {
                    line_number,
                    record: record.clone(),
                    reason,
                });
                None
            }
        }
    }
}

/// Pure validation, without side effects.
pub fn inspect(record: &CustomerRecord) -> Result<ValidCustomer, RejectionReason> {
    if let Some(missing) = REQUIRED_FIELDS
        .iter()
        .copied()
        .find(|key| record.get(key).is_none())
    {
        return Err(RejectionReason::MissingField(missing));
    }

    let latitude = parse_coordinate(record, "latitude")?;
    let longitude = parse_coordinate(record, "longitude")?;

    let user_id = record
        .get("user_id")
        .and_then(Value::as_i64)
        .ok_or_else(|| RejectionReason::InvalidUserId(field_value(record, "user_id")))?;

    let name = record
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| RejectionReason::InvalidName(field_value(record, "name")))?;

    Ok(ValidCustomer {
        user_id,
        name: name.to_string(),
        coordinate: Coordinate::new(latitude, longitude),
    })
}

/// Accepts JSON numbers and numeric strings such as `"-6.257664"` or `" 1e2 "`.
pub fn coordinate_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn parse_coordinate(record: &CustomerRecord, field: &'static str) -> Result<f64, RejectionReason> {
    let value = field_value(record, field);
    coordinate_value(&value).ok_or(RejectionReason::InvalidCoordinate { field, value })
}

fn field_value(record: &CustomerRecord, field: &str) -> Value {
    record.get(field).cloned().unwrap_or(Value::Null)
}
