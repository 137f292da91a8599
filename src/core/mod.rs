pub mod decider;
pub mod etl;
pub mod geo;
pub mod sink;
pub mod source;
pub mod validator;

pub use crate::domain::model::{Coordinate, CustomerRecord, OutputRecord, TransformResult};
pub use crate::domain::ports::{ConfigProvider, DiagnosticSink, Pipeline, Storage};
pub use crate::utils::error::Result;
