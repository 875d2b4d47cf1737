use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaleError {
    #[error("cannot parse color `{literal}`: {reason}")]
    Parse { literal: String, reason: String },
    #[error("invalid step table: {0}")]
    InvalidStepTable(String),
    #[error("invalid scale parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
