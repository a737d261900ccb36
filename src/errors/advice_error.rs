use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceErrorKind {
    InvalidInput,
    DataUnavailable,
    NoCandidates,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdviceError {
    pub kind: AdviceErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AdviceError {
    pub fn new(kind: AdviceErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            hint: None,
            details: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(AdviceErrorKind::InvalidInput, "INVALID_INPUT", message)
    }

    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::new(AdviceErrorKind::DataUnavailable, "DATA_UNAVAILABLE", message)
    }

    pub fn no_candidates(message: impl Into<String>) -> Self {
        Self::new(AdviceErrorKind::NoCandidates, "NO_CANDIDATES", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(AdviceErrorKind::Internal, "INTERNAL", message)
    }
}

impl fmt::Display for AdviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for AdviceError {}

impl From<std::io::Error> for AdviceError {
    fn from(err: std::io::Error) -> Self {
        AdviceError::internal(err.to_string())
    }
}
