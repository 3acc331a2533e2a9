use serde_json::{json, Value};
use std::fmt;

/// Errors raised by the BigDataCorp client.
///
/// Every variant except `MaxRetries` and `Http` is produced by inspecting the
/// response envelope and is never retried.
#[derive(Debug, Clone, PartialEq)]
pub enum BigDataError {
    /// Unknown dataset name, or a usage query rejected by the server.
    Configuration(String),
    /// The document belongs to an under-age person.
    MinorDocument(Value),
    /// Expired subscription or a login-range status code.
    LoginProblem {
        /// Human-readable description.
        message: String,
        /// Status object and document that triggered it.
        payload: Value,
    },
    /// Status code in the input-validation range.
    InvalidInput(Value),
    /// Status code in the internal service range.
    ApiProblem(Value),
    /// Status code in the on-demand queries range.
    OnDemandQueries(Value),
    /// Status code in the monitoring / asynchronous calls range.
    MonitoringApi(Value),
    /// Nonzero status code outside every known range.
    Unmapped(Value),
    /// Any nonzero status code, when running with legacy error classification.
    InvalidDocument {
        /// Human-readable description.
        message: String,
        /// Status object and document that triggered it.
        payload: Value,
    },
    /// Every attempt failed with a transport or parse error.
    MaxRetries(Vec<String>),
    /// Usage endpoint answered 500, or its response could not be read.
    /// Reported once; the dataset is skipped, not queried again.
    Http(String),
}

impl BigDataError {
    /// Stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            BigDataError::Configuration(_) => "ConfigurationError",
            BigDataError::MinorDocument(_) => "MinorDocumentError",
            BigDataError::LoginProblem { .. } => "LoginProblemError",
            BigDataError::InvalidInput(_) => "InvalidInputError",
            BigDataError::ApiProblem(_) => "ApiProblemError",
            BigDataError::OnDemandQueries(_) => "OnDemandQueriesError",
            BigDataError::MonitoringApi(_) => "MonitoringApiError",
            BigDataError::Unmapped(_) => "UnmappedError",
            BigDataError::InvalidDocument { .. } => "InvalidDocumentError",
            BigDataError::MaxRetries(_) => "MaxRetriesError",
            BigDataError::Http(_) => "HttpError",
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        match self {
            BigDataError::Configuration(msg) | BigDataError::Http(msg) => msg.clone(),
            BigDataError::MinorDocument(_) => "this cpf belongs to a minor".to_string(),
            BigDataError::LoginProblem { message, .. }
            | BigDataError::InvalidDocument { message, .. } => message.clone(),
            BigDataError::InvalidInput(_) => "error related to input data".to_string(),
            BigDataError::ApiProblem(_) => {
                "error related to internal problems in APIs or services".to_string()
            }
            BigDataError::OnDemandQueries(_) => "error related to on-demand queries".to_string(),
            BigDataError::MonitoringApi(_) => {
                "error related to problems in the Monitoring API or Asynchronous Calls"
                    .to_string()
            }
            BigDataError::Unmapped(_) => "unmapped error".to_string(),
            BigDataError::MaxRetries(errors) => format!(
                "Untreated error on API with max {} retries:{}",
                errors.len(),
                errors.join("\n")
            ),
        }
    }

    /// Structured payload attached to the error.
    pub fn payload(&self) -> Value {
        match self {
            BigDataError::Configuration(_) | BigDataError::Http(_) => json!({}),
            BigDataError::MinorDocument(payload)
            | BigDataError::InvalidInput(payload)
            | BigDataError::ApiProblem(payload)
            | BigDataError::OnDemandQueries(payload)
            | BigDataError::MonitoringApi(payload)
            | BigDataError::Unmapped(payload) => payload.clone(),
            BigDataError::LoginProblem { payload, .. }
            | BigDataError::InvalidDocument { payload, .. } => payload.clone(),
            BigDataError::MaxRetries(errors) => json!({ "errors": errors }),
        }
    }

    /// Renders the error as `{"type", "message", "payload"}`.
    pub fn to_json(&self) -> Value {
        json!({
            "type": self.kind(),
            "message": self.message(),
            "payload": self.payload(),
        })
    }
}

impl fmt::Display for BigDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for BigDataError {}

impl From<reqwest::Error> for BigDataError {
    fn from(err: reqwest::Error) -> Self {
        BigDataError::Http(err.to_string())
    }
}
