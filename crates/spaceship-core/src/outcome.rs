use serde::Serialize;

use crate::ValidationError;

/// Result contract returned by every registrar workflow.
///
/// Failures are data, not panics: callers match on the tier to decide whether
/// to fix input, show the registrar's message, or try again later.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    /// Input rejected before any network call.
    ValidationError(ValidationError),
    /// The registrar understood the request and refused it.
    BusinessError { detail: String },
    /// Network or protocol failure. `status_code` is 0 when no HTTP response arrived.
    TransportError { status_code: u16, message: String },
}

impl<T> Outcome<T> {
    pub fn business(detail: impl Into<String>) -> Self {
        Self::BusinessError {
            detail: detail.into(),
        }
    }

    pub fn transport(status_code: u16, message: impl Into<String>) -> Self {
        Self::TransportError {
            status_code,
            message: message.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        self.and_then(|value| Outcome::Success(f(value)))
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self.branch() {
            Ok(value) => f(value),
            Err(failure) => failure,
        }
    }

    /// Success value, or the failure re-typed for an early return.
    pub fn branch<U>(self) -> Result<T, Outcome<U>> {
        match self {
            Self::Success(value) => Ok(value),
            Self::ValidationError(error) => Err(Outcome::ValidationError(error)),
            Self::BusinessError { detail } => Err(Outcome::BusinessError { detail }),
            Self::TransportError {
                status_code,
                message,
            } => Err(Outcome::TransportError {
                status_code,
                message,
            }),
        }
    }

    /// Human-readable message for any failure tier.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Success(_) => None,
            Self::ValidationError(error) => Some(error.to_string()),
            Self::BusinessError { detail } => Some(detail.clone()),
            Self::TransportError {
                status_code: 0,
                message,
            } => Some(format!("transport failure: {message}")),
            Self::TransportError {
                status_code,
                message,
            } => Some(format!("HTTP {status_code}: {message}")),
        }
    }

    /// Failure message as an `Err`, for callers that only need success or a string.
    pub fn into_result(self) -> Result<T, String> {
        let message = self.error_message();
        match self {
            Self::Success(value) => Ok(value),
            _ => Err(message.unwrap_or_default()),
        }
    }

    /// `{error, detail}` view for the host platform.
    pub fn report(&self) -> OutcomeReport {
        let (error, detail) = match self {
            Self::Success(_) => (None, None),
            Self::ValidationError(error) => (Some("validation"), Some(error.to_string())),
            Self::BusinessError { detail } => (Some("business"), Some(detail.clone())),
            Self::TransportError { .. } => (Some("transport"), self.error_message()),
        };
        OutcomeReport {
            error: error.map(str::to_owned),
            detail,
        }
    }
}

impl<T> From<ValidationError> for Outcome<T> {
    fn from(value: ValidationError) -> Self {
        Self::ValidationError(value)
    }
}

/// Serializable failure summary. Both fields are absent on success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
