use thiserror::Error;

/// Client-side validation errors, raised before any network call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("API credentials are missing: '{field}' is empty")]
    MissingCredential { field: &'static str },
    #[error("API endpoint must be an http(s) URL: '{value}'")]
    InvalidEndpoint { value: String },

    #[error("domain name cannot be empty")]
    EmptyDomain,
    #[error("domain name '{value}' must contain a second-level and top-level label")]
    DomainMissingTld { value: String },
    #[error("domain name '{value}' contains an empty label")]
    DomainEmptyLabel { value: String },
    #[error("domain name '{value}' contains invalid character '{ch}'")]
    DomainInvalidChar { value: String, ch: char },

    #[error("missing required parameter: {name}")]
    MissingParameter { name: &'static str },
    #[error("renewal period must be between {min} and {max} years, got {value}")]
    YearsOutOfRange { value: u32, min: u32, max: u32 },
    #[error("expected between {min} and {max} nameservers, got {count}")]
    NameserverCount { count: usize, min: usize, max: usize },
    #[error("nameserver host in slot ns{slot} is empty")]
    EmptyNameserver { slot: usize },
    #[error("contact id cannot be empty")]
    EmptyContactId,
    #[error("contact attribute map must be a non-empty JSON object")]
    InvalidContactAttributes,
    #[error("DNS record list cannot be empty")]
    EmptyRecordList,
    #[error("DNS record priority must be a number, got '{value}'")]
    InvalidPriority { value: String },
    #[error("page size must be between 1 and {max}, got {value}")]
    InvalidPageSize { value: u32, max: u32 },

    #[error("timestamp is not a recognised date: '{value}'")]
    InvalidTimestamp { value: String },
}

/// Top-level error type for the configuration and logging surfaces.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("log sink i/o error: {0}")]
    Io(#[from] std::io::Error),
}
