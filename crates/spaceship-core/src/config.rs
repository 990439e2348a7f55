//! Client configuration.
//!
//! Credentials arrive from the host platform's module settings or from the
//! environment. They are checked before every call rather than at
//! construction, so a half-configured module still yields a validation
//! outcome for each operation instead of a panic or a network round trip.

use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Deserializer};

use crate::http_client::HttpAuth;
use crate::ValidationError;

/// Default API base, version segment included. Route paths never repeat it.
pub const DEFAULT_ENDPOINT: &str = "https://spaceship.dev/api/v1";

pub const ENV_API_KEY: &str = "SPACESHIP_API_KEY";
pub const ENV_API_SECRET: &str = "SPACESHIP_API_SECRET";
pub const ENV_ENDPOINT: &str = "SPACESHIP_API_ENDPOINT";
pub const ENV_CONTACT_ID: &str = "SPACESHIP_CONTACT_ID";
pub const ENV_DEBUG: &str = "SPACESHIP_DEBUG";

/// API key, secret and base endpoint. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
    endpoint: String,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        let endpoint = endpoint.into();
        Self {
            api_key: api_key.into().trim().to_owned(),
            api_secret: api_secret.into().trim().to_owned(),
            endpoint: endpoint.trim().trim_end_matches('/').to_owned(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.is_empty() {
            return Err(ValidationError::MissingCredential { field: "api_key" });
        }
        if self.api_secret.is_empty() {
            return Err(ValidationError::MissingCredential {
                field: "api_secret",
            });
        }
        if self.endpoint.is_empty() {
            return Err(ValidationError::MissingCredential { field: "endpoint" });
        }
        if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            return Err(ValidationError::InvalidEndpoint {
                value: self.endpoint.clone(),
            });
        }
        Ok(())
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn auth(&self) -> HttpAuth {
        HttpAuth::ApiKeyPair {
            key: self.api_key.clone(),
            secret: self.api_secret.clone(),
        }
    }

    /// `endpoint + "/" + path`. Only the endpoint's trailing slash is trimmed.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Everything a client needs for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub credentials: Credentials,
    /// Contact id assigned to every role on new registrations.
    pub contact_id: Option<String>,
    /// Emit request/response events to the log sink.
    pub debug: bool,
    /// Per-request deadline. `None` defers to the transport default.
    pub timeout_ms: Option<u64>,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            contact_id: None,
            debug: false,
            timeout_ms: None,
        }
    }

    pub fn with_contact_id(mut self, contact_id: impl Into<String>) -> Self {
        let contact_id = contact_id.into();
        self.contact_id = Some(contact_id).filter(|id| !id.trim().is_empty());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Read `SPACESHIP_*` variables. Missing credentials stay empty and are
    /// reported on first use. The endpoint defaults only when unset; an empty
    /// value is kept so validation rejects it.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        let endpoint = match std::env::var(ENV_ENDPOINT) {
            Err(std::env::VarError::NotPresent) => String::from(DEFAULT_ENDPOINT),
            other => other.unwrap_or_default(),
        };

        Self::new(Credentials::new(
            var(ENV_API_KEY),
            var(ENV_API_SECRET),
            endpoint,
        ))
        .with_contact_id(var(ENV_CONTACT_ID))
        .with_debug(parse_flag(&var(ENV_DEBUG)))
    }
}

/// Registrar module settings as the host platform stores them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostSettings {
    #[serde(rename = "APIKey", alias = "api_key", default)]
    pub api_key: String,
    #[serde(rename = "APISecret", alias = "api_secret", default)]
    pub api_secret: String,
    /// `None` when the setting is absent, which selects [`DEFAULT_ENDPOINT`].
    #[serde(rename = "APIEndPoint", alias = "endpoint", default)]
    pub endpoint: Option<String>,
    #[serde(rename = "contactId", alias = "contact_id", default)]
    pub contact_id: String,
    #[serde(
        rename = "DebugMode",
        alias = "debug",
        default,
        deserialize_with = "deserialize_flag"
    )]
    pub debug: bool,
}

impl HostSettings {
    pub fn into_config(self) -> ClientConfig {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| String::from(DEFAULT_ENDPOINT));
        ClientConfig::new(Credentials::new(self.api_key, self.api_secret, endpoint))
            .with_contact_id(self.contact_id)
            .with_debug(self.debug)
    }
}

impl From<HostSettings> for ClientConfig {
    fn from(value: HostSettings) -> Self {
        value.into_config()
    }
}

/// Host checkboxes arrive as `"on"`, `"yes"`, `"1"`, booleans or empty strings.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "on" | "yes" | "true" | "1"
    )
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(i64),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Number(value)) => value != 0,
        Some(Flag::Text(value)) => parse_flag(&value),
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_endpoint_only() {
        let creds = Credentials::new("key", "secret", "https://spaceship.dev/api/v1/");
        assert_eq!(
            creds.url("domains/example.com"),
            "https://spaceship.dev/api/v1/domains/example.com"
        );
    }

    #[test]
    fn each_empty_field_is_reported() {
        let cases = [
            (Credentials::new("", "s", DEFAULT_ENDPOINT), "api_key"),
            (Credentials::new("k", " ", DEFAULT_ENDPOINT), "api_secret"),
            (Credentials::new("k", "s", ""), "endpoint"),
        ];
        for (creds, expected) in cases {
            let err = creds.validate().expect_err("must fail");
            assert_eq!(err, ValidationError::MissingCredential { field: expected });
        }
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let err = Credentials::new("k", "s", "spaceship.dev/api")
            .validate()
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidEndpoint { .. }));
    }

    #[test]
    fn debug_output_hides_secret() {
        let creds = Credentials::new("key", "hunter2", DEFAULT_ENDPOINT);
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn host_settings_deserialize_from_module_params() {
        let settings: HostSettings = serde_json::from_value(serde_json::json!({
            "APIKey": "key",
            "APISecret": "secret",
            "APIEndPoint": "",
            "contactId": "contact-1",
            "DebugMode": "on"
        }))
        .expect("settings should deserialize");

        let config = settings.into_config();
        assert!(config.debug);
        assert_eq!(config.contact_id.as_deref(), Some("contact-1"));
        assert_eq!(config.credentials.endpoint(), "");
        assert_eq!(
            config.credentials.validate(),
            Err(ValidationError::MissingCredential { field: "endpoint" })
        );
    }

    #[test]
    fn absent_endpoint_setting_uses_default() {
        let settings: HostSettings = serde_json::from_value(serde_json::json!({
            "APIKey": "key",
            "APISecret": "secret"
        }))
        .expect("settings should deserialize");

        let config = settings.into_config();
        assert_eq!(config.credentials.endpoint(), DEFAULT_ENDPOINT);
        assert!(config.credentials.validate().is_ok());
    }

    #[test]
    fn empty_debug_and_contact_are_off() {
        let settings: HostSettings = serde_json::from_value(serde_json::json!({
            "APIKey": "key",
            "DebugMode": "",
            "contactId": "  "
        }))
        .expect("settings should deserialize");

        let config = ClientConfig::from(settings);
        assert!(!config.debug);
        assert_eq!(config.contact_id, None);
    }
}
