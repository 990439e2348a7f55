use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Fully-qualified, lower-cased domain name such as `example.co.uk`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    /// Parse and normalise a fully-qualified name. A single trailing root dot is dropped.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyDomain);
        }

        let normalized = trimmed.to_lowercase();
        if !normalized.contains('.') {
            return Err(ValidationError::DomainMissingTld { value: normalized });
        }

        if normalized.split('.').any(str::is_empty) {
            return Err(ValidationError::DomainEmptyLabel { value: normalized });
        }

        if let Some(ch) = normalized
            .chars()
            .find(|ch| !(ch.is_alphanumeric() || *ch == '-' || *ch == '.'))
        {
            return Err(ValidationError::DomainInvalidChar {
                value: normalized,
                ch,
            });
        }

        Ok(Self(normalized))
    }

    /// Join a second-level label and a top-level label. The TLD may carry a leading dot.
    pub fn from_parts(sld: &str, tld: &str) -> Result<Self, ValidationError> {
        let sld = sld.trim();
        let tld = tld.trim();
        let tld = tld.strip_prefix('.').unwrap_or(tld);
        if sld.is_empty() || tld.is_empty() {
            return Err(ValidationError::EmptyDomain);
        }

        Self::parse(&format!("{sld}.{tld}"))
    }

    /// Resolve from host parameters: an explicit full name wins over `sld` + `tld`.
    pub fn resolve(
        full_name: Option<&str>,
        sld: Option<&str>,
        tld: Option<&str>,
    ) -> Result<Self, ValidationError> {
        match full_name.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => Self::parse(name),
            None => Self::from_parts(sld.unwrap_or_default(), tld.unwrap_or_default()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Left-most label.
    pub fn sld(&self) -> &str {
        self.0.split('.').next().unwrap_or_default()
    }

    /// Everything after the first label, e.g. `co.uk`.
    pub fn tld(&self) -> &str {
        self.0
            .split_once('.')
            .map(|(_, tld)| tld)
            .unwrap_or_default()
    }
}

impl Display for DomainName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for DomainName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for DomainName {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<DomainName> for String {
    fn from(value: DomainName) -> Self {
        value.0
    }
}
