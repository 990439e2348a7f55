use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::ValidationError;

/// UTC instant, normalised from whatever offset the registrar reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Parse an RFC3339 timestamp, a `YYYY-MM-DD HH:MM:SS` UTC timestamp, or a
    /// bare `YYYY-MM-DD` date (taken as midnight UTC).
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let invalid = || ValidationError::InvalidTimestamp {
            value: input.to_owned(),
        };
        if trimmed.is_empty() {
            return Err(invalid());
        }

        if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
            return Ok(Self(parsed.to_offset(UtcOffset::UTC)));
        }

        let datetime = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, &datetime) {
            return Ok(Self(parsed.assume_utc()));
        }

        let date = format_description!("[year]-[month]-[day]");
        Date::parse(trimmed, &date)
            .map(|parsed| Self(parsed.midnight().assume_utc()))
            .map_err(|_| invalid())
    }

    pub fn from_offset_datetime(value: OffsetDateTime) -> Self {
        Self(value.to_offset(UtcOffset::UTC))
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("<unformattable>"))
    }

    /// Calendar date in `YYYY-MM-DD` form.
    pub fn format_date(self) -> String {
        self.0
            .format(format_description!("[year]-[month]-[day]"))
            .unwrap_or_else(|_| String::from("<unformattable>"))
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
