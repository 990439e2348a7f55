//! Raw response normalization.
//!
//! Failures get a two-level unwrap: the outer transport envelope carries the
//! HTTP status and body text, and the registrar nests its human-readable
//! reason as `{"detail": ...}` inside that text. A `detail` makes the failure
//! a business error; anything else stays a transport error with the body
//! untouched.
//!
//! Successful payloads go through per-operation projections. The projections
//! are tolerant: absent lists become empty, absent strings become `""`, and a
//! bad expiry date only drops that one field. [`sync_status`] is the exception
//! and refuses to guess an expiry it cannot read.

use serde_json::Value;

use crate::client::RawResponse;
use crate::domain::{
    Availability, ContactDetails, DnsRecord, DomainRecord, LockStatus, Nameservers, SyncStatus,
};
use crate::{Outcome, UtcDateTime, ValidationError};

const TRANSFER_PROHIBITED: &str = "clientTransferProhibited";

/// Map a non-success raw response onto a business or transport error.
pub fn normalize_failure<T>(status_code: u16, message: &str) -> Outcome<T> {
    match serde_json::from_str::<Value>(message) {
        Ok(Value::Object(body)) => match body.get("detail") {
            Some(detail) => Outcome::business(value_to_string(detail)),
            None => Outcome::transport(status_code, message),
        },
        _ => Outcome::transport(status_code, message),
    }
}

/// Decoded payload on success, normalized failure otherwise.
pub fn normalize(raw: RawResponse) -> Outcome<Value> {
    normalize_with(raw, |body| Ok(body.clone()))
}

/// Apply `project` to a successful payload. A projection error means the
/// payload was unusable and is reported as a transport error carrying the
/// response status.
pub fn normalize_with<T>(
    raw: RawResponse,
    project: impl FnOnce(&Value) -> Result<T, String>,
) -> Outcome<T> {
    match raw {
        RawResponse::Failure {
            status_code,
            message,
        } => normalize_failure(status_code, &message),
        RawResponse::Json { status_code, body } => match project(&body) {
            Ok(value) => Outcome::Success(value),
            Err(message) => Outcome::transport(status_code, message),
        },
    }
}

/// Project a domain lookup payload.
pub fn domain_record(body: &Value) -> DomainRecord {
    let nameservers = body.get("nameservers");
    let expiry = match body.get("expirationDate").and_then(Value::as_str) {
        Some(raw) => match UtcDateTime::parse(raw) {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                log::warn!("ignoring expiry on domain record: {error}");
                None
            }
        },
        None => None,
    };

    DomainRecord {
        name: string_field(body, "name"),
        nameservers: nameservers.map(hosts).unwrap_or_default(),
        registration_status: body
            .get("verificationStatus")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_owned(),
        transfer_locked: lock_status(body).is_locked(),
        expiry,
        restorable: body.get("verificationStatus").and_then(Value::as_str) == Some("success"),
        privacy_protected: pointer_str(body, "/privacyProtection/level") == Some("high"),
        dns_managed: nameservers
            .and_then(|ns| ns.get("provider"))
            .and_then(Value::as_str)
            == Some("basic"),
        email_forwarding: body
            .pointer("/privacyProtection/contactForm")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        contact_change_pending: non_empty(body.get("pendingChanges")),
        suspension_pending: non_empty(body.get("suspensions")),
    }
}

/// Nameservers from a `{hosts: [...]}` object. Absent or malformed hosts give
/// an empty list.
pub fn hosts(body: &Value) -> Nameservers {
    let hosts = body
        .get("hosts")
        .and_then(Value::as_array)
        .map(|hosts| {
            hosts
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();
    Nameservers::new(hosts)
}

/// `locked` iff `eppStatuses` lists `clientTransferProhibited`.
pub fn lock_status(body: &Value) -> LockStatus {
    let locked = body
        .get("eppStatuses")
        .and_then(Value::as_array)
        .is_some_and(|statuses| {
            statuses
                .iter()
                .any(|status| status.as_str() == Some(TRANSFER_PROHIBITED))
        });
    LockStatus::from_locked(locked)
}

/// Records from `items`, renamed to host field names.
pub fn dns_records(body: &Value) -> Vec<DnsRecord> {
    body.get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| DnsRecord {
                    hostname: string_field(item, "name"),
                    record_type: string_field(item, "type"),
                    address: string_field(item, "value"),
                    priority: string_field(item, "priority"),
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn auth_code(body: &Value) -> Result<String, String> {
    body.get("authCode")
        .filter(|code| !code.is_null())
        .map(value_to_string)
        .ok_or_else(|| String::from("get_auth_code: response has no authCode"))
}

/// Contact with every canonical field populated; nulls read as `""`.
pub fn contact_details(body: &Value) -> ContactDetails {
    ContactDetails {
        first_name: string_field(body, "firstName"),
        last_name: string_field(body, "lastName"),
        organization: string_field(body, "organization"),
        email: string_field(body, "email"),
        address1: string_field(body, "address1"),
        address2: string_field(body, "address2"),
        city: string_field(body, "city"),
        country: string_field(body, "country"),
        state_province: string_field(body, "stateProvince"),
        postal_code: string_field(body, "postalCode"),
        phone: string_field(body, "phone"),
        phone_ext: string_field(body, "phoneExt"),
        fax: string_field(body, "fax"),
        fax_ext: string_field(body, "faxExt"),
        tax_number: string_field(body, "taxNumber"),
    }
}

/// Availability verdict. `domain` fills in when the payload omits its name.
pub fn availability(body: &Value, domain: &str) -> Availability {
    let result = string_field(body, "result");
    let name = string_field(body, "domain");
    Availability {
        domain: if name.is_empty() {
            domain.to_owned()
        } else {
            name
        },
        available: result == "available",
        result,
        premium: non_empty(body.get("premiumPricing")),
    }
}

/// Active/expired verdict against `now`. Fails when the expiry is missing or
/// unreadable, since neither flag can be computed without it.
pub fn sync_status(body: &Value, now: UtcDateTime) -> Result<SyncStatus, ValidationError> {
    let raw = body
        .get("expirationDate")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let expiry = UtcDateTime::parse(raw)?;
    let expired = now >= expiry;

    Ok(SyncStatus {
        active: !expired,
        expired,
        expiry_date: expiry.format_date(),
        nameservers: body.get("nameservers").map(hosts).unwrap_or_default(),
        locked: lock_status(body).is_locked(),
    })
}

fn string_field(body: &Value, key: &str) -> String {
    body.get(key).map(value_to_string).unwrap_or_default()
}

fn pointer_str<'a>(body: &'a Value, pointer: &str) -> Option<&'a str> {
    body.pointer(pointer).and_then(Value::as_str)
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn non_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn nested_detail_becomes_business_error() {
        let outcome: Outcome<()> =
            normalize_failure(400, r#"{"detail":"domain already registered"}"#);
        assert_eq!(outcome, Outcome::business("domain already registered"));
    }

    #[test]
    fn plain_text_failure_stays_transport_error() {
        let outcome: Outcome<()> = normalize_failure(0, "connection failed");
        assert_eq!(outcome, Outcome::transport(0, "connection failed"));

        let outcome: Outcome<()> = normalize_failure(500, r#"{"error":"boom"}"#);
        assert_eq!(outcome, Outcome::transport(500, r#"{"error":"boom"}"#));
    }

    #[test]
    fn domain_record_projects_every_flag() {
        let record = domain_record(&json!({
            "name": "example.com",
            "verificationStatus": "success",
            "eppStatuses": ["clientTransferProhibited", "clientDeleteProhibited"],
            "expirationDate": "2027-03-01T12:00:00Z",
            "privacyProtection": {"level": "high", "contactForm": true},
            "nameservers": {"provider": "basic", "hosts": ["a.ns", "b.ns"]},
            "pendingChanges": [{"type": "contact"}],
            "suspensions": []
        }));

        assert_eq!(record.name, "example.com");
        assert_eq!(record.registration_status, "success");
        assert_eq!(record.lock_status(), LockStatus::Locked);
        assert!(record.restorable);
        assert!(record.privacy_protected);
        assert!(record.email_forwarding);
        assert!(record.dns_managed);
        assert!(record.contact_change_pending);
        assert!(!record.suspension_pending);
        assert_eq!(record.nameservers.get(2), Some("b.ns"));
        assert_eq!(
            record.expiry.map(|expiry| expiry.format_date()).as_deref(),
            Some("2027-03-01")
        );
    }

    #[test]
    fn sparse_domain_payload_degrades_to_defaults() {
        let record = domain_record(&json!({
            "name": "example.com",
            "expirationDate": "next spring"
        }));

        assert!(record.nameservers.is_empty());
        assert_eq!(record.registration_status, "unknown");
        assert_eq!(record.lock_status(), LockStatus::Unlocked);
        assert_eq!(record.expiry, None);
        assert!(!record.dns_managed);
    }

    #[test]
    fn registration_status_follows_verification_status() {
        let record = domain_record(&json!({
            "name": "example.com",
            "verificationStatus": "pending"
        }));

        assert_eq!(record.registration_status, "pending");
        assert!(!record.restorable);
    }

    #[test]
    fn dns_records_use_host_field_names() {
        let records = dns_records(&json!({
            "items": [
                {"name": "www", "type": "A", "value": "1.2.3.4"},
                {"name": "@", "type": "MX", "value": "mx.example.net", "priority": 10}
            ]
        }));

        assert_eq!(
            records[0],
            DnsRecord {
                hostname: String::from("www"),
                record_type: String::from("A"),
                address: String::from("1.2.3.4"),
                priority: String::new(),
            }
        );
        assert_eq!(records[1].priority, "10");
        assert!(dns_records(&json!({})).is_empty());
    }

    #[test]
    fn contact_nulls_become_empty_strings() {
        let contact = contact_details(&json!({
            "firstName": "Ada",
            "organization": null,
            "stateProvince": "ON",
            "postalCode": "K1A 0B1"
        }));

        assert_eq!(contact.first_name, "Ada");
        assert_eq!(contact.organization, "");
        assert_eq!(contact.state_province, "ON");
        assert_eq!(contact.tax_number, "");
    }

    #[test]
    fn sync_compares_expiry_with_now() {
        let now = UtcDateTime::parse("2026-06-01T00:00:00Z").expect("valid timestamp");
        let status = sync_status(
            &json!({"expirationDate": "2026-05-31 23:59:59", "nameservers": {"hosts": ["a.ns"]}}),
            now,
        )
        .expect("parsable expiry");

        assert!(status.expired);
        assert!(!status.active);
        assert_eq!(status.expiry_date, "2026-05-31");
        assert_eq!(status.nameservers.to_map().get("ns1").map(String::as_str), Some("a.ns"));
    }

    #[test]
    fn sync_refuses_unreadable_expiry() {
        let now = UtcDateTime::now();
        let err = sync_status(&json!({"expirationDate": "soon"}), now).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTimestamp { .. }));
        assert!(sync_status(&json!({}), now).is_err());
    }

    #[test]
    fn availability_reads_result_and_premium_flag() {
        let verdict = availability(
            &json!({"result": "available", "premiumPricing": [{"price": 100}]}),
            "example.com",
        );
        assert!(verdict.available);
        assert!(verdict.premium);
        assert_eq!(verdict.domain, "example.com");
    }

    #[test]
    fn projection_error_keeps_response_status() {
        let raw = RawResponse::Json {
            status_code: 200,
            body: json!({}),
        };
        assert_eq!(
            normalize_with(raw, auth_code),
            Outcome::transport(200, "get_auth_code: response has no authCode")
        );
    }
}
