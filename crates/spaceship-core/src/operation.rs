//! Registrar operations and their route table.
//!
//! Every [`OperationRequest`] maps to exactly one `(method, path)` pair and an
//! optional JSON body. Paths are relative to the configured endpoint, which
//! already carries the API version segment.
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | RegisterDomain | POST | `domains/{domain}` |
//! | TransferDomain | POST | `domains/transfer` |
//! | RenewDomain | PUT | `domains/{domain}/renew` |
//! | GetDomainInfo | GET | `domains/{domain}` |
//! | SaveNameservers | PUT | `domains/{domain}/nameservers` |
//! | GetDnsRecords | GET | `dns/records/{domain}?take&skip[&orderBy]` |
//! | SaveDnsRecords | PUT | `dns/records/{domain}` (body: record array) |
//! | DeleteDnsRecords | DELETE | `dns/records/{domain}` |
//! | SetDomainLock | PUT | `domains/{domain}/transfer/lock` |
//! | GetAuthCode | GET | `domains/{domain}/transfer/auth-code` |
//! | GetContactDetails | GET | `contacts/{contactId}` |
//! | SaveContactDetails | PUT | `contacts` |
//! | GetContactAttributes | GET | `contacts/attributes/{contactId}` |
//! | SaveContactAttributes | PUT | `contacts/attributes/{contactId}` |
//! | CheckAvailability | GET | `domains/{domain}/available` |
//! | GetPricing | GET | `domains/{domain}/pricing` |
//! | GetDnssec | GET | `domains/{domain}/dnssec` |
//! | UpdateDnssec | PUT | `domains/{domain}/dnssec` |
//! | ListTransfers | GET | `domains/transfers?take&skip` |

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::domain::{ContactDetails, ContactRole, DnsRecord, DomainName, MAX_NAMESERVERS};
use crate::http_client::HttpMethod;
use crate::ValidationError;

pub const MIN_RENEWAL_YEARS: u32 = 1;
pub const MAX_RENEWAL_YEARS: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 500;

/// Operation names, used for routing, log events and decode-error tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    RegisterDomain,
    TransferDomain,
    RenewDomain,
    GetDomainInfo,
    SaveNameservers,
    GetDnsRecords,
    SaveDnsRecords,
    DeleteDnsRecords,
    SetDomainLock,
    GetAuthCode,
    GetContactDetails,
    SaveContactDetails,
    GetContactAttributes,
    SaveContactAttributes,
    CheckAvailability,
    GetPricing,
    GetDnssec,
    UpdateDnssec,
    ListTransfers,
}

impl Operation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RegisterDomain => "register_domain",
            Self::TransferDomain => "transfer_domain",
            Self::RenewDomain => "renew_domain",
            Self::GetDomainInfo => "get_domain_info",
            Self::SaveNameservers => "save_nameservers",
            Self::GetDnsRecords => "get_dns_records",
            Self::SaveDnsRecords => "save_dns_records",
            Self::DeleteDnsRecords => "delete_dns_records",
            Self::SetDomainLock => "set_domain_lock",
            Self::GetAuthCode => "get_auth_code",
            Self::GetContactDetails => "get_contact_details",
            Self::SaveContactDetails => "save_contact_details",
            Self::GetContactAttributes => "get_contact_attributes",
            Self::SaveContactAttributes => "save_contact_attributes",
            Self::CheckAvailability => "check_availability",
            Self::GetPricing => "get_pricing",
            Self::GetDnssec => "get_dnssec",
            Self::UpdateDnssec => "update_dnssec",
            Self::ListTransfers => "list_transfers",
        }
    }

    pub const fn method(self) -> HttpMethod {
        match self {
            Self::RegisterDomain | Self::TransferDomain => HttpMethod::Post,
            Self::RenewDomain
            | Self::SaveNameservers
            | Self::SaveDnsRecords
            | Self::SetDomainLock
            | Self::SaveContactDetails
            | Self::SaveContactAttributes
            | Self::UpdateDnssec => HttpMethod::Put,
            Self::DeleteDnsRecords => HttpMethod::Delete,
            Self::GetDomainInfo
            | Self::GetDnsRecords
            | Self::GetAuthCode
            | Self::GetContactDetails
            | Self::GetContactAttributes
            | Self::CheckAvailability
            | Self::GetPricing
            | Self::GetDnssec
            | Self::ListTransfers => HttpMethod::Get,
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved method and endpoint-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: HttpMethod,
    pub path: String,
}

/// Nameserver delegation body: `{provider, hosts}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameserverUpdate {
    pub provider: String,
    pub hosts: Vec<String>,
}

impl NameserverUpdate {
    /// Custom delegation to 1..=5 hosts. Blank entries are dropped first, so
    /// unused host slots (`ns3`..`ns5` left empty) are not errors.
    pub fn custom<I, S>(hosts: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hosts: Vec<String> = hosts
            .into_iter()
            .map(|host| host.as_ref().trim().to_ascii_lowercase())
            .filter(|host| !host.is_empty())
            .collect();
        let update = Self {
            provider: String::from("custom"),
            hosts,
        };
        update.validate()?;
        Ok(update)
    }

    /// Registrar-hosted DNS, no custom hosts.
    pub fn basic() -> Self {
        Self {
            provider: String::from("basic"),
            hosts: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider != "custom" {
            return Ok(());
        }
        let count = self.hosts.len();
        if !(1..=MAX_NAMESERVERS).contains(&count) {
            return Err(ValidationError::NameserverCount {
                count,
                min: 1,
                max: MAX_NAMESERVERS,
            });
        }
        if let Some(index) = self.hosts.iter().position(|host| host.trim().is_empty()) {
            return Err(ValidationError::EmptyNameserver { slot: index + 1 });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyProtection {
    pub contact_form: bool,
    pub level: String,
}

/// Registration body for `POST domains/{domain}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<u32>,
    pub auto_renew: bool,
    pub privacy_protection: PrivacyProtection,
    pub nameservers: NameserverUpdate,
    pub contacts: Map<String, Value>,
}

impl RegistrationPayload {
    /// Registration with high privacy, auto-renew off, and `contact_id` in
    /// every role. No hosts means registrar-hosted DNS.
    pub fn new<I, S>(
        domain: &DomainName,
        nameservers: I,
        contact_id: &str,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let contact_id = contact_id.trim();
        if contact_id.is_empty() {
            return Err(ValidationError::EmptyContactId);
        }

        let hosts: Vec<String> = nameservers
            .into_iter()
            .map(|host| host.as_ref().to_owned())
            .collect();
        let nameservers = if hosts.iter().all(|host| host.trim().is_empty()) {
            NameserverUpdate::basic()
        } else {
            NameserverUpdate::custom(hosts)?
        };

        let contacts = ContactRole::ALL
            .iter()
            .map(|role| (role.as_str().to_owned(), Value::from(contact_id)))
            .collect();

        Ok(Self {
            name: domain.as_str().to_owned(),
            years: None,
            auto_renew: false,
            privacy_protection: PrivacyProtection {
                contact_form: true,
                level: String::from("high"),
            },
            nameservers,
            contacts,
        })
    }

    pub fn with_years(mut self, years: u32) -> Self {
        self.years = Some(years);
        self
    }
}

/// Pagination for list routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub take: u32,
    pub skip: u32,
    pub order_by: Option<String>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            take: MAX_PAGE_SIZE,
            skip: 0,
            order_by: None,
        }
    }
}

impl Page {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.take == 0 || self.take > MAX_PAGE_SIZE {
            return Err(ValidationError::InvalidPageSize {
                value: self.take,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(())
    }

    fn query(&self) -> String {
        let mut query = format!("take={}&skip={}", self.take, self.skip);
        if let Some(order_by) = &self.order_by {
            query.push_str("&orderBy=");
            query.push_str(&urlencoding::encode(order_by));
        }
        query
    }
}

/// DNS record as the wire expects it: `{name, type, value, priority?, ttl?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDnsRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// A blank priority is omitted; anything else must parse as a number.
impl TryFrom<&DnsRecord> for WireDnsRecord {
    type Error = ValidationError;

    fn try_from(record: &DnsRecord) -> Result<Self, Self::Error> {
        let priority = match record.priority.trim() {
            "" => None,
            raw => Some(raw.parse().map_err(|_| ValidationError::InvalidPriority {
                value: raw.to_owned(),
            })?),
        };

        Ok(Self {
            name: record.hostname.clone(),
            record_type: record.record_type.clone(),
            value: record.address.clone(),
            priority,
            ttl: None,
        })
    }
}

/// A single registrar call with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationRequest {
    RegisterDomain {
        domain: DomainName,
        payload: RegistrationPayload,
    },
    TransferDomain {
        domain: DomainName,
        auth_code: Option<String>,
    },
    RenewDomain {
        domain: DomainName,
        years: Option<u32>,
    },
    GetDomainInfo {
        domain: DomainName,
    },
    SaveNameservers {
        domain: DomainName,
        update: NameserverUpdate,
    },
    GetDnsRecords {
        domain: DomainName,
        page: Page,
    },
    SaveDnsRecords {
        domain: DomainName,
        records: Vec<WireDnsRecord>,
    },
    DeleteDnsRecords {
        domain: DomainName,
        records: Vec<WireDnsRecord>,
    },
    SetDomainLock {
        domain: DomainName,
        locked: bool,
    },
    GetAuthCode {
        domain: DomainName,
    },
    GetContactDetails {
        contact_id: String,
    },
    SaveContactDetails {
        contact: ContactDetails,
    },
    GetContactAttributes {
        contact_id: String,
    },
    SaveContactAttributes {
        contact_id: String,
        attributes: Value,
    },
    CheckAvailability {
        domain: DomainName,
    },
    GetPricing {
        domain: DomainName,
    },
    GetDnssec {
        domain: DomainName,
    },
    UpdateDnssec {
        domain: DomainName,
        settings: Value,
    },
    ListTransfers {
        page: Page,
    },
}

impl OperationRequest {
    pub const fn operation(&self) -> Operation {
        match self {
            Self::RegisterDomain { .. } => Operation::RegisterDomain,
            Self::TransferDomain { .. } => Operation::TransferDomain,
            Self::RenewDomain { .. } => Operation::RenewDomain,
            Self::GetDomainInfo { .. } => Operation::GetDomainInfo,
            Self::SaveNameservers { .. } => Operation::SaveNameservers,
            Self::GetDnsRecords { .. } => Operation::GetDnsRecords,
            Self::SaveDnsRecords { .. } => Operation::SaveDnsRecords,
            Self::DeleteDnsRecords { .. } => Operation::DeleteDnsRecords,
            Self::SetDomainLock { .. } => Operation::SetDomainLock,
            Self::GetAuthCode { .. } => Operation::GetAuthCode,
            Self::GetContactDetails { .. } => Operation::GetContactDetails,
            Self::SaveContactDetails { .. } => Operation::SaveContactDetails,
            Self::GetContactAttributes { .. } => Operation::GetContactAttributes,
            Self::SaveContactAttributes { .. } => Operation::SaveContactAttributes,
            Self::CheckAvailability { .. } => Operation::CheckAvailability,
            Self::GetPricing { .. } => Operation::GetPricing,
            Self::GetDnssec { .. } => Operation::GetDnssec,
            Self::UpdateDnssec { .. } => Operation::UpdateDnssec,
            Self::ListTransfers { .. } => Operation::ListTransfers,
        }
    }

    /// Reject requests the registrar would only answer with a confusing error.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::RegisterDomain { payload, .. } => payload.nameservers.validate(),
            Self::TransferDomain { auth_code, .. } => {
                match auth_code.as_deref().map(str::trim) {
                    Some(code) if !code.is_empty() => Ok(()),
                    _ => Err(ValidationError::MissingParameter { name: "authCode" }),
                }
            }
            Self::RenewDomain { years, .. } => match years {
                None => Err(ValidationError::MissingParameter { name: "years" }),
                Some(value) if !(MIN_RENEWAL_YEARS..=MAX_RENEWAL_YEARS).contains(value) => {
                    Err(ValidationError::YearsOutOfRange {
                        value: *value,
                        min: MIN_RENEWAL_YEARS,
                        max: MAX_RENEWAL_YEARS,
                    })
                }
                Some(_) => Ok(()),
            },
            Self::SaveNameservers { update, .. } => update.validate(),
            Self::GetDnsRecords { page, .. } | Self::ListTransfers { page } => page.validate(),
            Self::SaveDnsRecords { records, .. } | Self::DeleteDnsRecords { records, .. } => {
                if records.is_empty() {
                    Err(ValidationError::EmptyRecordList)
                } else {
                    Ok(())
                }
            }
            Self::GetContactDetails { contact_id } | Self::GetContactAttributes { contact_id } => {
                validate_contact_id(contact_id)
            }
            Self::SaveContactAttributes {
                contact_id,
                attributes,
            } => {
                validate_contact_id(contact_id)?;
                match attributes.as_object() {
                    Some(map) if !map.is_empty() => Ok(()),
                    _ => Err(ValidationError::InvalidContactAttributes),
                }
            }
            Self::GetDomainInfo { .. }
            | Self::SetDomainLock { .. }
            | Self::GetAuthCode { .. }
            | Self::SaveContactDetails { .. }
            | Self::CheckAvailability { .. }
            | Self::GetPricing { .. }
            | Self::GetDnssec { .. }
            | Self::UpdateDnssec { .. } => Ok(()),
        }
    }

    pub fn route(&self) -> Route {
        let path = match self {
            Self::RegisterDomain { domain, .. } | Self::GetDomainInfo { domain } => {
                format!("domains/{domain}")
            }
            Self::TransferDomain { .. } => String::from("domains/transfer"),
            Self::RenewDomain { domain, .. } => format!("domains/{domain}/renew"),
            Self::SaveNameservers { domain, .. } => format!("domains/{domain}/nameservers"),
            Self::GetDnsRecords { domain, page } => {
                format!("dns/records/{domain}?{}", page.query())
            }
            Self::SaveDnsRecords { domain, .. } | Self::DeleteDnsRecords { domain, .. } => {
                format!("dns/records/{domain}")
            }
            Self::SetDomainLock { domain, .. } => format!("domains/{domain}/transfer/lock"),
            Self::GetAuthCode { domain } => format!("domains/{domain}/transfer/auth-code"),
            Self::GetContactDetails { contact_id } => {
                format!("contacts/{}", urlencoding::encode(contact_id.trim()))
            }
            Self::SaveContactDetails { .. } => String::from("contacts"),
            Self::GetContactAttributes { contact_id }
            | Self::SaveContactAttributes { contact_id, .. } => {
                format!("contacts/attributes/{}", urlencoding::encode(contact_id.trim()))
            }
            Self::CheckAvailability { domain } => format!("domains/{domain}/available"),
            Self::GetPricing { domain } => format!("domains/{domain}/pricing"),
            Self::GetDnssec { domain } | Self::UpdateDnssec { domain, .. } => {
                format!("domains/{domain}/dnssec")
            }
            Self::ListTransfers { page } => format!("domains/transfers?{}", page.query()),
        };

        Route {
            method: self.operation().method(),
            path,
        }
    }

    /// JSON body, if the route takes one.
    pub fn body(&self) -> Result<Option<Value>, serde_json::Error> {
        let body = match self {
            Self::RegisterDomain { payload, .. } => Some(serde_json::to_value(payload)?),
            Self::TransferDomain { domain, auth_code } => Some(json!({
                "domain": domain.as_str(),
                "authCode": auth_code.as_deref().map(str::trim),
            })),
            Self::RenewDomain { years, .. } => Some(json!({ "years": years })),
            Self::SaveNameservers { update, .. } => Some(serde_json::to_value(update)?),
            Self::SaveDnsRecords { records, .. } | Self::DeleteDnsRecords { records, .. } => {
                Some(serde_json::to_value(records)?)
            }
            Self::SetDomainLock { locked, .. } => Some(json!({ "isLocked": locked })),
            Self::SaveContactDetails { contact } => Some(serde_json::to_value(contact)?),
            Self::SaveContactAttributes { attributes, .. } => Some(attributes.clone()),
            Self::UpdateDnssec { settings, .. } => Some(settings.clone()),
            Self::GetDomainInfo { .. }
            | Self::GetDnsRecords { .. }
            | Self::GetAuthCode { .. }
            | Self::GetContactDetails { .. }
            | Self::GetContactAttributes { .. }
            | Self::CheckAvailability { .. }
            | Self::GetPricing { .. }
            | Self::GetDnssec { .. }
            | Self::ListTransfers { .. } => None,
        };
        Ok(body)
    }
}

fn validate_contact_id(contact_id: &str) -> Result<(), ValidationError> {
    if contact_id.trim().is_empty() {
        return Err(ValidationError::EmptyContactId);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> DomainName {
        DomainName::parse("example.com").expect("valid domain")
    }

    #[test]
    fn transfer_without_auth_code_is_rejected() {
        for auth_code in [None, Some(String::from("  "))] {
            let request = OperationRequest::TransferDomain {
                domain: domain(),
                auth_code,
            };
            let err = request.validate().expect_err("must fail");
            assert_eq!(err, ValidationError::MissingParameter { name: "authCode" });
        }
    }

    #[test]
    fn renew_requires_years_in_range() {
        let missing = OperationRequest::RenewDomain {
            domain: domain(),
            years: None,
        };
        assert_eq!(
            missing.validate(),
            Err(ValidationError::MissingParameter { name: "years" })
        );

        let too_long = OperationRequest::RenewDomain {
            domain: domain(),
            years: Some(11),
        };
        assert!(matches!(
            too_long.validate(),
            Err(ValidationError::YearsOutOfRange { value: 11, .. })
        ));
    }

    #[test]
    fn renew_routes_years_only_in_body() {
        let request = OperationRequest::RenewDomain {
            domain: domain(),
            years: Some(2),
        };
        let route = request.route();
        assert_eq!(route.method, HttpMethod::Put);
        assert_eq!(route.path, "domains/example.com/renew");
        assert_eq!(
            request.body().expect("serializable"),
            Some(json!({ "years": 2 }))
        );
    }

    #[test]
    fn nameserver_update_drops_blank_slots_and_caps_at_five() {
        let update = NameserverUpdate::custom(["NS1.Example.net", "", "ns2.example.net"])
            .expect("two hosts are valid");
        assert_eq!(update.hosts, vec!["ns1.example.net", "ns2.example.net"]);

        let err = NameserverUpdate::custom(["a", "b", "c", "d", "e", "f"]).expect_err("too many");
        assert!(matches!(err, ValidationError::NameserverCount { count: 6, .. }));

        let err = NameserverUpdate::custom(Vec::<String>::new()).expect_err("none");
        assert!(matches!(err, ValidationError::NameserverCount { count: 0, .. }));
    }

    #[test]
    fn registration_payload_fills_every_contact_role() {
        let payload = RegistrationPayload::new(&domain(), ["ns1.host.net"], "contact-9")
            .expect("valid payload");
        let body = serde_json::to_value(&payload).expect("serializable");

        assert_eq!(body["name"], "example.com");
        assert_eq!(body["autoRenew"], false);
        assert_eq!(body["privacyProtection"]["level"], "high");
        assert_eq!(body["nameservers"]["provider"], "custom");
        for role in ["registrant", "admin", "tech", "billing"] {
            assert_eq!(body["contacts"][role], "contact-9");
        }
        assert!(body.get("years").is_none());
    }

    #[test]
    fn registration_without_hosts_uses_registrar_dns() {
        let payload =
            RegistrationPayload::new(&domain(), ["", ""], "contact-9").expect("valid payload");
        assert_eq!(payload.nameservers, NameserverUpdate::basic());

        let err = RegistrationPayload::new(&domain(), ["ns1.host.net"], " ").expect_err("no contact");
        assert_eq!(err, ValidationError::EmptyContactId);
    }

    #[test]
    fn dns_listing_carries_pagination_query() {
        let request = OperationRequest::GetDnsRecords {
            domain: domain(),
            page: Page {
                take: 50,
                skip: 100,
                order_by: Some(String::from("name")),
            },
        };
        assert_eq!(
            request.route().path,
            "dns/records/example.com?take=50&skip=100&orderBy=name"
        );

        let invalid = OperationRequest::ListTransfers {
            page: Page {
                take: 0,
                ..Page::default()
            },
        };
        assert!(matches!(
            invalid.validate(),
            Err(ValidationError::InvalidPageSize { value: 0, .. })
        ));
    }

    #[test]
    fn lock_body_uses_is_locked_flag() {
        let request = OperationRequest::SetDomainLock {
            domain: domain(),
            locked: false,
        };
        assert_eq!(request.route().path, "domains/example.com/transfer/lock");
        assert_eq!(
            request.body().expect("serializable"),
            Some(json!({ "isLocked": false }))
        );
    }

    #[test]
    fn contact_ids_are_path_encoded() {
        let request = OperationRequest::GetContactDetails {
            contact_id: String::from("a/b c"),
        };
        assert_eq!(request.route().path, "contacts/a%2Fb%20c");
    }

    #[test]
    fn wire_records_map_host_field_names() {
        let record = DnsRecord {
            hostname: String::from("mail"),
            record_type: String::from("MX"),
            address: String::from("mx.example.net"),
            priority: String::from("10"),
        };
        let wire = WireDnsRecord::try_from(&record).expect("numeric priority");
        assert_eq!(wire.name, "mail");
        assert_eq!(wire.value, "mx.example.net");
        assert_eq!(wire.priority, Some(10));

        let blank = DnsRecord {
            priority: String::from("  "),
            ..record
        };
        assert_eq!(WireDnsRecord::try_from(&blank).map(|wire| wire.priority), Ok(None));
    }

    #[test]
    fn non_numeric_priority_is_rejected() {
        let record = DnsRecord {
            hostname: String::from("mail"),
            record_type: String::from("MX"),
            address: String::from("mx.example.net"),
            priority: String::from("high"),
        };
        assert_eq!(
            WireDnsRecord::try_from(&record),
            Err(ValidationError::InvalidPriority {
                value: String::from("high")
            })
        );
    }

    #[test]
    fn dns_upsert_body_is_the_record_list() {
        let request = OperationRequest::SaveDnsRecords {
            domain: domain(),
            records: vec![WireDnsRecord {
                name: String::from("www"),
                record_type: String::from("A"),
                value: String::from("1.2.3.4"),
                priority: None,
                ttl: None,
            }],
        };
        assert_eq!(
            request.body().expect("serializable"),
            Some(json!([{"name": "www", "type": "A", "value": "1.2.3.4"}]))
        );
    }
}
