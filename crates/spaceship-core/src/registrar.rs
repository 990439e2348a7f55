//! Domain lifecycle workflows.
//!
//! [`Registrar`] is the surface a host platform calls. Every method returns an
//! [`Outcome`]; nothing here returns `Err` or panics for an expected failure.
//! Each method is one request/normalize cycle except the two compound
//! workflows, [`Registrar::save_registrar_lock`] and [`Registrar::contacts`],
//! which stop at the first failing step and report it as the whole result.

use serde_json::Value;

use crate::client::SpaceshipClient;
use crate::domain::{
    Availability, ContactDetails, ContactRole, ContactSet, DnsRecord, DomainName, DomainRecord,
    LockStatus, Nameservers, SyncStatus,
};
use crate::normalizer;
use crate::operation::{NameserverUpdate, OperationRequest, Page, RegistrationPayload, WireDnsRecord};
use crate::{ClientConfig, Outcome, UtcDateTime, ValidationError};

pub const DNS_NOT_SUPPORTED: &str = "DNS Management not yet supported";
pub const CONTACTS_NOT_SUPPORTED: &str = "Contact Details Management not yet supported";

#[derive(Clone)]
pub struct Registrar {
    client: SpaceshipClient,
}

impl Registrar {
    pub fn new(client: SpaceshipClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::new(SpaceshipClient::new(config))
    }

    pub fn client(&self) -> &SpaceshipClient {
        &self.client
    }

    /// Register with the configured contact id in every role.
    pub async fn register_domain(
        &self,
        domain: &str,
        nameservers: &[String],
        years: Option<u32>,
    ) -> Outcome<Value> {
        let request = DomainName::parse(domain).and_then(|domain| {
            let contact_id = self
                .client
                .config()
                .contact_id
                .as_deref()
                .ok_or(ValidationError::EmptyContactId)?;
            let mut payload = RegistrationPayload::new(&domain, nameservers, contact_id)?;
            if let Some(years) = years {
                payload = payload.with_years(years);
            }
            Ok(OperationRequest::RegisterDomain { domain, payload })
        });
        self.execute(request, |body| Ok(body.clone())).await
    }

    pub async fn transfer_domain(&self, domain: &str, auth_code: Option<&str>) -> Outcome<Value> {
        let request = DomainName::parse(domain).map(|domain| OperationRequest::TransferDomain {
            domain,
            auth_code: auth_code.map(str::to_owned),
        });
        self.execute(request, |body| Ok(body.clone())).await
    }

    pub async fn renew_domain(&self, domain: &str, years: Option<u32>) -> Outcome<Value> {
        let request =
            DomainName::parse(domain).map(|domain| OperationRequest::RenewDomain { domain, years });
        self.execute(request, |body| Ok(body.clone())).await
    }

    pub async fn domain_info(&self, domain: &str) -> Outcome<DomainRecord> {
        self.execute(get_domain_info(domain), |body| Ok(normalizer::domain_record(body)))
            .await
    }

    pub async fn nameservers(&self, domain: &str) -> Outcome<Nameservers> {
        self.domain_info(domain).await.map(|record| record.nameservers)
    }

    /// Delegate to 1..=5 custom hosts. Returns the hosts the registrar echoes back.
    pub async fn save_nameservers(&self, domain: &str, hosts: &[String]) -> Outcome<Nameservers> {
        let request = DomainName::parse(domain).and_then(|domain| {
            Ok(OperationRequest::SaveNameservers {
                domain,
                update: NameserverUpdate::custom(hosts)?,
            })
        });
        self.execute(request, |body| Ok(normalizer::hosts(body))).await
    }

    pub async fn dns_records(&self, domain: &str, page: Page) -> Outcome<Vec<DnsRecord>> {
        let request =
            DomainName::parse(domain).map(|domain| OperationRequest::GetDnsRecords { domain, page });
        self.execute(request, |body| Ok(normalizer::dns_records(body))).await
    }

    /// Host-facing DNS save. Record editing is not offered through the host.
    pub async fn save_dns(&self, _domain: &str, _records: &[DnsRecord]) -> Outcome<()> {
        self.unsupported(DNS_NOT_SUPPORTED)
    }

    /// Upsert records directly against the registrar.
    pub async fn put_dns_records(&self, domain: &str, records: &[DnsRecord]) -> Outcome<Value> {
        let request = DomainName::parse(domain).and_then(|domain| {
            Ok(OperationRequest::SaveDnsRecords {
                domain,
                records: wire_records(records)?,
            })
        });
        self.execute(request, |body| Ok(body.clone())).await
    }

    pub async fn delete_dns_records(&self, domain: &str, records: &[DnsRecord]) -> Outcome<Value> {
        let request = DomainName::parse(domain).and_then(|domain| {
            Ok(OperationRequest::DeleteDnsRecords {
                domain,
                records: wire_records(records)?,
            })
        });
        self.execute(request, |body| Ok(body.clone())).await
    }

    pub async fn registrar_lock(&self, domain: &str) -> Outcome<LockStatus> {
        self.execute(get_domain_info(domain), |body| Ok(normalizer::lock_status(body)))
            .await
    }

    pub async fn set_domain_lock(&self, domain: &str, locked: bool) -> Outcome<()> {
        let request =
            DomainName::parse(domain).map(|domain| OperationRequest::SetDomainLock { domain, locked });
        self.execute(request, |_| Ok(())).await
    }

    /// Invert the current lock. Returns the state now in effect. A failed
    /// read sends nothing; a failed write discards the read.
    pub async fn save_registrar_lock(&self, domain: &str) -> Outcome<LockStatus> {
        let current = match self.registrar_lock(domain).await.branch() {
            Ok(status) => status,
            Err(failure) => return failure,
        };
        let target = LockStatus::from_locked(!current.is_locked());
        self.set_domain_lock(domain, target.is_locked())
            .await
            .map(|()| target)
    }

    pub async fn epp_code(&self, domain: &str) -> Outcome<String> {
        let request = DomainName::parse(domain).map(|domain| OperationRequest::GetAuthCode { domain });
        self.execute(request, normalizer::auth_code).await
    }

    pub async fn contact(&self, contact_id: &str) -> Outcome<ContactDetails> {
        let request = OperationRequest::GetContactDetails {
            contact_id: contact_id.to_owned(),
        };
        self.execute(Ok(request), |body| Ok(normalizer::contact_details(body)))
            .await
    }

    /// Contacts for all four roles: one domain lookup, then one fetch per role.
    pub async fn contacts(&self, domain: &str) -> Outcome<ContactSet> {
        let ids = match self.execute(get_domain_info(domain), role_contact_ids).await.branch() {
            Ok(ids) => ids,
            Err(failure) => return failure,
        };

        let mut contacts = ContactSet::default();
        for (role, id) in ContactRole::ALL.into_iter().zip(&ids) {
            match self.contact(id).await.branch() {
                Ok(contact) => *contacts.get_mut(role) = contact,
                Err(failure) => return failure,
            }
        }
        Outcome::Success(contacts)
    }

    /// Host-facing contact read. Not offered through the host.
    pub async fn get_contact_details(&self, _domain: &str) -> Outcome<ContactSet> {
        self.unsupported(CONTACTS_NOT_SUPPORTED)
    }

    /// Host-facing contact save. Not offered through the host.
    pub async fn save_contact_details(
        &self,
        _domain: &str,
        _contacts: &ContactSet,
    ) -> Outcome<()> {
        self.unsupported(CONTACTS_NOT_SUPPORTED)
    }

    /// Create or update a contact. The payload is the registrar's reply,
    /// normally `{contactId}`.
    pub async fn put_contact(&self, contact: &ContactDetails) -> Outcome<Value> {
        let request = OperationRequest::SaveContactDetails {
            contact: contact.clone(),
        };
        self.execute(Ok(request), |body| Ok(body.clone())).await
    }

    pub async fn contact_attributes(&self, contact_id: &str) -> Outcome<Value> {
        let request = OperationRequest::GetContactAttributes {
            contact_id: contact_id.to_owned(),
        };
        self.execute(Ok(request), |body| Ok(body.clone())).await
    }

    pub async fn save_contact_attributes(
        &self,
        contact_id: &str,
        attributes: Value,
    ) -> Outcome<Value> {
        let request = OperationRequest::SaveContactAttributes {
            contact_id: contact_id.to_owned(),
            attributes,
        };
        self.execute(Ok(request), |body| Ok(body.clone())).await
    }

    pub async fn check_availability(&self, domain: &str) -> Outcome<Availability> {
        let request =
            DomainName::parse(domain).map(|domain| OperationRequest::CheckAvailability { domain });
        let name = domain.trim().to_ascii_lowercase();
        self.execute(request, move |body| Ok(normalizer::availability(body, &name)))
            .await
    }

    pub async fn pricing(&self, domain: &str) -> Outcome<Value> {
        let request = DomainName::parse(domain).map(|domain| OperationRequest::GetPricing { domain });
        self.execute(request, |body| Ok(body.clone())).await
    }

    pub async fn dnssec(&self, domain: &str) -> Outcome<Value> {
        let request = DomainName::parse(domain).map(|domain| OperationRequest::GetDnssec { domain });
        self.execute(request, |body| Ok(body.clone())).await
    }

    pub async fn update_dnssec(&self, domain: &str, settings: Value) -> Outcome<Value> {
        let request = DomainName::parse(domain)
            .map(|domain| OperationRequest::UpdateDnssec { domain, settings });
        self.execute(request, |body| Ok(body.clone())).await
    }

    pub async fn list_transfers(&self, page: Page) -> Outcome<Value> {
        self.execute(Ok(OperationRequest::ListTransfers { page }), |body| {
            Ok(body.clone())
        })
        .await
    }

    pub async fn sync(&self, domain: &str) -> Outcome<SyncStatus> {
        self.sync_at(domain, UtcDateTime::now()).await
    }

    /// Sync against an explicit clock. An unreadable expiry fails the call.
    pub async fn sync_at(&self, domain: &str, now: UtcDateTime) -> Outcome<SyncStatus> {
        self.execute(get_domain_info(domain), move |body| {
            normalizer::sync_status(body, now).map_err(|error| format!("sync: {error}"))
        })
        .await
    }

    async fn execute<T>(
        &self,
        request: Result<OperationRequest, ValidationError>,
        project: impl FnOnce(&Value) -> Result<T, String> + Send,
    ) -> Outcome<T> {
        let request = match request {
            Ok(request) => request,
            Err(error) => return Outcome::ValidationError(error),
        };
        match self.client.send(&request).await {
            Ok(raw) => normalizer::normalize_with(raw, project),
            Err(error) => Outcome::ValidationError(error),
        }
    }

    fn unsupported<T>(&self, detail: &str) -> Outcome<T> {
        match self.client.config().credentials.validate() {
            Ok(()) => Outcome::business(detail),
            Err(error) => Outcome::ValidationError(error),
        }
    }
}

fn get_domain_info(domain: &str) -> Result<OperationRequest, ValidationError> {
    DomainName::parse(domain).map(|domain| OperationRequest::GetDomainInfo { domain })
}

fn wire_records(records: &[DnsRecord]) -> Result<Vec<WireDnsRecord>, ValidationError> {
    records.iter().map(WireDnsRecord::try_from).collect()
}

/// Contact ids keyed by role, in [`ContactRole::ALL`] order.
fn role_contact_ids(body: &Value) -> Result<Vec<String>, String> {
    ContactRole::ALL
        .iter()
        .map(|role| {
            body.pointer(&format!("/contacts/{role}"))
                .and_then(Value::as_str)
                .filter(|id| !id.trim().is_empty())
                .map(str::to_owned)
                .ok_or_else(|| format!("get_domain_info: response has no {role} contact"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{Credentials, NoopHttpClient};

    fn registrar(config: ClientConfig) -> Registrar {
        Registrar::new(SpaceshipClient::with_http_client(
            config,
            Arc::new(NoopHttpClient),
        ))
    }

    fn configured() -> ClientConfig {
        ClientConfig::new(Credentials::new("key", "secret", "https://registrar.test/api/v1"))
    }

    #[tokio::test]
    async fn host_stubs_answer_with_fixed_business_errors() {
        let registrar = registrar(configured());

        assert_eq!(
            registrar.save_dns("example.com", &[]).await,
            Outcome::business(DNS_NOT_SUPPORTED)
        );
        assert_eq!(
            registrar.get_contact_details("example.com").await,
            Outcome::business(CONTACTS_NOT_SUPPORTED)
        );
    }

    #[tokio::test]
    async fn stubs_still_demand_credentials() {
        let registrar = registrar(ClientConfig::new(Credentials::new("", "", "")));

        assert!(matches!(
            registrar.save_dns("example.com", &[]).await,
            Outcome::ValidationError(ValidationError::MissingCredential { field: "api_key" })
        ));
    }

    #[tokio::test]
    async fn registration_requires_configured_contact() {
        let registrar = registrar(configured());
        let outcome = registrar
            .register_domain("example.com", &[String::from("ns1.host.net")], Some(1))
            .await;

        assert_eq!(outcome, Outcome::ValidationError(ValidationError::EmptyContactId));
    }

    #[test]
    fn role_ids_require_all_four_roles() {
        let body = serde_json::json!({
            "contacts": {"registrant": "r", "admin": "a", "tech": "t", "billing": "b"}
        });
        assert_eq!(
            role_contact_ids(&body),
            Ok(vec![
                String::from("r"),
                String::from("a"),
                String::from("t"),
                String::from("b")
            ])
        );

        let partial = serde_json::json!({"contacts": {"registrant": "r"}});
        assert_eq!(
            role_contact_ids(&partial),
            Err(String::from("get_domain_info: response has no admin contact"))
        );
    }
}
