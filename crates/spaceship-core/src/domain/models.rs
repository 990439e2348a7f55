use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::UtcDateTime;

/// Upper bound of nameserver slots the registrar accepts.
pub const MAX_NAMESERVERS: usize = 5;

/// Ordered nameserver hosts. Slot `i` (0-based) is labelled `ns{i + 1}`.
///
/// Holds at most [`MAX_NAMESERVERS`] hosts, so slots run `ns1` to `ns5`.
/// Extra hosts are dropped with a warning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "NameserversRepr")]
pub struct Nameservers(Vec<String>);

/// Accepts both the wire list and the slot map this type serializes to.
#[derive(Deserialize)]
#[serde(untagged)]
enum NameserversRepr {
    List(Vec<String>),
    Slots(BTreeMap<String, String>),
}

impl From<NameserversRepr> for Nameservers {
    fn from(value: NameserversRepr) -> Self {
        match value {
            NameserversRepr::List(hosts) => Self::new(hosts),
            NameserversRepr::Slots(slots) => {
                let mut numbered: Vec<(usize, String)> = slots
                    .into_iter()
                    .filter_map(|(label, host)| {
                        let slot = label.strip_prefix("ns")?.parse().ok()?;
                        Some((slot, host))
                    })
                    .collect();
                numbered.sort_by_key(|(slot, _)| *slot);
                Self::new(numbered.into_iter().map(|(_, host)| host).collect())
            }
        }
    }
}

impl Nameservers {
    pub fn new(mut hosts: Vec<String>) -> Self {
        if hosts.len() > MAX_NAMESERVERS {
            log::warn!(
                "dropping {} nameserver host(s) beyond ns{MAX_NAMESERVERS}: {:?}",
                hosts.len() - MAX_NAMESERVERS,
                &hosts[MAX_NAMESERVERS..]
            );
            hosts.truncate(MAX_NAMESERVERS);
        }
        Self(hosts)
    }

    pub fn slot_label(index: usize) -> String {
        format!("ns{}", index + 1)
    }

    /// Host in 1-based `slot` (`ns1` is slot 1).
    pub fn get(&self, slot: usize) -> Option<&str> {
        slot.checked_sub(1)
            .and_then(|index| self.0.get(index))
            .map(String::as_str)
    }

    pub fn hosts(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(label, host)` pairs in slot order.
    pub fn slots(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(index, host)| (Self::slot_label(index), host.as_str()))
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.slots()
            .map(|(label, host)| (label, host.to_owned()))
            .collect()
    }
}

impl From<Vec<String>> for Nameservers {
    fn from(value: Vec<String>) -> Self {
        Self::new(value)
    }
}

impl Serialize for Nameservers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, host) in self.slots() {
            map.serialize_entry(&label, host)?;
        }
        map.end()
    }
}

/// Registrar lock state derived from the `clientTransferProhibited` EPP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockStatus {
    Locked,
    Unlocked,
}

impl LockStatus {
    pub const fn from_locked(locked: bool) -> Self {
        if locked {
            Self::Locked
        } else {
            Self::Unlocked
        }
    }

    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
        }
    }
}

impl Display for LockStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalised view of a registered domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub name: String,
    pub nameservers: Nameservers,
    pub registration_status: String,
    pub transfer_locked: bool,
    /// Absent when the registrar omitted the date or sent one that does not parse.
    pub expiry: Option<UtcDateTime>,
    pub restorable: bool,
    pub privacy_protected: bool,
    pub dns_managed: bool,
    pub email_forwarding: bool,
    pub contact_change_pending: bool,
    pub suspension_pending: bool,
}

impl DomainRecord {
    pub const fn lock_status(&self) -> LockStatus {
        LockStatus::from_locked(self.transfer_locked)
    }
}

/// Result of a periodic sync read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub active: bool,
    pub expired: bool,
    /// `YYYY-MM-DD`.
    pub expiry_date: String,
    pub nameservers: Nameservers,
    pub locked: bool,
}

/// DNS record in the host platform's field naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub hostname: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub address: String,
    /// Empty when the record type carries no priority.
    pub priority: String,
}

/// Availability answer for a single name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub domain: String,
    pub available: bool,
    /// Raw registrar verdict, e.g. `available`, `taken`, `reserved`.
    pub result: String,
    pub premium: bool,
}

/// Contact role on a domain registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactRole {
    Registrant,
    Admin,
    Tech,
    Billing,
}

impl ContactRole {
    pub const ALL: [Self; 4] = [Self::Registrant, Self::Admin, Self::Tech, Self::Billing];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registrant => "registrant",
            Self::Admin => "admin",
            Self::Tech => "tech",
            Self::Billing => "billing",
        }
    }
}

impl Display for ContactRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical contact. Missing wire fields are empty strings, never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub organization: String,
    pub email: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub country: String,
    pub state_province: String,
    pub postal_code: String,
    pub phone: String,
    pub phone_ext: String,
    pub fax: String,
    pub fax_ext: String,
    pub tax_number: String,
}

/// Host field labels paired with the host parameter aliases that may carry them.
const HOST_FIELDS: [(&str, &str); 15] = [
    ("First Name", "firstname"),
    ("Last Name", "lastname"),
    ("Company Name", "companyname"),
    ("Email", "email"),
    ("Address 1", "address1"),
    ("Address 2", "address2"),
    ("City", "city"),
    ("Country", "countrycode"),
    ("State", "state"),
    ("ZIP Code", "postcode"),
    ("Phone", "phonenumber"),
    ("Phone Ext", "phoneExt"),
    ("Fax", "fax"),
    ("Fax Ext", "faxExt"),
    ("Tax Number", "taxNumber"),
];

impl ContactDetails {
    fn fields(&self) -> [&String; 15] {
        [
            &self.first_name,
            &self.last_name,
            &self.organization,
            &self.email,
            &self.address1,
            &self.address2,
            &self.city,
            &self.country,
            &self.state_province,
            &self.postal_code,
            &self.phone,
            &self.phone_ext,
            &self.fax,
            &self.fax_ext,
            &self.tax_number,
        ]
    }

    fn fields_mut(&mut self) -> [&mut String; 15] {
        [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.organization,
            &mut self.email,
            &mut self.address1,
            &mut self.address2,
            &mut self.city,
            &mut self.country,
            &mut self.state_province,
            &mut self.postal_code,
            &mut self.phone,
            &mut self.phone_ext,
            &mut self.fax,
            &mut self.fax_ext,
            &mut self.tax_number,
        ]
    }

    /// Build from host parameters. The labelled field (`"First Name"`) wins
    /// over the short alias (`firstname`); anything missing becomes `""`.
    pub fn from_host_params(params: &BTreeMap<String, String>) -> Self {
        let mut contact = Self::default();
        for ((label, alias), slot) in HOST_FIELDS.iter().zip(contact.fields_mut()) {
            if let Some(value) = params.get(*label).or_else(|| params.get(*alias)) {
                *slot = value.clone();
            }
        }
        contact
    }

    /// Host-facing view keyed by the host's field labels.
    pub fn to_host_fields(&self) -> BTreeMap<String, String> {
        HOST_FIELDS
            .iter()
            .zip(self.fields())
            .map(|((label, _), value)| ((*label).to_owned(), value.clone()))
            .collect()
    }
}

/// Contacts for every role on a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSet {
    pub registrant: ContactDetails,
    pub admin: ContactDetails,
    pub tech: ContactDetails,
    pub billing: ContactDetails,
}

impl ContactSet {
    pub fn get(&self, role: ContactRole) -> &ContactDetails {
        match role {
            ContactRole::Registrant => &self.registrant,
            ContactRole::Admin => &self.admin,
            ContactRole::Tech => &self.tech,
            ContactRole::Billing => &self.billing,
        }
    }

    pub fn get_mut(&mut self, role: ContactRole) -> &mut ContactDetails {
        match role {
            ContactRole::Registrant => &mut self.registrant,
            ContactRole::Admin => &mut self.admin,
            ContactRole::Tech => &mut self.tech,
            ContactRole::Billing => &mut self.billing,
        }
    }
}
