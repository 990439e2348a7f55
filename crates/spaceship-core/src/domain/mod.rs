//! # Domain Models
//!
//! Canonical types handed back to registrar workflows.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DomainName`] | Validated, lower-cased FQDN |
//! | [`DomainRecord`] | Projection of a domain lookup |
//! | [`Nameservers`] | Ordered hosts with `ns1..ns5` slot labels |
//! | [`LockStatus`] | `locked` / `unlocked` |
//! | [`SyncStatus`] | Active/expired verdict for periodic sync |
//! | [`DnsRecord`] | DNS record in host field naming |
//! | [`ContactDetails`] | Contact with every field present |
//! | [`ContactSet`] | Contacts for all four roles |
//! | [`Availability`] | Availability verdict |
//! | [`UtcDateTime`] | UTC timestamp with lenient parsing |

mod models;
mod name;
mod timestamp;

pub use models::{
    Availability, ContactDetails, ContactRole, ContactSet, DnsRecord, DomainRecord, LockStatus,
    Nameservers, SyncStatus, MAX_NAMESERVERS,
};
pub use name::DomainName;
pub use timestamp::UtcDateTime;
