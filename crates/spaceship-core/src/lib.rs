//! # Spaceship Core
//!
//! Registrar API client and response normalizer for Spaceship-backed domain
//! lifecycle workflows.
//!
//! ## Overview
//!
//! - **Typed operations** mapped to a fixed method and route each
//! - **Authenticated transport** with one network attempt per call
//! - **Response normalization** into a single [`Outcome`] contract
//! - **Domain projections** for lookups, nameservers, DNS records and contacts
//! - **Request log** gated by a debug flag, never carrying secrets
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Authenticated transport producing raw responses |
//! | [`config`] | Credentials, host settings and environment loading |
//! | [`domain`] | Domain models (DomainRecord, Nameservers, ContactDetails) |
//! | [`error`] | Validation and core error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`logging`] | Structured request log sinks |
//! | [`normalizer`] | Failure unwrap and payload projections |
//! | [`operation`] | Operation enum, route table and request bodies |
//! | [`outcome`] | Canonical result contract |
//! | [`registrar`] | Lifecycle workflows returning outcomes |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spaceship_core::{ClientConfig, Outcome, Registrar};
//!
//! #[tokio::main]
//! async fn main() {
//!     let registrar = Registrar::from_config(ClientConfig::from_env());
//!
//!     match registrar.domain_info("example.com").await {
//!         Outcome::Success(record) => println!("{} expires {:?}", record.name, record.expiry),
//!         failure => eprintln!("{}", failure.error_message().unwrap_or_default()),
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Host Platform  │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Registrar      │────▶│ Normalizer       │
//! │  (workflows)    │     │ (Outcome)        │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ SpaceshipClient │────▶│ HTTP Client      │
//! │ (RawResponse)   │     │ (reqwest/none)   │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Workflows never return `Err`. Every failure is one of three tiers:
//!
//! ```rust
//! use spaceship_core::Outcome;
//!
//! fn handle<T>(outcome: Outcome<T>) {
//!     match outcome {
//!         Outcome::Success(_) => {}
//!         Outcome::ValidationError(_) => {
//!             // Fix the input; nothing was sent
//!         }
//!         Outcome::BusinessError { .. } => {
//!             // Show the registrar's reason
//!         }
//!         Outcome::TransportError { .. } => {
//!             // Safe to try again later
//!         }
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - The API secret is redacted from `Debug` output and never logged
//! - Credentials are checked before each call; empty ones send nothing

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod logging;
pub mod normalizer;
pub mod operation;
pub mod outcome;
pub mod registrar;

// Client
pub use client::{RawResponse, SpaceshipClient};

// Configuration
pub use config::{ClientConfig, Credentials, HostSettings, DEFAULT_ENDPOINT};

// Domain models
pub use domain::{
    Availability, ContactDetails, ContactRole, ContactSet, DnsRecord, DomainName, DomainRecord,
    LockStatus, Nameservers, SyncStatus, UtcDateTime, MAX_NAMESERVERS,
};

// Error types
pub use error::{CoreError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};

// Request log
pub use logging::{FacadeSink, FileLogSink, JsonLinesSink, LogEvent, LogLevel, LogSink};

// Operations
pub use operation::{
    NameserverUpdate, Operation, OperationRequest, Page, RegistrationPayload, Route,
    WireDnsRecord,
};

// Outcomes
pub use outcome::{Outcome, OutcomeReport};

// Workflows
pub use registrar::{Registrar, CONTACTS_NOT_SUPPORTED, DNS_NOT_SUPPORTED};
