//! # adsoap - SOAP 1.1 transport
//!
//! Shared transport core of the service bindings: envelope composition,
//! WS-Security `UsernameToken` headers, HTTP(S) execution and fault
//! extraction.
//!
//! ## Architecture
//!
//! - [`RequestEnvelope`] / [`ResponseEnvelope`] : enveloppes SOAP typées
//! - [`Security`] : en-tête WS-Security
//! - [`SoapClient`] : client HTTP bloquant, un appel = un aller-retour
//! - [`Fault`] : erreur SOAP renvoyée par le serveur
//!
//! ## Example
//!
//! ```no_run
//! use adsoap::{BasicAuth, Security, SoapClient, SoapElement};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize)]
//! struct Query {
//!     query: String,
//! }
//!
//! impl SoapElement for Query {
//!     fn element_name(&self) -> &str {
//!         "query"
//!     }
//!
//!     fn namespace(&self) -> Option<&str> {
//!         Some("https://adwords.google.com/api/adwords/cm/v201809")
//!     }
//! }
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct QueryResponse {
//!     #[serde(default)]
//!     rval: Vec<String>,
//! }
//!
//! let client = SoapClient::new(
//!     "https://adwords.google.com/api/adwords/cm/v201809/MediaService",
//!     false,
//!     Some(BasicAuth::new("login", "password")),
//! );
//! client.attach_header(Security::new("user", "secret", "1"));
//!
//! let mut response = QueryResponse::default();
//! client.call(
//!     "",
//!     &Query { query: "SELECT MediaId".to_string() },
//!     &mut response,
//! )?;
//! # Ok::<(), adsoap::SoapError>(())
//! ```

mod client;
pub mod config;
mod decoder;
mod envelope;
mod errors;
mod fault;
mod security;

pub use client::{BasicAuth, DEFAULT_DIAL_TIMEOUT, SoapClient, USER_AGENT};
pub use config::{ClientConfig, RequestHeaderConfig, SecurityConfig};
pub use decoder::{ResponseBody, ResponseEnvelope, decode_envelope, decode_envelope_with_header};
pub use envelope::{
    Header, HeaderElement, RequestEnvelope, SOAP_ENV_NS, SoapElement, XSI_NS, encode_envelope,
};
pub use errors::{SoapError, SoapErrorKind};
pub use fault::Fault;
pub use security::{PASSWORD_TEXT_TYPE, Password, Security, UsernameToken, WSSE_NS, WSU_NS};

/// TLS configuration accepted by [`SoapClient::with_tls_config`].
pub use ureq::tls::TlsConfig;
