use quick_xml::errors::serialize::{DeError, SeError};
use thiserror::Error;

use crate::fault::Fault;

/// Errors raised by the SOAP transport.
///
/// Every failure short-circuits [`SoapClient::call`](crate::SoapClient::call);
/// nothing is retried locally.
#[derive(Error, Debug)]
pub enum SoapError {
    #[error("Content must be a pointer to a struct")]
    Misuse,

    #[error("failed to serialize SOAP envelope: {0}")]
    Serialize(#[from] SeError),

    #[error("failed to write SOAP envelope: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to re-read serialized element: {0}")]
    Replay(#[source] quick_xml::Error),

    #[error("HTTP request failed: {0}")]
    Network(#[from] ureq::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to decode SOAP payload: {0}")]
    Deserialize(#[from] DeError),

    #[error("malformed SOAP envelope: {0}")]
    Envelope(String),

    #[error("multiple elements inside SOAP body; not wrapped-document/literal WS-I compliant")]
    Protocol,

    #[error(transparent)]
    Fault(#[from] Fault),
}

/// Coarse classification of a [`SoapError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoapErrorKind {
    /// The response target was not bound before decoding.
    Misuse,
    /// The outgoing envelope could not be rendered.
    Serialize,
    /// Building the request, connecting or reading the response failed.
    Network,
    /// The returned document could not be parsed.
    Deserialize,
    /// More than one element inside the SOAP body.
    Protocol,
    /// The server answered with a SOAP fault.
    RemoteFault,
    /// Reserved: configuration problems are only reported by the HTTP layer,
    /// which surfaces them as network errors.
    TransportConfig,
}

impl SoapError {
    pub fn kind(&self) -> SoapErrorKind {
        match self {
            SoapError::Misuse => SoapErrorKind::Misuse,
            SoapError::Serialize(_) | SoapError::Write(_) | SoapError::Replay(_) => {
                SoapErrorKind::Serialize
            }
            SoapError::Network(_) => SoapErrorKind::Network,
            SoapError::Xml(_) | SoapError::Deserialize(_) | SoapError::Envelope(_) => {
                SoapErrorKind::Deserialize
            }
            SoapError::Protocol => SoapErrorKind::Protocol,
            SoapError::Fault(_) => SoapErrorKind::RemoteFault,
        }
    }

    /// The SOAP fault carried by this error, if the server returned one.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            SoapError::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    pub(crate) fn envelope(message: impl Into<String>) -> Self {
        SoapError::Envelope(message.into())
    }
}
