//! SOAP Faults

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::errors::SoapError;

/// Erreur SOAP (Fault) renvoyée par le serveur
///
/// The `fault_string` doubles as the error message when the fault is
/// surfaced through [`SoapError::Fault`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{fault_string}")]
pub struct Fault {
    /// Code du fault (ex: "soap:Client", "soap:Server")
    pub fault_code: String,

    /// Description lisible de l'erreur
    pub fault_string: String,

    /// Acteur à l'origine du fault, souvent vide
    pub fault_actor: String,

    /// Contenu XML brut de l'élément `<detail>`
    pub detail: String,
}

impl Fault {
    pub fn new(fault_code: impl Into<String>, fault_string: impl Into<String>) -> Self {
        Self {
            fault_code: fault_code.into(),
            fault_string: fault_string.into(),
            ..Self::default()
        }
    }

    /// Decodes the first element of `<detail>` into `T`.
    ///
    /// Returns `Ok(None)` when the fault carries no detail.
    pub fn detail_as<T: DeserializeOwned>(&self) -> Result<Option<T>, SoapError> {
        let detail = self.detail.trim();
        if detail.is_empty() {
            return Ok(None);
        }
        Ok(Some(quick_xml::de::from_str(detail)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct ServiceDetail {
        #[serde(rename = "errorCode")]
        error_code: u32,
        message: String,
    }

    #[test]
    fn test_detail_as_decodes_first_element() {
        let fault = Fault {
            detail: r#"
                <ns1:ServiceFault xmlns:ns1="urn:test">
                  <ns1:errorCode>42</ns1:errorCode>
                  <ns1:message>quota</ns1:message>
                </ns1:ServiceFault>"#
                .to_string(),
            ..Fault::new("soap:Server", "boom")
        };

        let detail: ServiceDetail = fault.detail_as().unwrap().unwrap();
        assert_eq!(detail.error_code, 42);
        assert_eq!(detail.message, "quota");
    }

    #[test]
    fn test_detail_as_without_detail() {
        let fault = Fault::new("soap:Client", "bad input");
        let detail: Option<ServiceDetail> = fault.detail_as().unwrap();
        assert!(detail.is_none());
    }
}
