//! WS-Security `UsernameToken` header

use rand::{Rng, distr::Alphanumeric};
use serde::Serialize;

use crate::envelope::SoapElement;

pub const WSSE_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";
pub const WSU_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-utility-1.0.xsd";
pub const PASSWORD_TEXT_TYPE: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordText";

const TOKEN_ID_PREFIX: &str = "UsernameToken-";
const TOKEN_ID_LEN: usize = 9;

/// `wsse:Security` header carrying a plaintext `UsernameToken`.
///
/// ```
/// use adsoap::Security;
///
/// let header = Security::new("user", "secret", "1");
/// assert!(header.username_token.id.starts_with("UsernameToken-"));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Security {
    #[serde(rename = "@xmlns:wsse")]
    xmlns_wsse: &'static str,

    #[serde(rename = "@soap:mustUnderstand", skip_serializing_if = "String::is_empty")]
    pub must_understand: String,

    #[serde(rename = "wsse:UsernameToken")]
    pub username_token: UsernameToken,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsernameToken {
    #[serde(rename = "@xmlns:wsu")]
    xmlns_wsu: &'static str,

    #[serde(rename = "@wsu:Id")]
    pub id: String,

    #[serde(rename = "wsse:Username")]
    pub username: String,

    #[serde(rename = "wsse:Password")]
    pub password: Password,
}

#[derive(Debug, Clone, Serialize)]
pub struct Password {
    #[serde(rename = "@Type")]
    pub kind: String,

    #[serde(rename = "$text")]
    pub value: String,
}

impl Security {
    /// Builds the header with a fresh token id.
    ///
    /// An empty `must_understand` omits the attribute. Never fails.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        must_understand: impl Into<String>,
    ) -> Self {
        Self {
            xmlns_wsse: WSSE_NS,
            must_understand: must_understand.into(),
            username_token: UsernameToken {
                xmlns_wsu: WSU_NS,
                id: token_id(),
                username: username.into(),
                password: Password {
                    kind: PASSWORD_TEXT_TYPE.to_string(),
                    value: password.into(),
                },
            },
        }
    }
}

impl SoapElement for Security {
    fn element_name(&self) -> &str {
        "wsse:Security"
    }
}

/// `UsernameToken-` followed by 9 random alphanumeric characters.
///
/// Uses the thread-local generator: not cryptographic, but seeded once per
/// thread so successive ids differ.
fn token_id() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_ID_LEN)
        .map(char::from)
        .collect();
    format!("{TOKEN_ID_PREFIX}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::encode_envelope;
    use crate::envelope::HeaderElement;
    use std::sync::Arc;

    #[derive(Debug, Serialize)]
    struct Ping {}

    impl SoapElement for Ping {
        fn element_name(&self) -> &str {
            "ping"
        }
    }

    fn extract_id(xml: &str) -> &str {
        let start = xml.find(r#"wsu:Id=""#).unwrap() + r#"wsu:Id=""#.len();
        let end = start + xml[start..].find('"').unwrap();
        &xml[start..end]
    }

    #[test]
    fn test_token_id_shape() {
        let id = token_id();
        let suffix = id.strip_prefix(TOKEN_ID_PREFIX).unwrap();
        assert_eq!(suffix.len(), TOKEN_ID_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_token_ids_vary() {
        let first = Security::new("u", "p", "1");
        let second = Security::new("u", "p", "1");
        assert_ne!(first.username_token.id, second.username_token.id);
    }

    #[test]
    fn test_security_header_xml() {
        let header: Arc<dyn HeaderElement> = Arc::new(Security::new("u", "p", "1"));
        let xml = String::from_utf8(encode_envelope(&[header], &Ping {}).unwrap()).unwrap();

        assert_eq!(xml.matches("<wsse:Security ").count(), 1);
        assert!(xml.contains(&format!(r#"xmlns:wsse="{WSSE_NS}""#)));
        assert!(xml.contains(r#"soap:mustUnderstand="1""#));
        assert!(xml.contains("<wsse:Username>u</wsse:Username>"));
        assert!(xml.contains(&format!(
            r#"<wsse:Password Type="{PASSWORD_TEXT_TYPE}">p</wsse:Password>"#
        )));

        let id = extract_id(&xml);
        let suffix = id.strip_prefix("UsernameToken-").unwrap();
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_empty_must_understand_is_omitted() {
        let header: Arc<dyn HeaderElement> = Arc::new(Security::new("u", "p", ""));
        let xml = String::from_utf8(encode_envelope(&[header], &Ping {}).unwrap()).unwrap();
        assert!(!xml.contains("mustUnderstand"));
    }
}
