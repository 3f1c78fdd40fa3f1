use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{info, warn};
use ureq::{Agent, tls::TlsConfig};

use crate::config::ClientConfig;
use crate::decoder::decode_envelope_with_header;
use crate::envelope::{HeaderElement, RequestEnvelope, SoapElement};
use crate::errors::SoapError;
use crate::security::Security;

pub const USER_AGENT: &str = "gowsdl/0.1";

/// Connect timeout applied when none is configured.
pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(30);

const CONTENT_TYPE: &str = r#"text/xml; charset="utf-8""#;

/// HTTP Basic credentials.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct BasicAuth {
    pub login: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    /// Value of the `Authorization` header.
    pub fn header_value(&self) -> String {
        let credentials = format!("{}:{}", self.login, self.password);
        format!("Basic {}", BASE64.encode(credentials))
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("login", &self.login)
            .field("password", &"***")
            .finish()
    }
}

/// Blocking SOAP 1.1 client bound to one service endpoint.
///
/// The URL and TLS configuration are fixed at construction. Headers are
/// append-only; each call sends a snapshot of the list taken when the call
/// starts, so attaching a header never affects a call already in flight.
///
/// Every call builds its own HTTP agent and sends `Connection: close`:
/// connections are never reused between calls.
pub struct SoapClient {
    url: String,
    tls: TlsConfig,
    auth: Option<BasicAuth>,
    dial_timeout: Duration,
    headers: RwLock<Vec<Arc<dyn HeaderElement>>>,
}

impl SoapClient {
    /// Creates a client whose TLS configuration only sets the
    /// skip-verification flag.
    pub fn new(url: impl Into<String>, insecure_skip_verify: bool, auth: Option<BasicAuth>) -> Self {
        let tls = TlsConfig::builder()
            .disable_verification(insecure_skip_verify)
            .build();
        Self::with_tls_config(url, tls, auth)
    }

    /// Creates a client with a complete TLS configuration.
    pub fn with_tls_config(url: impl Into<String>, tls: TlsConfig, auth: Option<BasicAuth>) -> Self {
        Self {
            url: url.into(),
            tls,
            auth,
            dial_timeout: DEFAULT_DIAL_TIMEOUT,
            headers: RwLock::new(Vec::new()),
        }
    }

    /// Creates a client for `url` from the shared configuration.
    ///
    /// The configured WS-Security credentials, if any, are attached as the
    /// first header.
    pub fn from_config(url: impl Into<String>, config: &ClientConfig) -> Self {
        let client = Self::new(url, config.insecure_skip_verify, config.auth.clone())
            .with_dial_timeout(config.dial_timeout());
        if let Some(security) = &config.security {
            client.attach_header(Security::new(
                &security.username,
                &security.password,
                &security.must_understand,
            ));
        }
        client
    }

    /// Replaces the connect timeout.
    pub fn with_dial_timeout(mut self, dial_timeout: Duration) -> Self {
        self.dial_timeout = dial_timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn dial_timeout(&self) -> Duration {
        self.dial_timeout
    }

    /// Appends a header sent with every subsequent call.
    pub fn attach_header<H>(&self, header: H)
    where
        H: HeaderElement + 'static,
    {
        self.headers.write().push(Arc::new(header));
    }

    /// Appends a header, exactly like [`attach_header`](Self::attach_header).
    ///
    /// Despite the name nothing is replaced.
    #[deprecated(note = "use attach_header; set_header appends and never replaces")]
    pub fn set_header<H>(&self, header: H)
    where
        H: HeaderElement + 'static,
    {
        self.attach_header(header);
    }

    /// Copy of the attached headers, in attachment order.
    pub fn headers(&self) -> Vec<Arc<dyn HeaderElement>> {
        self.headers.read().clone()
    }

    /// Sends `request` and decodes the reply into `response`.
    ///
    /// An empty HTTP body is a success and leaves `response` untouched. A
    /// SOAP fault is returned as [`SoapError::Fault`].
    pub fn call<Req, Resp>(&self, action: &str, request: &Req, response: &mut Resp) -> Result<(), SoapError>
    where
        Req: SoapElement + Serialize,
        Resp: DeserializeOwned,
    {
        self.exchange::<Req, Resp, ()>(action, request, response, None)
    }

    /// Like [`call`](Self::call), also decoding the first child of the
    /// response `<soap:Header>` into `header`.
    ///
    /// `header` is left untouched when the response carries no header.
    pub fn call_with_header<Req, Resp, H>(
        &self,
        action: &str,
        request: &Req,
        response: &mut Resp,
        header: &mut H,
    ) -> Result<(), SoapError>
    where
        Req: SoapElement + Serialize,
        Resp: DeserializeOwned,
        H: DeserializeOwned,
    {
        self.exchange(action, request, response, Some(header))
    }

    fn exchange<Req, Resp, H>(
        &self,
        action: &str,
        request: &Req,
        response: &mut Resp,
        header: Option<&mut H>,
    ) -> Result<(), SoapError>
    where
        Req: SoapElement + Serialize,
        Resp: DeserializeOwned,
        H: DeserializeOwned,
    {
        let envelope = RequestEnvelope::new(self.headers(), request);
        let payload = envelope.to_xml()?;

        info!(
            url = %self.url,
            action,
            request = %String::from_utf8_lossy(&payload),
            "SOAP request"
        );

        let agent: Agent = Agent::config_builder()
            .timeout_connect(Some(self.dial_timeout))
            .http_status_as_error(false)
            .tls_config(self.tls.clone())
            .build()
            .into();

        let mut http_request = agent
            .post(&self.url)
            .header("Content-Type", CONTENT_TYPE)
            .header("SOAPAction", action)
            .header("User-Agent", USER_AGENT)
            .header("Connection", "close");
        if let Some(auth) = &self.auth {
            http_request = http_request.header("Authorization", auth.header_value());
        }

        let mut http_response = http_request.send(&payload[..])?;
        let status = http_response.status();
        let raw = http_response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;

        if raw.is_empty() {
            info!(url = %self.url, %status, "SOAP response empty");
            return Ok(());
        }

        info!(
            url = %self.url,
            %status,
            bytes = raw.len(),
            response = %String::from_utf8_lossy(&raw),
            "SOAP response"
        );

        let fault = decode_envelope_with_header(&raw, header, Some(response))?;

        if let Some(fault) = fault {
            warn!(
                url = %self.url,
                code = %fault.fault_code,
                message = %fault.fault_string,
                "SOAP fault"
            );
            return Err(SoapError::Fault(fault));
        }

        Ok(())
    }
}

impl fmt::Debug for SoapClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoapClient")
            .field("url", &self.url)
            .field("auth", &self.auth)
            .field("dial_timeout", &self.dial_timeout)
            .field("headers", &self.headers.read().len())
            .finish_non_exhaustive()
    }
}
