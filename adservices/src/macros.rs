/// Declares a service facade over [`adsoap::SoapClient`].
///
/// Every operation sends its request record with an empty `SOAPAction` and
/// decodes the reply into a freshly defaulted response record. Its
/// `with_header` twin also returns the reply's `ResponseHeader`.
macro_rules! soap_service {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            path: $path:literal,
            namespace: $ns:expr,
        }

        $(
            $(#[$op_meta:meta])*
            fn $op:ident($req:ty) -> $resp:ty, with_header: $op_with_header:ident;
        )+
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            client: adsoap::SoapClient,
        }

        impl $name {
            /// Path of the service, relative to the API host.
            pub const PATH: &'static str = $path;

            /// Namespace of the request and response records.
            pub const NAMESPACE: &'static str = $ns;

            pub fn new(
                url: impl Into<String>,
                insecure_skip_verify: bool,
                auth: Option<adsoap::BasicAuth>,
            ) -> Self {
                Self::from_client(adsoap::SoapClient::new(url, insecure_skip_verify, auth))
            }

            pub fn with_tls_config(
                url: impl Into<String>,
                tls: adsoap::TlsConfig,
                auth: Option<adsoap::BasicAuth>,
            ) -> Self {
                Self::from_client(adsoap::SoapClient::with_tls_config(url, tls, auth))
            }

            pub fn from_client(client: adsoap::SoapClient) -> Self {
                Self { client }
            }

            /// Builds the facade from the shared configuration.
            ///
            /// Headers are attached in order: WS-Security first, then the
            /// configured `RequestHeader`.
            pub fn from_config(config: &adsoap::ClientConfig) -> Self {
                let client = adsoap::SoapClient::from_config(config.service_url(Self::PATH), config);
                if let Some(header) = &config.request_header {
                    client.attach_header($crate::cm::RequestHeader::from_config(Self::NAMESPACE, header));
                }
                tracing::debug!(service = stringify!($name), url = %client.url(), "service client ready");
                Self::from_client(client)
            }

            pub fn client(&self) -> &adsoap::SoapClient {
                &self.client
            }

            pub fn attach_header<H>(&self, header: H)
            where
                H: adsoap::HeaderElement + 'static,
            {
                self.client.attach_header(header);
            }

            #[deprecated(note = "use attach_header; set_header appends and never replaces")]
            pub fn set_header<H>(&self, header: H)
            where
                H: adsoap::HeaderElement + 'static,
            {
                self.client.attach_header(header);
            }

            $(
                $(#[$op_meta])*
                pub fn $op(&self, request: &$req) -> Result<$resp, adsoap::SoapError> {
                    let mut response = <$resp>::default();
                    self.client.call("", request, &mut response)?;
                    Ok(response)
                }

                #[doc = concat!(
                    "Same as [`", stringify!($op), "`](Self::", stringify!($op),
                    "), also returning the `ResponseHeader` of the reply."
                )]
                pub fn $op_with_header(
                    &self,
                    request: &$req,
                ) -> Result<($resp, $crate::cm::ResponseHeader), adsoap::SoapError> {
                    let mut response = <$resp>::default();
                    let mut header = $crate::cm::ResponseHeader::default();
                    self.client
                        .call_with_header("", request, &mut response, &mut header)?;
                    Ok((response, header))
                }
            )+
        }
    };
}

/// Implements [`adsoap::SoapElement`] for operation records of one namespace.
macro_rules! soap_elements {
    ($ns:expr; $($ty:ty => $element:literal),+ $(,)?) => {
        $(
            impl adsoap::SoapElement for $ty {
                fn element_name(&self) -> &str {
                    $element
                }

                fn namespace(&self) -> Option<&str> {
                    Some($ns)
                }
            }
        )+
    };
}
