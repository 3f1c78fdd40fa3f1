//! Records shared by every `cm` and `o` service.

use adsoap::{RequestHeaderConfig, SoapElement};
use serde::{Deserialize, Serialize};

/// Namespace of the campaign management services
pub const CM_NAMESPACE: &str = "https://adwords.google.com/api/adwords/cm/v201809";

/// Namespace of the optimization services
pub const O_NAMESPACE: &str = "https://adwords.google.com/api/adwords/o/v201809";

/// `RequestHeader` sent with every call.
///
/// The element lives in the namespace of the service it is attached to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestHeader {
    #[serde(skip)]
    namespace: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_customer_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_only: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_failure: Option<bool>,
}

impl RequestHeader {
    pub fn new(namespace: &'static str) -> Self {
        Self {
            namespace,
            ..Self::default()
        }
    }

    pub fn from_config(namespace: &'static str, config: &RequestHeaderConfig) -> Self {
        Self {
            namespace,
            client_customer_id: config.client_customer_id.clone(),
            developer_token: config.developer_token.clone(),
            user_agent: config.user_agent.clone(),
            validate_only: config.validate_only,
            partial_failure: config.partial_failure,
        }
    }
}

impl SoapElement for RequestHeader {
    fn element_name(&self) -> &str {
        "RequestHeader"
    }

    fn namespace(&self) -> Option<&str> {
        Some(self.namespace)
    }
}

/// `ResponseHeader` returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponseHeader {
    pub request_id: Option<String>,
    pub service_name: Option<String>,
    pub method_name: Option<String>,
    pub operations: Option<i64>,
    pub response_time: Option<i64>,
}

/// Generic selector used by `get` operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selector {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub predicates: Vec<Predicate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ordering: Vec<OrderBy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl Selector {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn with_paging(mut self, start_index: i32, number_results: i32) -> Self {
        self.paging = Some(Paging {
            start_index,
            number_results,
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Predicate {
    pub field: String,
    pub operator: PredicateOperator,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl Predicate {
    pub fn new<I, S>(field: impl Into<String>, operator: PredicateOperator, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            operator,
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredicateOperator {
    #[default]
    Equals,
    NotEquals,
    In,
    NotIn,
    GreaterThan,
    GreaterThanEquals,
    LessThan,
    LessThanEquals,
    StartsWith,
    StartsWithIgnoreCase,
    Contains,
    ContainsIgnoreCase,
    DoesNotContain,
    DoesNotContainIgnoreCase,
    ContainsAny,
    ContainsAll,
    ContainsNone,
    Unknown,
}

/// Inclusive date range, dates formatted `YYYYMMDD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderBy {
    pub field: String,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Paging {
    pub start_index: i32,
    pub number_results: i32,
}

/// Operator of a mutate operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    #[default]
    Add,
    Remove,
    Set,
}

/// Amount in micros of the account currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Money {
    pub micro_amount: i64,
}

impl Money {
    pub fn from_micros(micro_amount: i64) -> Self {
        Self { micro_amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adsoap::{decode_envelope_with_header, encode_envelope};

    #[derive(Debug, Serialize)]
    struct Get {
        selector: Selector,
    }

    impl SoapElement for Get {
        fn element_name(&self) -> &str {
            "get"
        }
    }

    #[test]
    fn test_selector_serialization() {
        let selector = Selector::new(["Id", "Name"])
            .with_predicate(Predicate::new("Id", PredicateOperator::In, ["1", "2"]))
            .with_paging(0, 100);
        let xml = String::from_utf8(encode_envelope(&[], &Get { selector }).unwrap()).unwrap();

        assert!(xml.contains("<fields>Id</fields><fields>Name</fields>"));
        assert!(xml.contains(
            "<predicates><field>Id</field><operator>IN</operator><values>1</values><values>2</values></predicates>"
        ));
        assert!(xml.contains("<paging><startIndex>0</startIndex><numberResults>100</numberResults></paging>"));
        assert!(!xml.contains("dateRange"));
    }

    #[test]
    fn test_request_header_from_config() {
        let config = RequestHeaderConfig {
            client_customer_id: Some("123-456-7890".to_string()),
            developer_token: Some("token".to_string()),
            ..RequestHeaderConfig::default()
        };
        let header = RequestHeader::from_config(O_NAMESPACE, &config);

        assert_eq!(header.namespace(), Some(O_NAMESPACE));
        assert_eq!(header.client_customer_id.as_deref(), Some("123-456-7890"));
        assert!(header.validate_only.is_none());
    }

    #[test]
    fn test_decode_response_header() {
        #[derive(Debug, Default, Deserialize)]
        #[serde(default)]
        struct MutateResponse {
            rval: Option<String>,
        }

        let xml = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Header>
    <ResponseHeader xmlns="https://adwords.google.com/api/adwords/cm/v201809">
      <requestId>0005a3c1e2f0b8a8</requestId>
      <serviceName>OfflineConversionFeedService</serviceName>
      <methodName>mutate</methodName>
      <operations>2</operations>
      <responseTime>187</responseTime>
    </ResponseHeader>
  </soap:Header>
  <soap:Body>
    <mutateResponse xmlns="https://adwords.google.com/api/adwords/cm/v201809"><rval>ok</rval></mutateResponse>
  </soap:Body>
</soap:Envelope>"#;

        let mut header = ResponseHeader::default();
        let mut response = MutateResponse::default();
        let fault =
            decode_envelope_with_header(xml.as_bytes(), Some(&mut header), Some(&mut response)).unwrap();

        assert!(fault.is_none());
        assert_eq!(response.rval.as_deref(), Some("ok"));
        assert_eq!(
            header,
            ResponseHeader {
                request_id: Some("0005a3c1e2f0b8a8".to_string()),
                service_name: Some("OfflineConversionFeedService".to_string()),
                method_name: Some("mutate".to_string()),
                operations: Some(2),
                response_time: Some(187),
            }
        );
    }
}
