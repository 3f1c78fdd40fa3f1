use adservices::api_error::QuotaCheckErrorReason;
use adservices::location_criterion_service::{LocationCriterionService, Query};
use adservices::report_definition_service::{
    GetReportFields, ReportDefinitionReportType, ReportDefinitionService,
};
use adservices::traffic_estimator_service::{
    CampaignEstimateRequest, Get, KeywordEstimateRequest, KeywordMatchType,
    AdGroupEstimateRequest, TrafficEstimatorSelector, TrafficEstimatorService,
};
use adservices::{ApiError, ClientConfig, FaultExt, MediaService, SoapErrorKind};
use mockito::Matcher;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("adsoap=debug,adservices=debug")
        .with_test_writer()
        .try_init();
}

fn config(endpoint: &str, extra: &str) -> ClientConfig {
    let yaml = format!("endpoint: {endpoint}\n{extra}");
    ClientConfig::from_yaml_str(&yaml, std::iter::empty()).unwrap()
}

#[test]
fn query_location_criteria() {
    init_tracing();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/adwords/cm/v201809/LocationCriterionService")
        .match_header("content-type", r#"text/xml; charset="utf-8""#)
        .match_body(Matcher::Regex(
            r#"<soap:Body><query xmlns="https://adwords.google.com/api/adwords/cm/v201809"><query>SELECT Id, LocationName WHERE Id = 1006094</query></query></soap:Body>"#
                .to_string(),
        ))
        .with_status(200)
        .with_body(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <queryResponse xmlns="https://adwords.google.com/api/adwords/cm/v201809">
      <rval>
        <location><id>1006094</id><locationName>Paris</locationName><targetingStatus>ACTIVE</targetingStatus></location>
        <canonicalName>Paris,Ile-de-France,France</canonicalName>
      </rval>
    </queryResponse>
  </soap:Body>
</soap:Envelope>"#,
        )
        .create();

    let service = LocationCriterionService::new(
        format!("{}/{}", server.url(), LocationCriterionService::PATH),
        false,
        None,
    );
    let response = service
        .query(&Query::new("SELECT Id, LocationName WHERE Id = 1006094"))
        .unwrap();

    mock.assert();
    assert_eq!(response.rval.len(), 1);
    assert_eq!(
        response.rval[0].canonical_name.as_deref(),
        Some("Paris,Ile-de-France,France")
    );
}

#[test]
fn query_with_header_returns_response_header() {
    init_tracing();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/adwords/cm/v201809/LocationCriterionService")
        .with_status(200)
        .with_body(
            r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Header>
    <ResponseHeader xmlns="https://adwords.google.com/api/adwords/cm/v201809">
      <requestId>0005a3c1e2f0b8a8</requestId>
      <serviceName>LocationCriterionService</serviceName>
      <methodName>query</methodName>
      <operations>1</operations>
      <responseTime>212</responseTime>
    </ResponseHeader>
  </soap:Header>
  <soap:Body>
    <queryResponse xmlns="https://adwords.google.com/api/adwords/cm/v201809">
      <rval><canonicalName>Lyon,Auvergne-Rhone-Alpes,France</canonicalName></rval>
    </queryResponse>
  </soap:Body>
</soap:Envelope>"#,
        )
        .create();

    let service = LocationCriterionService::from_config(&config(&server.url(), ""));
    let (response, header) = service
        .query_with_header(&Query::new("SELECT Id WHERE LocationName = Lyon"))
        .unwrap();

    mock.assert();
    assert_eq!(response.rval.len(), 1);
    assert_eq!(header.request_id.as_deref(), Some("0005a3c1e2f0b8a8"));
    assert_eq!(header.method_name.as_deref(), Some("query"));
    assert_eq!(header.operations, Some(1));
    assert_eq!(header.response_time, Some(212));
}

#[test]
fn from_config_attaches_security_then_request_header() {
    init_tracing();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/adwords/o/v201809/TrafficEstimatorService")
        .match_header("authorization", "Basic TDpQ")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"<soap:Header><wsse:Security "#.to_string()),
            Matcher::Regex(r#"<wsse:Username>api-user</wsse:Username>"#.to_string()),
            Matcher::Regex(
                r#"</wsse:Security><RequestHeader xmlns="https://adwords.google.com/api/adwords/o/v201809"><clientCustomerId>123-456-7890</clientCustomerId><developerToken>dev-token</developerToken></RequestHeader></soap:Header>"#
                    .to_string(),
            ),
            Matcher::Regex(
                r#"<get xmlns="https://adwords.google.com/api/adwords/o/v201809"><selector>"#
                    .to_string(),
            ),
        ]))
        .with_status(200)
        .with_body(
            r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <getResponse xmlns="https://adwords.google.com/api/adwords/o/v201809">
      <rval><campaignEstimates><campaignId>7</campaignId></campaignEstimates></rval>
    </getResponse>
  </soap:Body>
</soap:Envelope>"#,
        )
        .create();

    let config = config(
        &server.url(),
        r#"
auth:
  login: L
  password: P
security:
  username: api-user
  password: secret
  must_understand: "1"
request_header:
  client_customer_id: "123-456-7890"
  developer_token: dev-token
"#,
    );
    let service = TrafficEstimatorService::from_config(&config);
    assert_eq!(service.client().headers().len(), 2);
    assert_eq!(
        service.client().url(),
        format!("{}/api/adwords/o/v201809/TrafficEstimatorService", server.url())
    );

    let request = Get {
        selector: TrafficEstimatorSelector {
            campaign_estimate_requests: vec![CampaignEstimateRequest {
                ad_group_estimate_requests: vec![AdGroupEstimateRequest {
                    keyword_estimate_requests: vec![KeywordEstimateRequest::new(
                        "mars cruise",
                        KeywordMatchType::Exact,
                    )],
                    ..AdGroupEstimateRequest::default()
                }],
                ..CampaignEstimateRequest::default()
            }],
            platform_estimate_requested: None,
        },
    };
    let response = service.get(&request).unwrap();

    mock.assert();
    assert_eq!(response.rval.unwrap().campaign_estimates[0].campaign_id, Some(7));
}

#[test]
fn fault_detail_decodes_api_exception() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/adwords/cm/v201809/ReportDefinitionService")
        .with_status(500)
        .with_body(
            r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Server</faultcode>
      <faultstring>[QuotaCheckError.QUOTA_EXCEEDED @ ]</faultstring>
      <detail>
        <ApiExceptionFault xmlns="https://adwords.google.com/api/adwords/cm/v201809">
          <message>[QuotaCheckError.QUOTA_EXCEEDED @ ]</message>
          <ApplicationException.Type>ApiException</ApplicationException.Type>
          <errors xmlns:ns2="https://adwords.google.com/api/adwords/cm/v201809" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:type="ns2:QuotaCheckError">
            <fieldPath></fieldPath>
            <errorString>QuotaCheckError.QUOTA_EXCEEDED</errorString>
            <ApiError.Type>QuotaCheckError</ApiError.Type>
            <reason>QUOTA_EXCEEDED</reason>
          </errors>
        </ApiExceptionFault>
      </detail>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#,
        )
        .create();

    let config = config(&server.url(), "");
    let service = ReportDefinitionService::from_config(&config);
    assert!(service.client().headers().is_empty());

    let err = service
        .get_report_fields(&GetReportFields::new(
            ReportDefinitionReportType::AccountPerformanceReport,
        ))
        .unwrap_err();

    assert_eq!(err.kind(), SoapErrorKind::RemoteFault);
    assert_eq!(err.to_string(), "[QuotaCheckError.QUOTA_EXCEEDED @ ]");

    let exception = err.fault().and_then(|fault| fault.api_exception()).unwrap();
    match &exception.errors[..] {
        [ApiError::Quota { base, reason }] => {
            assert_eq!(*reason, QuotaCheckErrorReason::QuotaExceeded);
            assert_eq!(
                base.error_string.as_deref(),
                Some("QuotaCheckError.QUOTA_EXCEEDED")
            );
        }
        other => panic!("unexpected errors {other:?}"),
    }
}

#[test]
fn empty_response_yields_default_record() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/adwords/cm/v201809/MediaService")
        .with_status(200)
        .create();

    let service = MediaService::from_config(&config(&server.url(), ""));
    let response = service
        .query(&adservices::media_service::Query::new("SELECT MediaId"))
        .unwrap();

    assert!(response.rval.is_none());
}

#[test]
#[allow(deprecated)]
fn set_header_appends_like_attach_header() {
    let service = MediaService::new("http://localhost/svc", false, None);
    let header = adservices::RequestHeader::new(MediaService::NAMESPACE);
    service.attach_header(header.clone());
    service.set_header(header);

    assert_eq!(service.client().headers().len(), 2);
}
