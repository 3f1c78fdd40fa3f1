//! `ReportDefinitionService`: field catalogue of each report type.

use serde::{Deserialize, Serialize};

use crate::cm::CM_NAMESPACE;

soap_service! {
    /// Facade of `ReportDefinitionService`.
    pub struct ReportDefinitionService {
        path: "api/adwords/cm/v201809/ReportDefinitionService",
        namespace: CM_NAMESPACE,
    }

    /// Returns the fields available for a report type.
    fn get_report_fields(GetReportFields) -> GetReportFieldsResponse,
        with_header: get_report_fields_with_header;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetReportFields {
    pub report_type: ReportDefinitionReportType,
}

impl GetReportFields {
    pub fn new(report_type: ReportDefinitionReportType) -> Self {
        Self { report_type }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GetReportFieldsResponse {
    pub rval: Vec<ReportDefinitionField>,
}

impl GetReportFieldsResponse {
    pub fn field(&self, name: &str) -> Option<&ReportDefinitionField> {
        self.rval
            .iter()
            .find(|field| field.field_name.as_deref() == Some(name))
    }
}

soap_elements!(CM_NAMESPACE;
    GetReportFields => "getReportFields",
);

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportDefinitionField {
    pub field_name: Option<String>,
    pub display_field_name: Option<String>,
    pub xml_attribute_name: Option<String>,
    pub field_type: Option<String>,
    /// `ATTRIBUTE`, `METRIC` or `SEGMENT`
    pub field_behavior: Option<String>,
    pub enum_values: Vec<String>,
    pub can_select: Option<bool>,
    pub can_filter: Option<bool>,
    pub is_enum_type: Option<bool>,
    pub is_beta: Option<bool>,
    pub is_zero_row_compatible: Option<bool>,
    pub enum_value_pairs: Vec<EnumValuePair>,
    pub exclusive_fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnumValuePair {
    pub enum_value: Option<String>,
    pub enum_display_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportDefinitionReportType {
    KeywordsPerformanceReport,
    AdPerformanceReport,
    UrlPerformanceReport,
    AdgroupPerformanceReport,
    CampaignPerformanceReport,
    AccountPerformanceReport,
    GeoPerformanceReport,
    SearchQueryPerformanceReport,
    AutomaticPlacementsPerformanceReport,
    CampaignNegativeKeywordsPerformanceReport,
    CampaignNegativePlacementsPerformanceReport,
    SharedSetReport,
    CampaignSharedSetReport,
    SharedSetCriteriaReport,
    CreativeConversionReport,
    CallMetricsCallDetailsReport,
    KeywordlessQueryReport,
    KeywordlessCategoryReport,
    CriteriaPerformanceReport,
    ClickPerformanceReport,
    BudgetPerformanceReport,
    BidGoalPerformanceReport,
    DisplayKeywordPerformanceReport,
    PlaceholderFeedItemReport,
    PlacementPerformanceReport,
    CampaignLocationTargetReport,
    CampaignAdScheduleTargetReport,
    CampaignCriteriaReport,
    PaidOrganicQueryReport,
    AudiencePerformanceReport,
    DisplayTopicsPerformanceReport,
    UserAdDistanceReport,
    ShoppingPerformanceReport,
    ProductPartitionReport,
    GenderPerformanceReport,
    AgeRangePerformanceReport,
    LabelReport,
    FinalUrlReport,
    VideoPerformanceReport,
    TopContentPerformanceReport,
    PlaceholderReport,
    AdCustomizersFeedItemReport,
    LandingPageReport,
    MarketplacePerformanceReport,
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use adsoap::{decode_envelope, encode_envelope};

    #[test]
    fn test_request_shape() {
        let request = GetReportFields::new(ReportDefinitionReportType::CampaignPerformanceReport);
        let xml = String::from_utf8(encode_envelope(&[], &request).unwrap()).unwrap();

        assert!(xml.contains(
            r#"<getReportFields xmlns="https://adwords.google.com/api/adwords/cm/v201809"><reportType>CAMPAIGN_PERFORMANCE_REPORT</reportType></getReportFields>"#
        ));
    }

    #[test]
    fn test_decode_fields() {
        let xml = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <getReportFieldsResponse xmlns="https://adwords.google.com/api/adwords/cm/v201809">
      <rval>
        <fieldName>CampaignStatus</fieldName>
        <displayFieldName>Campaign state</displayFieldName>
        <xmlAttributeName>campaignState</xmlAttributeName>
        <fieldType>CampaignStatus</fieldType>
        <fieldBehavior>ATTRIBUTE</fieldBehavior>
        <enumValues>ENABLED</enumValues>
        <enumValues>PAUSED</enumValues>
        <canSelect>true</canSelect>
        <canFilter>true</canFilter>
        <isEnumType>true</isEnumType>
        <isBeta>false</isBeta>
        <enumValuePairs><enumValue>ENABLED</enumValue><enumDisplayValue>enabled</enumDisplayValue></enumValuePairs>
      </rval>
      <rval>
        <fieldName>Clicks</fieldName>
        <fieldBehavior>METRIC</fieldBehavior>
        <canSelect>true</canSelect>
      </rval>
    </getReportFieldsResponse>
  </soap:Body>
</soap:Envelope>"#;

        let mut response = GetReportFieldsResponse::default();
        decode_envelope(xml.as_bytes(), Some(&mut response)).unwrap();

        assert_eq!(response.rval.len(), 2);
        let status = response.field("CampaignStatus").unwrap();
        assert_eq!(status.enum_values, vec!["ENABLED", "PAUSED"]);
        assert_eq!(status.is_enum_type, Some(true));
        assert_eq!(status.enum_value_pairs[0].enum_display_value.as_deref(), Some("enabled"));
        assert!(response.field("Clicks").unwrap().enum_values.is_empty());
        assert!(response.field("Impressions").is_none());
    }
}
