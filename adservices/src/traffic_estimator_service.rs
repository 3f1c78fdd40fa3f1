//! `TrafficEstimatorService`: traffic estimates for prospective keywords.

use serde::{Deserialize, Serialize};

use crate::cm::{CM_NAMESPACE, Money, O_NAMESPACE};

soap_service! {
    /// Facade of `TrafficEstimatorService`.
    pub struct TrafficEstimatorService {
        path: "api/adwords/o/v201809/TrafficEstimatorService",
        namespace: O_NAMESPACE,
    }

    /// Returns estimates for the campaigns, ad groups and keywords of the
    /// selector, nested the same way as the requests.
    fn get(Get) -> GetResponse, with_header: get_with_header;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Get {
    pub selector: TrafficEstimatorSelector,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GetResponse {
    pub rval: Option<TrafficEstimatorResult>,
}

soap_elements!(O_NAMESPACE;
    Get => "get",
);

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficEstimatorSelector {
    pub campaign_estimate_requests: Vec<CampaignEstimateRequest>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_estimate_requested: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignEstimateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<i64>,

    pub ad_group_estimate_requests: Vec<AdGroupEstimateRequest>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<Criterion>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_setting: Option<NetworkSetting>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_budget: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroupEstimateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_group_id: Option<i64>,

    pub keyword_estimate_requests: Vec<KeywordEstimateRequest>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cpc: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordEstimateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<Keyword>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cpc: Option<Money>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_negative: Option<bool>,
}

impl KeywordEstimateRequest {
    pub fn new(text: impl Into<String>, match_type: KeywordMatchType) -> Self {
        Self {
            keyword: Some(Keyword {
                text: text.into(),
                match_type,
            }),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Keyword {
    pub text: String,
    pub match_type: KeywordMatchType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeywordMatchType {
    #[default]
    Exact,
    Phrase,
    Broad,
}

/// Campaign-level targeting criterion, typed by `xsi:type`.
///
/// The concrete types live in the `cm` namespace, bound to the `cm` prefix
/// on the element itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Criterion {
    #[serde(rename = "@xmlns:cm")]
    cm_namespace: &'static str,

    #[serde(rename = "@xsi:type")]
    xsi_type: &'static str,

    pub id: i64,
}

impl Criterion {
    pub fn location(id: i64) -> Self {
        Self::typed("cm:Location", id)
    }

    pub fn language(id: i64) -> Self {
        Self::typed("cm:Language", id)
    }

    fn typed(xsi_type: &'static str, id: i64) -> Self {
        Self {
            cm_namespace: CM_NAMESPACE,
            xsi_type,
            id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSetting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_google_search: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_search_network: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_content_network: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_partner_search_network: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrafficEstimatorResult {
    pub campaign_estimates: Vec<CampaignEstimate>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CampaignEstimate {
    pub campaign_id: Option<i64>,
    pub ad_group_estimates: Vec<AdGroupEstimate>,
    pub platform_estimates: Vec<PlatformCampaignEstimate>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlatformCampaignEstimate {
    pub platform: Option<Platform>,
    pub min_estimate: Option<StatsEstimate>,
    pub max_estimate: Option<StatsEstimate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Platform {
    pub id: Option<i64>,
    #[serde(rename = "platformName")]
    pub platform_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdGroupEstimate {
    pub ad_group_id: Option<i64>,
    pub keyword_estimates: Vec<KeywordEstimate>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeywordEstimate {
    pub criterion_id: Option<i64>,
    pub min: Option<StatsEstimate>,
    pub max: Option<StatsEstimate>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsEstimate {
    pub average_cpc: Option<Money>,
    pub average_position: Option<f64>,
    pub click_through_rate: Option<f64>,
    pub clicks_per_day: Option<f32>,
    pub impressions_per_day: Option<f32>,
    pub total_cost: Option<Money>,
}
