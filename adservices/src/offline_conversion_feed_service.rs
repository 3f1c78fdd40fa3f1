//! `OfflineConversionFeedService`: upload of conversions tracked outside the
//! platform, keyed by click id.

use serde::{Deserialize, Serialize};

use crate::api_error::ApiError;
use crate::cm::{CM_NAMESPACE, Operator};

soap_service! {
    /// Facade of `OfflineConversionFeedService`.
    pub struct OfflineConversionFeedService {
        path: "api/adwords/cm/v201809/OfflineConversionFeedService",
        namespace: CM_NAMESPACE,
    }

    /// Applies the operations. With `partialFailure` set in the
    /// `RequestHeader`, failed operations are reported in
    /// `partial_failure_errors` instead of failing the whole call.
    fn mutate(Mutate) -> MutateResponse, with_header: mutate_with_header;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Mutate {
    pub operations: Vec<OfflineConversionFeedOperation>,
}

impl Mutate {
    /// One `ADD` operation per feed entry.
    pub fn add(feeds: impl IntoIterator<Item = OfflineConversionFeed>) -> Self {
        Self {
            operations: feeds
                .into_iter()
                .map(|operand| OfflineConversionFeedOperation {
                    operator: Operator::Add,
                    operand,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MutateResponse {
    pub rval: Option<OfflineConversionFeedReturnValue>,
}

soap_elements!(CM_NAMESPACE;
    Mutate => "mutate",
);

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OfflineConversionFeedOperation {
    pub operator: Operator,
    pub operand: OfflineConversionFeed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OfflineConversionFeed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_click_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_name: Option<String>,

    /// `yyyyMMdd HHmmss tz`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_value: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_currency_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_attribution_credit: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_attribution_model: Option<String>,
}

impl OfflineConversionFeed {
    pub fn new(
        google_click_id: impl Into<String>,
        conversion_name: impl Into<String>,
        conversion_time: impl Into<String>,
    ) -> Self {
        Self {
            google_click_id: Some(google_click_id.into()),
            conversion_name: Some(conversion_name.into()),
            conversion_time: Some(conversion_time.into()),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: f64, currency_code: impl Into<String>) -> Self {
        self.conversion_value = Some(value);
        self.conversion_currency_code = Some(currency_code.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OfflineConversionFeedReturnValue {
    #[serde(rename = "ListReturnValue.Type")]
    pub list_return_value_type: Option<String>,
    pub value: Vec<OfflineConversionFeed>,
    pub partial_failure_errors: Vec<ApiError>,
}
