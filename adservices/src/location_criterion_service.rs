//! `LocationCriterionService`: lookup of geographic targeting criteria.

use serde::{Deserialize, Serialize};

use crate::cm::{CM_NAMESPACE, Selector};

soap_service! {
    /// Facade of `LocationCriterionService`.
    pub struct LocationCriterionService {
        path: "api/adwords/cm/v201809/LocationCriterionService",
        namespace: CM_NAMESPACE,
    }

    /// Returns the location criteria matching the selector.
    fn get(Get) -> GetResponse, with_header: get_with_header;

    /// Returns the location criteria matching an AWQL query.
    fn query(Query) -> QueryResponse, with_header: query_with_header;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Get {
    pub selector: Selector,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GetResponse {
    pub rval: Vec<LocationCriterion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Query {
    pub query: String,
}

impl Query {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QueryResponse {
    pub rval: Vec<LocationCriterion>,
}

soap_elements!(CM_NAMESPACE;
    Get => "get",
    Query => "query",
);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationCriterion {
    pub location: Option<Location>,
    pub canonical_name: Option<String>,
    /// Approximate number of users reachable in the location
    pub reach: Option<i64>,
    pub locale: Option<String>,
    pub search_term: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub criterion_type: Option<String>,
    pub location_name: Option<String>,
    pub display_type: Option<String>,
    pub targeting_status: Option<LocationTargetingStatus>,
    pub parent_locations: Vec<Location>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationTargetingStatus {
    Active,
    Obsolete,
    PhasingOut,
}
