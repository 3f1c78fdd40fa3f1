//! # adservices - service facades (v201809)
//!
//! One facade per service, each a thin typed wrapper over an
//! [`adsoap::SoapClient`]: an operation sends its request record with an
//! empty `SOAPAction` and returns the decoded response record.
//!
//! | Facade | Namespace | Operations |
//! |---|---|---|
//! | [`LocationCriterionService`] | `cm` | `get`, `query` |
//! | [`MediaService`] | `cm` | `get`, `query`, `upload` |
//! | [`OfflineConversionFeedService`] | `cm` | `mutate` |
//! | [`ReportDefinitionService`] | `cm` | `get_report_fields` |
//! | [`TrafficEstimatorService`] | `o` | `get` |
//!
//! Faults raised by the services carry an `ApiExceptionFault` detail,
//! decoded with [`FaultExt::api_exception`].
//!
//! ```no_run
//! use adservices::media_service::{MediaService, Query};
//! use adservices::{ClientConfig, FaultExt};
//!
//! let config = ClientConfig::load(Some("adsoap.yaml".as_ref()))?;
//! let service = MediaService::from_config(&config);
//!
//! match service.query(&Query::new("SELECT MediaId, Name WHERE Type = IMAGE")) {
//!     Ok(response) => println!("{:?}", response.rval),
//!     Err(err) => {
//!         if let Some(exception) = err.fault().and_then(|fault| fault.api_exception()) {
//!             for error in &exception.errors {
//!                 eprintln!("{}: {:?}", error.type_name(), error.base().error_string);
//!             }
//!         }
//!     }
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

#[macro_use]
mod macros;

pub mod api_error;
pub mod cm;
pub mod location_criterion_service;
pub mod media_service;
pub mod offline_conversion_feed_service;
pub mod report_definition_service;
pub mod traffic_estimator_service;

pub use adsoap::{BasicAuth, ClientConfig, Fault, SoapClient, SoapError, SoapErrorKind};
pub use api_error::{ApiError, ApiErrorBase, ApiException, FaultExt};
pub use cm::{RequestHeader, ResponseHeader, Selector};
pub use location_criterion_service::LocationCriterionService;
pub use media_service::MediaService;
pub use offline_conversion_feed_service::OfflineConversionFeedService;
pub use report_definition_service::ReportDefinitionService;
pub use traffic_estimator_service::TrafficEstimatorService;
