//! `ApiException` fault detail and the `ApiError` hierarchy.
//!
//! On the wire each error is an `<errors>` element whose concrete type is
//! given by `xsi:type`. Here the hierarchy is a single sum type: the type
//! name selects the variant, the `reason` text selects the reason variant.

use adsoap::Fault;
use serde::Deserialize;
use tracing::debug;

/// Declares a reason enumeration with its wire names.
///
/// Unrecognised wire values map to `Unknown`.
macro_rules! api_error_reason {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
            #[default]
            Unknown,
        }

        impl $name {
            pub fn from_wire(value: &str) -> Self {
                match value.trim() {
                    $($wire => Self::$variant,)*
                    _ => Self::Unknown,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)*
                    Self::Unknown => "UNKNOWN",
                }
            }
        }
    };
}

api_error_reason!(AuthenticationErrorReason {
    AmbiguousSoapRequestHeader => "AMBIGUOUS_SOAP_REQUEST_HEADER",
    AuthenticationFailed => "AUTHENTICATION_FAILED",
    ClientCustomerIdInvalid => "CLIENT_CUSTOMER_ID_INVALID",
    ClientCustomerIdIsRequired => "CLIENT_CUSTOMER_ID_IS_REQUIRED",
    ClientEmailRequired => "CLIENT_EMAIL_REQUIRED",
    CustomerNotFound => "CUSTOMER_NOT_FOUND",
    GoogleAccountDeleted => "GOOGLE_ACCOUNT_DELETED",
    GoogleAccountCookieInvalid => "GOOGLE_ACCOUNT_COOKIE_INVALID",
    GoogleAccountAuthenticationFailed => "GOOGLE_ACCOUNT_AUTHENTICATION_FAILED",
    GoogleAccountUserAndAdsUserMismatch => "GOOGLE_ACCOUNT_USER_AND_ADS_USER_MISMATCH",
    LoginCookieRequired => "LOGIN_COOKIE_REQUIRED",
    NotAdsUser => "NOT_ADS_USER",
    OauthTokenInvalid => "OAUTH_TOKEN_INVALID",
    OauthTokenExpired => "OAUTH_TOKEN_EXPIRED",
    OauthTokenDisabled => "OAUTH_TOKEN_DISABLED",
    OauthTokenRevoked => "OAUTH_TOKEN_REVOKED",
    OauthTokenHeaderInvalid => "OAUTH_TOKEN_HEADER_INVALID",
    LoginCookieInvalid => "LOGIN_COOKIE_INVALID",
    UserIdInvalid => "USER_ID_INVALID",
    TwoStepVerificationNotEnrolled => "TWO_STEP_VERIFICATION_NOT_ENROLLED",
    AdvancedProtectionNotEnrolled => "ADVANCED_PROTECTION_NOT_ENROLLED",
});

api_error_reason!(AuthorizationErrorReason {
    UnableToAuthorize => "UNABLE_TO_AUTHORIZE",
    NoAdwordsAccountForCustomer => "NO_ADWORDS_ACCOUNT_FOR_CUSTOMER",
    UserPermissionDenied => "USER_PERMISSION_DENIED",
    EffectiveUserPermissionDenied => "EFFECTIVE_USER_PERMISSION_DENIED",
    CustomerNotActive => "CUSTOMER_NOT_ACTIVE",
    UserHasReadonlyPermission => "USER_HAS_READONLY_PERMISSION",
    NoCustomerFound => "NO_CUSTOMER_FOUND",
    ServiceAccessDenied => "SERVICE_ACCESS_DENIED",
    TwoStepVerificationNotEnrolled => "TWO_STEP_VERIFICATION_NOT_ENROLLED",
    AdvancedProtectionNotEnrolled => "ADVANCED_PROTECTION_NOT_ENROLLED",
});

api_error_reason!(RateExceededErrorReason {
    RateExceeded => "RATE_EXCEEDED",
});

api_error_reason!(SizeLimitErrorReason {
    RequestSizeLimitExceeded => "REQUEST_SIZE_LIMIT_EXCEEDED",
    ResponseSizeLimitExceeded => "RESPONSE_SIZE_LIMIT_EXCEEDED",
});

api_error_reason!(DatabaseErrorReason {
    ConcurrentModification => "CONCURRENT_MODIFICATION",
    PermissionDenied => "PERMISSION_DENIED",
    AccessProhibited => "ACCESS_PROHIBITED",
    CampaignProductNotSupported => "CAMPAIGN_PRODUCT_NOT_SUPPORTED",
    DuplicateKey => "DUPLICATE_KEY",
    DatabaseError => "DATABASE_ERROR",
});

api_error_reason!(QuotaCheckErrorReason {
    InvalidTokenHeader => "INVALID_TOKEN_HEADER",
    AccountDeleted => "ACCOUNT_DELETED",
    ReadOnlyAccountBlocked => "READ_ONLY_ACCOUNT_BLOCKED",
    DeveloperTokenNotApproved => "DEVELOPER_TOKEN_NOT_APPROVED",
    TermsAndConditionsNotSigned => "TERMS_AND_CONDITIONS_NOT_SIGNED",
    MonthlyBudgetReached => "MONTHLY_BUDGET_REACHED",
    QuotaExceeded => "QUOTA_EXCEEDED",
    AccountInactive => "ACCOUNT_INACTIVE",
    AccountWarning => "ACCOUNT_WARNING",
});

api_error_reason!(InternalApiErrorReason {
    UnexpectedInternalApiError => "UNEXPECTED_INTERNAL_API_ERROR",
    TransientError => "TRANSIENT_ERROR",
    Downtime => "DOWNTIME",
    ErrorGeneratingResponse => "ERROR_GENERATING_RESPONSE",
});

api_error_reason!(RequestErrorReason {
    InvalidInput => "INVALID_INPUT",
});

api_error_reason!(RequiredErrorReason {
    Required => "REQUIRED",
});

api_error_reason!(RangeErrorReason {
    TooLow => "TOO_LOW",
    TooHigh => "TOO_HIGH",
});

api_error_reason!(NotEmptyErrorReason {
    EmptyList => "EMPTY_LIST",
});

api_error_reason!(SelectorErrorReason {
    InvalidFieldName => "INVALID_FIELD_NAME",
    MissingFields => "MISSING_FIELDS",
    MissingPredicates => "MISSING_PREDICATES",
    OperatorDoesNotSupportMultipleValues => "OPERATOR_DOES_NOT_SUPPORT_MULTIPLE_VALUES",
    InvalidPredicateFieldName => "INVALID_PREDICATE_FIELD_NAME",
    InvalidPredicateOperator => "INVALID_PREDICATE_OPERATOR",
    InvalidFieldSelector => "INVALID_FIELD_SELECTOR",
    InvalidPredicateValue => "INVALID_PREDICATE_VALUE",
    InvalidPaging => "INVALID_PAGING",
    InvalidDate => "INVALID_DATE",
});

api_error_reason!(MediaErrorReason {
    CannotAddStandardIcon => "CANNOT_ADD_STANDARD_ICON",
    CannotSelectStandardIconWithOtherTypes => "CANNOT_SELECT_STANDARD_ICON_WITH_OTHER_TYPES",
    ImageDataTooLarge => "IMAGE_DATA_TOO_LARGE",
    InvalidMediaSubtype => "INVALID_MEDIA_SUBTYPE",
    InvalidMediaType => "INVALID_MEDIA_TYPE",
    InvalidMimeType => "INVALID_MIME_TYPE",
    MediaIsInUse => "MEDIA_IS_IN_USE",
    MissingImageData => "MISSING_IMAGE_DATA",
    UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
});

api_error_reason!(OfflineConversionErrorReason {
    UnparseableGclid => "UNPARSEABLE_GCLID",
    ConversionPrecedesClick => "CONVERSION_PRECEDES_CLICK",
    FutureConversionTime => "FUTURE_CONVERSION_TIME",
    ExpiredClick => "EXPIRED_CLICK",
    TooRecentClick => "TOO_RECENT_CLICK",
    InvalidClick => "INVALID_CLICK",
    UnauthorizedUser => "UNAUTHORIZED_USER",
    InvalidConversionType => "INVALID_CONVERSION_TYPE",
    TooRecentConversionType => "TOO_RECENT_CONVERSION_TYPE",
    ClickMissingConversionLabel => "CLICK_MISSING_CONVERSION_LABEL",
    DuplicateClickConversionInRequest => "DUPLICATE_CLICK_CONVERSION_IN_REQUEST",
});

api_error_reason!(TrafficEstimatorErrorReason {
    NoCampaignForAdGroupEstimateRequest => "NO_CAMPAIGN_FOR_AD_GROUP_ESTIMATE_REQUEST",
    NoAdGroupForKeywordEstimateRequest => "NO_AD_GROUP_FOR_KEYWORD_ESTIMATE_REQUEST",
    NoMaxCpcForKeywordEstimateRequest => "NO_MAX_CPC_FOR_KEYWORD_ESTIMATE_REQUEST",
    TooManyKeywordEstimateRequests => "TOO_MANY_KEYWORD_ESTIMATE_REQUESTS",
    TooManyCampaignEstimateRequests => "TOO_MANY_CAMPAIGN_ESTIMATE_REQUESTS",
    TooManyAdgroupEstimateRequests => "TOO_MANY_ADGROUP_ESTIMATE_REQUESTS",
    TooManyTargets => "TOO_MANY_TARGETS",
    KeywordTooLong => "KEYWORD_TOO_LONG",
    KeywordContainsBroadMatchModifiers => "KEYWORD_CONTAINS_BROAD_MATCH_MODIFIERS",
    InvalidInput => "INVALID_INPUT",
    ServiceTemporarilyUnavailable => "SERVICE_TEMPORARILY_UNAVAILABLE",
});

/// Fields every `ApiError` carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiErrorBase {
    pub field_path: Option<String>,
    pub field_path_elements: Vec<FieldPathElement>,
    pub trigger: Option<String>,
    pub error_string: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldPathElement {
    pub field: String,
    pub index: Option<i32>,
}

/// One entry of `ApiException.errors`, keyed by its `xsi:type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawApiError")]
pub enum ApiError {
    Authentication {
        base: ApiErrorBase,
        reason: AuthenticationErrorReason,
    },
    Authorization {
        base: ApiErrorBase,
        reason: AuthorizationErrorReason,
    },
    RateExceeded {
        base: ApiErrorBase,
        reason: RateExceededErrorReason,
        rate_name: Option<String>,
        rate_scope: Option<String>,
        retry_after_seconds: Option<i32>,
    },
    SizeLimit {
        base: ApiErrorBase,
        reason: SizeLimitErrorReason,
    },
    Database {
        base: ApiErrorBase,
        reason: DatabaseErrorReason,
    },
    Quota {
        base: ApiErrorBase,
        reason: QuotaCheckErrorReason,
    },
    Internal {
        base: ApiErrorBase,
        reason: InternalApiErrorReason,
    },
    Request {
        base: ApiErrorBase,
        reason: RequestErrorReason,
    },
    Required {
        base: ApiErrorBase,
        reason: RequiredErrorReason,
    },
    Range {
        base: ApiErrorBase,
        reason: RangeErrorReason,
    },
    NotEmpty {
        base: ApiErrorBase,
        reason: NotEmptyErrorReason,
    },
    Selector {
        base: ApiErrorBase,
        reason: SelectorErrorReason,
    },
    Media {
        base: ApiErrorBase,
        reason: MediaErrorReason,
    },
    OfflineConversion {
        base: ApiErrorBase,
        reason: OfflineConversionErrorReason,
    },
    TrafficEstimator {
        base: ApiErrorBase,
        reason: TrafficEstimatorErrorReason,
    },
    /// A type this crate does not model; the wire names are kept.
    Unknown {
        base: ApiErrorBase,
        type_name: String,
        reason: Option<String>,
    },
}

impl ApiError {
    pub fn base(&self) -> &ApiErrorBase {
        match self {
            ApiError::Authentication { base, .. }
            | ApiError::Authorization { base, .. }
            | ApiError::RateExceeded { base, .. }
            | ApiError::SizeLimit { base, .. }
            | ApiError::Database { base, .. }
            | ApiError::Quota { base, .. }
            | ApiError::Internal { base, .. }
            | ApiError::Request { base, .. }
            | ApiError::Required { base, .. }
            | ApiError::Range { base, .. }
            | ApiError::NotEmpty { base, .. }
            | ApiError::Selector { base, .. }
            | ApiError::Media { base, .. }
            | ApiError::OfflineConversion { base, .. }
            | ApiError::TrafficEstimator { base, .. }
            | ApiError::Unknown { base, .. } => base,
        }
    }

    /// The `xsi:type` this error is written as.
    pub fn type_name(&self) -> &str {
        match self {
            ApiError::Authentication { .. } => "AuthenticationError",
            ApiError::Authorization { .. } => "AuthorizationError",
            ApiError::RateExceeded { .. } => "RateExceededError",
            ApiError::SizeLimit { .. } => "SizeLimitError",
            ApiError::Database { .. } => "DatabaseError",
            ApiError::Quota { .. } => "QuotaCheckError",
            ApiError::Internal { .. } => "InternalApiError",
            ApiError::Request { .. } => "RequestError",
            ApiError::Required { .. } => "RequiredError",
            ApiError::Range { .. } => "RangeError",
            ApiError::NotEmpty { .. } => "NotEmptyError",
            ApiError::Selector { .. } => "SelectorError",
            ApiError::Media { .. } => "MediaError",
            ApiError::OfflineConversion { .. } => "OfflineConversionError",
            ApiError::TrafficEstimator { .. } => "TrafficEstimatorError",
            ApiError::Unknown { type_name, .. } => type_name,
        }
    }
}

/// Wire shape shared by all error types.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawApiError {
    #[serde(rename = "@type")]
    xsi_type: Option<String>,
    #[serde(rename = "ApiError.Type")]
    api_error_type: Option<String>,
    field_path: Option<String>,
    field_path_elements: Vec<FieldPathElement>,
    trigger: Option<String>,
    error_string: Option<String>,
    reason: Option<String>,
    rate_name: Option<String>,
    rate_scope: Option<String>,
    retry_after_seconds: Option<i32>,
}

impl From<RawApiError> for ApiError {
    fn from(raw: RawApiError) -> Self {
        // xsi:type values may be prefixed ("ns2:AuthenticationError").
        let type_name = raw
            .xsi_type
            .as_deref()
            .or(raw.api_error_type.as_deref())
            .map(|name| name.rsplit(':').next().unwrap_or(name).trim().to_string())
            .unwrap_or_default();
        let reason = raw.reason.as_deref().unwrap_or_default();
        let base = ApiErrorBase {
            field_path: raw.field_path,
            field_path_elements: raw.field_path_elements,
            trigger: raw.trigger,
            error_string: raw.error_string,
        };

        match type_name.as_str() {
            "AuthenticationError" => ApiError::Authentication {
                base,
                reason: AuthenticationErrorReason::from_wire(reason),
            },
            "AuthorizationError" => ApiError::Authorization {
                base,
                reason: AuthorizationErrorReason::from_wire(reason),
            },
            "RateExceededError" => ApiError::RateExceeded {
                base,
                reason: RateExceededErrorReason::from_wire(reason),
                rate_name: raw.rate_name,
                rate_scope: raw.rate_scope,
                retry_after_seconds: raw.retry_after_seconds,
            },
            "SizeLimitError" => ApiError::SizeLimit {
                base,
                reason: SizeLimitErrorReason::from_wire(reason),
            },
            "DatabaseError" => ApiError::Database {
                base,
                reason: DatabaseErrorReason::from_wire(reason),
            },
            "QuotaCheckError" => ApiError::Quota {
                base,
                reason: QuotaCheckErrorReason::from_wire(reason),
            },
            "InternalApiError" => ApiError::Internal {
                base,
                reason: InternalApiErrorReason::from_wire(reason),
            },
            "RequestError" => ApiError::Request {
                base,
                reason: RequestErrorReason::from_wire(reason),
            },
            "RequiredError" => ApiError::Required {
                base,
                reason: RequiredErrorReason::from_wire(reason),
            },
            "RangeError" => ApiError::Range {
                base,
                reason: RangeErrorReason::from_wire(reason),
            },
            "NotEmptyError" => ApiError::NotEmpty {
                base,
                reason: NotEmptyErrorReason::from_wire(reason),
            },
            "SelectorError" => ApiError::Selector {
                base,
                reason: SelectorErrorReason::from_wire(reason),
            },
            "MediaError" => ApiError::Media {
                base,
                reason: MediaErrorReason::from_wire(reason),
            },
            "OfflineConversionError" => ApiError::OfflineConversion {
                base,
                reason: OfflineConversionErrorReason::from_wire(reason),
            },
            "TrafficEstimatorError" => ApiError::TrafficEstimator {
                base,
                reason: TrafficEstimatorErrorReason::from_wire(reason),
            },
            _ => ApiError::Unknown {
                base,
                type_name,
                reason: raw.reason,
            },
        }
    }
}

/// Detail record of a fault raised by any service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiException {
    pub message: Option<String>,
    #[serde(rename = "ApplicationException.Type")]
    pub application_exception_type: Option<String>,
    pub errors: Vec<ApiError>,
}

impl ApiException {
    /// Decodes the `ApiExceptionFault` carried in the detail of `fault`.
    pub fn from_fault(fault: &Fault) -> Option<Self> {
        match fault.detail_as::<ApiException>() {
            Ok(Some(exception))
                if exception.message.is_some()
                    || exception.application_exception_type.is_some()
                    || !exception.errors.is_empty() =>
            {
                Some(exception)
            }
            Ok(_) => None,
            Err(err) => {
                debug!(error = %err, "fault detail is not an ApiExceptionFault");
                None
            }
        }
    }
}

/// Access to the typed fault detail.
pub trait FaultExt {
    fn api_exception(&self) -> Option<ApiException>;
}

impl FaultExt for Fault {
    fn api_exception(&self) -> Option<ApiException> {
        ApiException::from_fault(self)
    }
}
