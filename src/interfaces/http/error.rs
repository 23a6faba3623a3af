//! HTTP error mapping.
//!
//! Translates service errors into status codes and a JSON error body, and
//! counts them by type in the metrics registry.

use crate::application::ServiceError;
use crate::domain::store::StoreError;
use crate::shared::metrics::METRICS;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Error returned by every API handler.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub ServiceError);

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self(ServiceError::Store(e))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Store(e) => match e {
                StoreError::UserNotFound(_)
                | StoreError::ItemNotFound(_)
                | StoreError::RegionNotFound(_)
                | StoreError::CategoryNotFound(_) => StatusCode::NOT_FOUND,
                StoreError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                StoreError::NicknameTaken(_)
                | StoreError::AuctionClosed(_)
                | StoreError::BidTooLow { .. }
                | StoreError::NotEnoughQuantity { .. }
                | StoreError::BuyNowUnavailable(_) => StatusCode::CONFLICT,
            },
        }
    }

    fn error_type(&self) -> &'static str {
        match &self.0 {
            ServiceError::Validation(_) => "validation",
            ServiceError::Store(e) => match e {
                StoreError::UserNotFound(_) => "user_not_found",
                StoreError::ItemNotFound(_) => "item_not_found",
                StoreError::RegionNotFound(_) => "region_not_found",
                StoreError::CategoryNotFound(_) => "category_not_found",
                StoreError::InvalidCredentials => "invalid_credentials",
                StoreError::NicknameTaken(_) => "nickname_taken",
                StoreError::AuctionClosed(_) => "auction_closed",
                StoreError::BidTooLow { .. } => "bid_too_low",
                StoreError::NotEnoughQuantity { .. } => "not_enough_quantity",
                StoreError::BuyNowUnavailable(_) => "buy_now_unavailable",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        METRICS
            .errors_total
            .with_label_values(&[self.error_type()])
            .inc();

        let body = Json(json!({ "error": self.0.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::ValidationError;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::from(StoreError::ItemNotFound(7));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let conflict = ApiError::from(StoreError::BidTooLow {
            bid: 100,
            min_bid: 200,
        });
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let unauthorized = ApiError::from(StoreError::InvalidCredentials);
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let bad_request = ApiError(ServiceError::Validation(ValidationError::InvalidBid(
            "zero".into(),
        )));
        assert_eq!(bad_request.status(), StatusCode::BAD_REQUEST);
    }
}
