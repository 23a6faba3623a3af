/// Request validation - stateless business rules
///
/// Every write request is validated here before it reaches the store.
/// These are the rules that need no table state: field presence, ranges,
/// internal consistency. Stateful rules (minimum bid, remaining quantity,
/// nickname uniqueness) live in the store, where they can be checked under
/// the same lock as the mutation.
///
/// ## Validation rules
/// - Nicknames, passwords, names: non-empty, bounded length
/// - Prices and quantities: positive, below configured maxima
/// - Bids: max_bid must not be below the open bid
/// - Ratings: within [-5, 5]
/// - Durations: positive, bounded

use crate::shared::protocol::{
    BuyNowRequest, CommentRequest, PlaceBidRequest, RegisterItemRequest, RegisterUserRequest,
};
use thiserror::Error;

/// Validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid nickname: {0}")]
    InvalidNickname(String),

    #[error("invalid password: {0}")]
    InvalidPassword(String),

    #[error("invalid email: {0}")]
    InvalidEmail(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("invalid bid: {0}")]
    InvalidBid(String),

    #[error("invalid rating: {0}")]
    InvalidRating(String),

    #[error("invalid comment: {0}")]
    InvalidComment(String),
}

/// Validation configuration
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Maximum length of nickname, firstname and lastname fields.
    pub max_name_len: usize,

    /// Maximum item name length.
    pub max_item_name_len: usize,

    /// Maximum description / comment length.
    pub max_text_len: usize,

    /// Maximum quantity per item and per purchase.
    pub max_quantity: u64,

    /// Maximum price in cents.
    pub max_price: u64,

    /// Longest allowed auction duration in seconds.
    pub max_duration_secs: u64,

    /// Rating bounds (inclusive).
    pub min_rating: i64,
    pub max_rating: i64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_name_len: 20,
            max_item_name_len: 100,
            max_text_len: 1024,
            max_quantity: 1_000_000,
            max_price: u64::MAX / 2,
            max_duration_secs: 31 * 86_400,
            min_rating: -5,
            max_rating: 5,
        }
    }
}

/// Auction request validator
pub struct AuctionValidator {
    config: ValidationConfig,
}

impl AuctionValidator {
    /// Creates a validator with the default configuration.
    pub fn new() -> Self {
        Self {
            config: ValidationConfig::default(),
        }
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validates a user registration request.
    pub fn validate_register_user(&self, req: &RegisterUserRequest) -> Result<(), ValidationError> {
        self.validate_short_name(&req.nickname, "nickname")
            .map_err(ValidationError::InvalidNickname)?;
        self.validate_short_name(&req.firstname, "firstname")
            .map_err(ValidationError::InvalidName)?;
        self.validate_short_name(&req.lastname, "lastname")
            .map_err(ValidationError::InvalidName)?;

        if req.password.is_empty() {
            return Err(ValidationError::InvalidPassword(
                "password cannot be empty".to_string(),
            ));
        }

        if req.email.is_empty() || !req.email.contains('@') {
            return Err(ValidationError::InvalidEmail(format!(
                "'{}' is not an email address",
                req.email
            )));
        }

        Ok(())
    }

    /// Validates an item registration request.
    pub fn validate_register_item(&self, req: &RegisterItemRequest) -> Result<(), ValidationError> {
        if req.name.is_empty() {
            return Err(ValidationError::InvalidName(
                "item name cannot be empty".to_string(),
            ));
        }
        if req.name.len() > self.config.max_item_name_len {
            return Err(ValidationError::InvalidName(format!(
                "item name exceeds {} characters",
                self.config.max_item_name_len
            )));
        }
        if req.description.len() > self.config.max_text_len {
            return Err(ValidationError::InvalidName(format!(
                "description exceeds {} characters",
                self.config.max_text_len
            )));
        }

        self.validate_price(req.initial_price)?;
        if req.reserve_price > self.config.max_price {
            return Err(ValidationError::InvalidPrice(format!(
                "reserve price {} exceeds maximum {}",
                req.reserve_price, self.config.max_price
            )));
        }
        if req.buy_now > self.config.max_price {
            return Err(ValidationError::InvalidPrice(format!(
                "buy-now price {} exceeds maximum {}",
                req.buy_now, self.config.max_price
            )));
        }

        self.validate_quantity(req.quantity)?;

        if req.duration_secs == 0 {
            return Err(ValidationError::InvalidDuration(
                "duration must be greater than zero".to_string(),
            ));
        }
        if req.duration_secs > self.config.max_duration_secs {
            return Err(ValidationError::InvalidDuration(format!(
                "duration {}s exceeds maximum {}s",
                req.duration_secs, self.config.max_duration_secs
            )));
        }

        Ok(())
    }

    /// Validates a bid request.
    pub fn validate_place_bid(&self, req: &PlaceBidRequest) -> Result<(), ValidationError> {
        if req.bid == 0 {
            return Err(ValidationError::InvalidBid(
                "bid must be greater than zero".to_string(),
            ));
        }
        if req.max_bid < req.bid {
            return Err(ValidationError::InvalidBid(format!(
                "maximum bid {} is below the bid {}",
                req.max_bid, req.bid
            )));
        }
        self.validate_quantity(req.qty)?;
        Ok(())
    }

    /// Validates a buy-now request.
    pub fn validate_buy_now(&self, req: &BuyNowRequest) -> Result<(), ValidationError> {
        self.validate_quantity(req.qty)
    }

    /// Validates a comment request.
    pub fn validate_comment(&self, req: &CommentRequest) -> Result<(), ValidationError> {
        if req.rating < self.config.min_rating || req.rating > self.config.max_rating {
            return Err(ValidationError::InvalidRating(format!(
                "rating {} is outside [{}, {}]",
                req.rating, self.config.min_rating, self.config.max_rating
            )));
        }
        if req.comment.is_empty() {
            return Err(ValidationError::InvalidComment(
                "comment cannot be empty".to_string(),
            ));
        }
        if req.comment.len() > self.config.max_text_len {
            return Err(ValidationError::InvalidComment(format!(
                "comment exceeds {} characters",
                self.config.max_text_len
            )));
        }
        Ok(())
    }

    fn validate_short_name(&self, value: &str, field: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err(format!("{} cannot be empty", field));
        }
        if value.len() > self.config.max_name_len {
            return Err(format!(
                "{} exceeds {} characters",
                field, self.config.max_name_len
            ));
        }
        Ok(())
    }

    fn validate_price(&self, price: u64) -> Result<(), ValidationError> {
        if price == 0 {
            return Err(ValidationError::InvalidPrice(
                "price must be greater than zero".to_string(),
            ));
        }
        if price > self.config.max_price {
            return Err(ValidationError::InvalidPrice(format!(
                "price {} exceeds maximum {}",
                price, self.config.max_price
            )));
        }
        Ok(())
    }

    fn validate_quantity(&self, quantity: u64) -> Result<(), ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::InvalidQuantity(
                "quantity must be greater than zero".to_string(),
            ));
        }
        if quantity > self.config.max_quantity {
            return Err(ValidationError::InvalidQuantity(format!(
                "quantity {} exceeds maximum {}",
                quantity, self.config.max_quantity
            )));
        }
        Ok(())
    }
}

impl Default for AuctionValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_user() -> RegisterUserRequest {
        RegisterUserRequest {
            firstname: "Ada".into(),
            lastname: "Lovelace".into(),
            nickname: "ada".into(),
            password: "secret".into(),
            email: "ada@example.org".into(),
            region: 1,
        }
    }

    fn valid_item() -> RegisterItemRequest {
        RegisterItemRequest {
            name: "Antique clock".into(),
            description: "Ticks loudly".into(),
            initial_price: 2500,
            quantity: 1,
            reserve_price: 0,
            buy_now: 0,
            duration_secs: 86_400,
            seller: 1,
            category: 1,
        }
    }

    fn valid_bid() -> PlaceBidRequest {
        PlaceBidRequest {
            user_id: 1,
            bid: 2600,
            max_bid: 3000,
            qty: 1,
        }
    }

    #[test]
    fn test_valid_requests_pass() {
        let validator = AuctionValidator::new();
        assert!(validator.validate_register_user(&valid_user()).is_ok());
        assert!(validator.validate_register_item(&valid_item()).is_ok());
        assert!(validator.validate_place_bid(&valid_bid()).is_ok());
        assert!(validator
            .validate_buy_now(&BuyNowRequest { user_id: 1, qty: 2 })
            .is_ok());
        assert!(validator
            .validate_comment(&CommentRequest {
                from_user_id: 1,
                item_id: 1,
                rating: 5,
                comment: "great seller".into(),
            })
            .is_ok());
    }

    #[test]
    fn test_empty_nickname_rejected() {
        let validator = AuctionValidator::new();
        let mut req = valid_user();
        req.nickname = String::new();

        let result = validator.validate_register_user(&req);
        assert!(matches!(
            result.unwrap_err(),
            ValidationError::InvalidNickname(_)
        ));
    }

    #[test]
    fn test_bad_email_rejected() {
        let validator = AuctionValidator::new();
        let mut req = valid_user();
        req.email = "not-an-email".into();

        assert!(matches!(
            validator.validate_register_user(&req).unwrap_err(),
            ValidationError::InvalidEmail(_)
        ));
    }

    #[test]
    fn test_zero_initial_price_rejected() {
        let validator = AuctionValidator::new();
        let mut req = valid_item();
        req.initial_price = 0;

        assert!(matches!(
            validator.validate_register_item(&req).unwrap_err(),
            ValidationError::InvalidPrice(_)
        ));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let validator = AuctionValidator::new();
        let mut req = valid_item();
        req.duration_secs = 0;

        assert!(matches!(
            validator.validate_register_item(&req).unwrap_err(),
            ValidationError::InvalidDuration(_)
        ));
    }

    #[test]
    fn test_max_bid_below_bid_rejected() {
        let validator = AuctionValidator::new();
        let mut req = valid_bid();
        req.max_bid = req.bid - 100;

        assert!(matches!(
            validator.validate_place_bid(&req).unwrap_err(),
            ValidationError::InvalidBid(_)
        ));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let validator = AuctionValidator::new();
        let mut req = valid_bid();
        req.qty = 0;

        assert!(matches!(
            validator.validate_place_bid(&req).unwrap_err(),
            ValidationError::InvalidQuantity(_)
        ));
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let validator = AuctionValidator::new();
        for rating in [-6, 6, 100] {
            let req = CommentRequest {
                from_user_id: 1,
                item_id: 1,
                rating,
                comment: "text".into(),
            };
            assert!(matches!(
                validator.validate_comment(&req).unwrap_err(),
                ValidationError::InvalidRating(_)
            ));
        }
    }
}
