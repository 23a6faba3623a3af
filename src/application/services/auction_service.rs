/// Auction Service - Write Path
///
/// Coordinates every mutating use case: user and item registration,
/// authentication, bids, buy-now purchases and comments. Each operation
/// follows the same shape: validate the request, stamp it with the fast
/// clock, run the store transaction, record the business metric.
///
/// ## Dependency Injection
/// The service is generic over any `AuctionStore` implementation, so tests
/// can run against a fresh `MemoryStore` and a SQL-backed store could be
/// dropped in without touching this layer.

use crate::domain::store::{AuctionStore, StoreError};
use crate::domain::validation::{AuctionValidator, ValidationError};
use crate::shared::metrics::METRICS;
use crate::shared::protocol::{
    AuthRequest, AuthResponse, BuyNowRequest, CommentRequest, PlaceBidRequest,
    RegisterItemRequest, RegisterUserRequest, UserProfile,
};
use crate::shared::timestamp::get_fast_timestamp;
use crate::domain::entities::{Bid, BuyNow, Comment, Item};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by the application services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Write-path service over an injected store.
pub struct AuctionService<S: AuctionStore> {
    store: Arc<S>,
    validator: AuctionValidator,
}

impl<S: AuctionStore> AuctionService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            validator: AuctionValidator::new(),
        }
    }

    /// Registers a new user account.
    pub fn register_user(&self, req: &RegisterUserRequest) -> Result<UserProfile, ServiceError> {
        if let Err(e) = self.validator.validate_register_user(req) {
            METRICS
                .users_registered_total
                .with_label_values(&["rejected"])
                .inc();
            return Err(e.into());
        }

        match self.store.register_user(req, get_fast_timestamp()) {
            Ok(user) => {
                METRICS
                    .users_registered_total
                    .with_label_values(&["accepted"])
                    .inc();
                info!(user_id = user.id, nickname = %user.nickname, "user registered");
                Ok(UserProfile::from(&user))
            }
            Err(e) => {
                METRICS
                    .users_registered_total
                    .with_label_values(&["rejected"])
                    .inc();
                warn!(nickname = %req.nickname, error = %e, "user registration rejected");
                Err(e.into())
            }
        }
    }

    /// Checks a nickname/password pair and returns the user id.
    pub fn authenticate(&self, req: &AuthRequest) -> Result<AuthResponse, ServiceError> {
        match self.store.authenticate(&req.nickname, &req.password) {
            Ok(user) => {
                METRICS.auth_total.with_label_values(&["success"]).inc();
                debug!(user_id = user.id, "authentication succeeded");
                Ok(AuthResponse { user_id: user.id })
            }
            Err(e) => {
                METRICS.auth_total.with_label_values(&["failure"]).inc();
                warn!(nickname = %req.nickname, "authentication failed");
                Err(e.into())
            }
        }
    }

    /// Puts a new item up for auction.
    pub fn register_item(&self, req: &RegisterItemRequest) -> Result<Item, ServiceError> {
        if let Err(e) = self.validator.validate_register_item(req) {
            METRICS
                .items_registered_total
                .with_label_values(&["rejected"])
                .inc();
            return Err(e.into());
        }

        match self.store.register_item(req, get_fast_timestamp()) {
            Ok(item) => {
                METRICS
                    .items_registered_total
                    .with_label_values(&["accepted"])
                    .inc();
                info!(
                    item_id = item.id,
                    seller = item.seller,
                    category = item.category,
                    "item listed"
                );
                Ok(item)
            }
            Err(e) => {
                METRICS
                    .items_registered_total
                    .with_label_values(&["rejected"])
                    .inc();
                warn!(seller = req.seller, error = %e, "item listing rejected");
                Err(e.into())
            }
        }
    }

    /// Places a bid on an open auction.
    pub fn place_bid(&self, item_id: u64, req: &PlaceBidRequest) -> Result<Bid, ServiceError> {
        if let Err(e) = self.validator.validate_place_bid(req) {
            METRICS.bids_total.with_label_values(&["rejected"]).inc();
            return Err(e.into());
        }

        match self.store.place_bid(item_id, req, get_fast_timestamp()) {
            Ok(bid) => {
                METRICS.bids_total.with_label_values(&["accepted"]).inc();
                debug!(
                    item_id,
                    user_id = req.user_id,
                    bid = req.bid,
                    "bid accepted"
                );
                Ok(bid)
            }
            Err(e) => {
                METRICS.bids_total.with_label_values(&["rejected"]).inc();
                debug!(item_id, user_id = req.user_id, error = %e, "bid rejected");
                Err(e.into())
            }
        }
    }

    /// Buys a quantity of an item outright at its buy-now price.
    pub fn buy_now(&self, item_id: u64, req: &BuyNowRequest) -> Result<BuyNow, ServiceError> {
        if let Err(e) = self.validator.validate_buy_now(req) {
            METRICS.buy_nows_total.with_label_values(&["rejected"]).inc();
            return Err(e.into());
        }

        match self.store.buy_now(item_id, req, get_fast_timestamp()) {
            Ok(purchase) => {
                METRICS.buy_nows_total.with_label_values(&["accepted"]).inc();
                info!(
                    item_id,
                    buyer = req.user_id,
                    qty = req.qty,
                    "buy-now purchase completed"
                );
                Ok(purchase)
            }
            Err(e) => {
                METRICS.buy_nows_total.with_label_values(&["rejected"]).inc();
                debug!(item_id, buyer = req.user_id, error = %e, "buy-now rejected");
                Err(e.into())
            }
        }
    }

    /// Stores a comment about another user and cascades the rating.
    pub fn store_comment(
        &self,
        to_user_id: u64,
        req: &CommentRequest,
    ) -> Result<Comment, ServiceError> {
        if let Err(e) = self.validator.validate_comment(req) {
            METRICS.comments_total.with_label_values(&["rejected"]).inc();
            return Err(e.into());
        }

        match self.store.store_comment(to_user_id, req, get_fast_timestamp()) {
            Ok(comment) => {
                METRICS.comments_total.with_label_values(&["accepted"]).inc();
                debug!(
                    to_user_id,
                    from = req.from_user_id,
                    rating = req.rating,
                    "comment stored"
                );
                Ok(comment)
            }
            Err(e) => {
                METRICS.comments_total.with_label_values(&["rejected"]).inc();
                debug!(to_user_id, from = req.from_user_id, error = %e, "comment rejected");
                Err(e.into())
            }
        }
    }
}
