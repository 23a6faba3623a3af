/// HTTP Interface - Public REST API
///
/// Exposes the auction operations over HTTP with JSON bodies:
///
/// | Method | Path                                        | Operation          |
/// |--------|---------------------------------------------|--------------------|
/// | POST   | /users                                      | register user      |
/// | POST   | /users/auth                                 | authenticate       |
/// | GET    | /users/:id                                  | user page          |
/// | GET    | /users/:id/about-me                         | member page        |
/// | POST   | /users/:id/comments                         | leave a comment    |
/// | GET    | /regions                                    | list regions       |
/// | GET    | /categories                                 | list categories    |
/// | POST   | /items                                      | list an item       |
/// | GET    | /items/:id                                  | item page          |
/// | GET    | /items/:id/bids                             | bid history        |
/// | POST   | /items/:id/bids                             | place a bid        |
/// | POST   | /items/:id/buy-now                          | buy outright       |
/// | GET    | /categories/:id/items                       | search by category |
/// | GET    | /regions/:rid/categories/:cid/items         | search by region   |
///
/// Search endpoints take `?page=` and `?per_page=` query parameters.

pub mod error;
pub mod handlers;

use crate::application::{AuctionService, BrowseService};
use crate::domain::store::MemoryStore;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;

/// Shared state for all API handlers.
pub struct AppContext {
    pub auction: AuctionService<MemoryStore>,
    pub browse: BrowseService<MemoryStore>,
    pub store: Arc<MemoryStore>,
}

impl AppContext {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            auction: AuctionService::new(store.clone()),
            browse: BrowseService::new(store.clone()),
            store,
        }
    }
}

/// Builds the API router.
pub fn router(ctx: Arc<AppContext>, max_concurrency: usize) -> Router {
    Router::new()
        .route("/users", post(handlers::register_user))
        .route("/users/auth", post(handlers::authenticate))
        .route("/users/:id", get(handlers::user_info))
        .route("/users/:id/about-me", get(handlers::about_me))
        .route("/users/:id/comments", post(handlers::store_comment))
        .route("/regions", get(handlers::list_regions))
        .route("/categories", get(handlers::list_categories))
        .route("/items", post(handlers::register_item))
        .route("/items/:id", get(handlers::view_item))
        .route(
            "/items/:id/bids",
            get(handlers::bid_history).post(handlers::place_bid),
        )
        .route("/items/:id/buy-now", post(handlers::buy_now))
        .route("/categories/:id/items", get(handlers::search_by_category))
        .route(
            "/regions/:rid/categories/:cid/items",
            get(handlers::search_by_region),
        )
        .layer(ConcurrencyLimitLayer::new(max_concurrency))
        .with_state(ctx)
}
