//! API handlers.
//!
//! Each handler counts the request, times it, and delegates to the
//! application services. Error translation lives in `error.rs`.

use super::error::ApiError;
use super::AppContext;
use crate::domain::entities::{Bid, BuyNow, Category, Comment, Item, Region};
use crate::shared::metrics::METRICS;
use crate::shared::protocol::{
    AboutMeView, AuthRequest, AuthResponse, BidHistoryView, BuyNowRequest, CommentRequest,
    ItemSummary, ItemView, Pagination, PlaceBidRequest, RegisterItemRequest, RegisterUserRequest,
    UserInfoView, UserProfile,
};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use prometheus::HistogramTimer;
use std::sync::Arc;

/// Counts a request and starts its latency timer. The timer observes the
/// elapsed time when dropped at the end of the handler.
fn track(operation: &str) -> HistogramTimer {
    METRICS
        .requests_total
        .with_label_values(&[operation])
        .inc();
    METRICS
        .request_duration
        .with_label_values(&[operation])
        .start_timer()
}

pub async fn register_user(
    State(ctx): State<Arc<AppContext>>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let _timer = track("register_user");
    let profile = ctx.auction.register_user(&req)?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn authenticate(
    State(ctx): State<Arc<AppContext>>,
    Json(req): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let _timer = track("authenticate");
    Ok(Json(ctx.auction.authenticate(&req)?))
}

pub async fn user_info(
    State(ctx): State<Arc<AppContext>>,
    Path(user_id): Path<u64>,
) -> Result<Json<UserInfoView>, ApiError> {
    let _timer = track("user_info");
    Ok(Json(ctx.browse.user_info(user_id)?))
}

pub async fn about_me(
    State(ctx): State<Arc<AppContext>>,
    Path(user_id): Path<u64>,
) -> Result<Json<AboutMeView>, ApiError> {
    let _timer = track("about_me");
    Ok(Json(ctx.browse.about_me(user_id)?))
}

pub async fn store_comment(
    State(ctx): State<Arc<AppContext>>,
    Path(to_user_id): Path<u64>,
    Json(req): Json<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let _timer = track("store_comment");
    let comment = ctx.auction.store_comment(to_user_id, &req)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn list_regions(State(ctx): State<Arc<AppContext>>) -> Json<Vec<Region>> {
    let _timer = track("list_regions");
    Json(ctx.browse.regions())
}

pub async fn list_categories(State(ctx): State<Arc<AppContext>>) -> Json<Vec<Category>> {
    let _timer = track("list_categories");
    Json(ctx.browse.categories())
}

pub async fn register_item(
    State(ctx): State<Arc<AppContext>>,
    Json(req): Json<RegisterItemRequest>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let _timer = track("register_item");
    let item = ctx.auction.register_item(&req)?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn view_item(
    State(ctx): State<Arc<AppContext>>,
    Path(item_id): Path<u64>,
) -> Result<Json<ItemView>, ApiError> {
    let _timer = track("view_item");
    Ok(Json(ctx.browse.view_item(item_id)?))
}

pub async fn bid_history(
    State(ctx): State<Arc<AppContext>>,
    Path(item_id): Path<u64>,
) -> Result<Json<BidHistoryView>, ApiError> {
    let _timer = track("bid_history");
    Ok(Json(ctx.browse.bid_history(item_id)?))
}

pub async fn place_bid(
    State(ctx): State<Arc<AppContext>>,
    Path(item_id): Path<u64>,
    Json(req): Json<PlaceBidRequest>,
) -> Result<(StatusCode, Json<Bid>), ApiError> {
    let _timer = track("place_bid");
    let bid = ctx.auction.place_bid(item_id, &req)?;
    Ok((StatusCode::CREATED, Json(bid)))
}

pub async fn buy_now(
    State(ctx): State<Arc<AppContext>>,
    Path(item_id): Path<u64>,
    Json(req): Json<BuyNowRequest>,
) -> Result<(StatusCode, Json<BuyNow>), ApiError> {
    let _timer = track("buy_now");
    let purchase = ctx.auction.buy_now(item_id, &req)?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

pub async fn search_by_category(
    State(ctx): State<Arc<AppContext>>,
    Path(category): Path<u64>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<ItemSummary>>, ApiError> {
    let _timer = track("search_by_category");
    Ok(Json(ctx.browse.search_by_category(category, page)?))
}

pub async fn search_by_region(
    State(ctx): State<Arc<AppContext>>,
    Path((region, category)): Path<(u64, u64)>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<ItemSummary>>, ApiError> {
    let _timer = track("search_by_region");
    Ok(Json(ctx.browse.search_by_region(region, category, page)?))
}
