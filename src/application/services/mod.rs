/// Application Services
///
/// - `AuctionService`: write path (registrations, bids, purchases, comments)
/// - `BrowseService`: read path (search, item pages, user pages)

pub mod auction_service;
pub mod browse_service;

pub use auction_service::{AuctionService, ServiceError};
pub use browse_service::BrowseService;
