/// Shared utilities and types used across all layers
///
/// This module contains:
/// - Protocol definitions (API requests, views, summaries)
/// - Metrics registry
/// - Utilities (timestamp)

pub mod metrics;
pub mod protocol;
pub mod timestamp;

// Re-export commonly used types
pub use protocol::{
    AuthRequest, AuthResponse, BuyNowRequest, CommentRequest, ItemSummary, ItemView, Pagination,
    PlaceBidRequest, RegisterItemRequest, RegisterUserRequest, UserProfile,
};

pub use timestamp::get_fast_timestamp;
