/// Application Layer - Use-case coordination
///
/// Services in this layer coordinate the domain layer on behalf of the
/// HTTP interface: validate the request, stamp it with the clock, run the
/// store operation and record business metrics.

pub mod services;

pub use services::{AuctionService, BrowseService, ServiceError};
