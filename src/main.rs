/// Main entry point for the auction service.
///
/// This serves as a thin wrapper that delegates to the interfaces layer.
/// The actual application logic is implemented in `interfaces::cli`.

use bidhouse::interfaces::cli;

#[tokio::main]
async fn main() {
    cli::run().await;
}
