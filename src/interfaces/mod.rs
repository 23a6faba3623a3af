/// Interfaces Layer - External Interface Definitions
///
/// - `http`: the public REST API
/// - `cli`: command-line configuration and process entry point

pub mod cli;
pub mod http;
