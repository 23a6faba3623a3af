/// Infrastructure Layer - Process-level plumbing
///
/// - `observability`: metrics and health endpoints on a separate port
/// - `seed`: deterministic database population for benchmarks and demos

pub mod observability;
pub mod seed;
