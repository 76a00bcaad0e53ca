use thiserror::Error;

/// Errors produced by the core library.
///
/// The core performs no I/O; the only failures it knows about are lookups
/// against its own fixed tables.
#[derive(Error, Debug)]
pub enum GatehouseError {
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Unknown feature family: {0}")]
    UnknownFamily(String),
}
