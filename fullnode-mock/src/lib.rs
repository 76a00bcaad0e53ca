/// Mock Full Node + Blob Store
///
/// This crate provides both a standalone binary and library components for
/// mocking the external collaborators of the content gateway: the ledger
/// full node (policy objects, capabilities, subscriptions) and the blob
/// publisher/aggregator. State is held in memory; there is no backend.

pub mod handlers;
pub mod server;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use server::{create_router, run_server};
pub use state::{Ledger, LedgerError};
pub use types::*;
