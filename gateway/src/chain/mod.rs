//! Full-node collaborator
//!
//! - Thin JSON client over the full-node REST surface
//! - Wire types for policy objects, capabilities and subscriptions

pub mod client;
pub mod types;

pub use client::ChainClient;
pub use types::{CapRef, CreatedPolicy, PolicyObject, SubscriptionToken};
