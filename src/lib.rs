//! Gatehouse: session-gated content access core.
//!
//! The logic-bearing core of a demo application with two access-control
//! flows: allowlist-gated and subscription-gated content. Everything here is
//! framework-free application state and dispatch; the HTTP surface and the
//! external collaborators (full node, blob publisher) live in the `gateway`
//! crate.
//!
//! # Architecture
//!
//! - **Session provider**: sole owner of the wallet-connection state
//! - **Route gate**: tagged `Unauthenticated`/`Authenticated` decision taken
//!   before any page code runs
//! - **Page router**: ordered nested dispatch with literal-over-parameter
//!   precedence; unmatched paths render nothing
//! - **Hand-off store**: per-family policy/capability pair linking an
//!   administration page to its sibling upload panel
//!
//! # Example
//!
//! ```ignore
//! use gatehouse::{gate, AppRouter, SessionProvider};
//!
//! let sessions = SessionProvider::new();
//! let router = AppRouter::new();
//!
//! sessions.connect("0xALICE".to_string());
//! match gate::evaluate(&sessions.snapshot()) {
//!     gate::GateOutcome::Authenticated(auth) => {
//!         let outcome = router.dispatch("/allowlist-example/admin/allowlist/0x123");
//!         // render the outcome for `auth.address`
//!     }
//!     gate::GateOutcome::Unauthenticated => {
//!         // render the connect prompt; no page code runs
//!     }
//! }
//! ```

// Public modules
pub mod error;
pub mod family;
pub mod gate;
pub mod handoff;
pub mod network;
pub mod page;
pub mod route;
pub mod session;

// Re-exports for convenience
pub use error::GatehouseError;
pub use family::FeatureFamily;
pub use gate::{AuthenticatedSession, GateOutcome};
pub use handoff::{HandoffStore, PolicyHandoff};
pub use network::{NetworkEndpoints, NetworkMap, NetworkSelection, DEFAULT_NETWORK};
pub use page::{
    AccessStatus, FeatureCard, FeedEntry, FeedView, OwnedPolicy, PageView, PolicyPanel,
    UploadPanel,
};
pub use route::{AppRouter, RouteOutcome, RouteTable};
pub use session::{SessionProvider, WalletSession};
