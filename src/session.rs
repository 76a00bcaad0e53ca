use serde::Serialize;
use std::sync::RwLock;

/// Current connection state of the user's wallet.
///
/// Created disconnected at application start and populated when the external
/// wallet integration reports a connection. Read-only outside the provider.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WalletSession {
    pub connected: bool,
    pub address: Option<String>,
}

/// Sole owner and writer of the wallet session.
///
/// Consumers take snapshots; updates are applied in the order they arrive,
/// last write wins. The provider does not model connection failures: the
/// external wallet integration reports those on its own surface and this
/// state simply never transitions.
pub struct SessionProvider {
    current: RwLock<WalletSession>,
}

impl SessionProvider {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(WalletSession::default()),
        }
    }

    /// Record a reported wallet connection and return the new snapshot.
    pub fn connect(&self, address: String) -> WalletSession {
        let mut current = self.current.write().expect("session lock poisoned");
        *current = WalletSession {
            connected: true,
            address: Some(address),
        };
        current.clone()
    }

    /// Revert to the disconnected state and return the new snapshot.
    pub fn disconnect(&self) -> WalletSession {
        let mut current = self.current.write().expect("session lock poisoned");
        *current = WalletSession::default();
        current.clone()
    }

    pub fn snapshot(&self) -> WalletSession {
        self.current.read().expect("session lock poisoned").clone()
    }
}

impl Default for SessionProvider {
    fn default() -> Self {
        Self::new()
    }
}
