use crate::session::WalletSession;

/// Session data that exists only once the gate has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub address: String,
}

/// Result of evaluating the route gate against a session snapshot.
///
/// The page router and every page exist only behind the `Authenticated` arm,
/// so no page logic can run and no collaborator call can fire while the
/// wallet is disconnected. There is no third state: a snapshot that claims
/// to be connected but carries no address is treated as unauthenticated,
/// since the consumer views require the address as input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Unauthenticated,
    Authenticated(AuthenticatedSession),
}

/// Single boolean decision, re-evaluated on every request.
///
/// Pure function of the snapshot; no memory of prior evaluations, so a
/// disconnect is reflected on the very next request.
pub fn evaluate(session: &WalletSession) -> GateOutcome {
    if session.connected {
        if let Some(address) = &session.address {
            return GateOutcome::Authenticated(AuthenticatedSession {
                address: address.clone(),
            });
        }
    }
    GateOutcome::Unauthenticated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_is_unauthenticated() {
        let session = WalletSession::default();
        assert_eq!(evaluate(&session), GateOutcome::Unauthenticated);
    }

    #[test]
    fn test_connected_with_address_passes() {
        let session = WalletSession {
            connected: true,
            address: Some("0xALICE".to_string()),
        };
        let GateOutcome::Authenticated(auth) = evaluate(&session) else {
            panic!("expected authenticated outcome");
        };
        assert_eq!(auth.address, "0xALICE");
    }

    #[test]
    fn test_connected_without_address_is_unauthenticated() {
        let session = WalletSession {
            connected: true,
            address: None,
        };
        assert_eq!(evaluate(&session), GateOutcome::Unauthenticated);
    }
}
