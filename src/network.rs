//! Named networks the application can target.
//!
//! The set is fixed at compile time and the selection is immutable for the
//! life of the process; endpoint overrides are a configuration concern and
//! live in the gateway's env layer.

use std::collections::BTreeMap;

use crate::error::GatehouseError;

/// The designated default network.
pub const DEFAULT_NETWORK: &str = "testnet";

/// Connection endpoints for one named network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkEndpoints {
    pub fullnode_url: String,
    pub publisher_url: String,
    pub aggregator_url: String,
}

impl NetworkEndpoints {
    fn for_network(name: &str) -> Self {
        Self {
            fullnode_url: format!("https://fullnode.{name}.gatehouse.network"),
            publisher_url: format!("https://publisher.{name}.gatehouse.network"),
            aggregator_url: format!("https://aggregator.{name}.gatehouse.network"),
        }
    }
}

/// The network chosen for this process.
#[derive(Debug, Clone)]
pub struct NetworkSelection {
    pub name: String,
    pub is_default: bool,
    pub endpoints: NetworkEndpoints,
}

/// Fixed mapping from network name to connection endpoints.
pub struct NetworkMap {
    networks: BTreeMap<&'static str, NetworkEndpoints>,
    default_name: &'static str,
}

impl NetworkMap {
    /// The standard three-network map with `testnet` as the default.
    pub fn standard() -> Self {
        let mut networks = BTreeMap::new();
        for name in ["devnet", "testnet", "mainnet"] {
            networks.insert(name, NetworkEndpoints::for_network(name));
        }
        Self {
            networks,
            default_name: DEFAULT_NETWORK,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.networks.keys().copied()
    }

    /// Select a network by name, or the default when `None`.
    pub fn select(&self, name: Option<&str>) -> Result<NetworkSelection, GatehouseError> {
        let name = name.unwrap_or(self.default_name);
        let endpoints = self
            .networks
            .get(name)
            .ok_or_else(|| GatehouseError::UnknownNetwork(name.to_string()))?;
        log::debug!("Selected network: {name}");
        Ok(NetworkSelection {
            name: name.to_string(),
            is_default: name == self.default_name,
            endpoints: endpoints.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_testnet() {
        let map = NetworkMap::standard();
        let selection = map.select(None).unwrap();
        assert_eq!(selection.name, "testnet");
        assert!(selection.is_default);
    }

    #[test]
    fn test_named_selection() {
        let map = NetworkMap::standard();
        let selection = map.select(Some("devnet")).unwrap();
        assert_eq!(selection.name, "devnet");
        assert!(!selection.is_default);
        assert!(selection.endpoints.fullnode_url.contains("devnet"));
    }

    #[test]
    fn test_unknown_network_is_rejected() {
        let map = NetworkMap::standard();
        assert!(matches!(
            map.select(Some("localnet")),
            Err(GatehouseError::UnknownNetwork(_))
        ));
    }
}
