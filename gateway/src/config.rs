/// Gateway configuration from environment variables
///
/// Selects the target network from the built-in map and applies per-endpoint
/// overrides. The selection is immutable for the life of the process.

use gatehouse::{NetworkMap, NetworkSelection, DEFAULT_NETWORK};
use std::env;

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// The selected network and its endpoints
    pub network: NetworkSelection,
    /// Public URL of this gateway (used in links handed to clients)
    pub public_url: String,
}

impl GatewayConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `NETWORK`: "devnet", "testnet" (default) or "mainnet"
    /// - `FULLNODE_URL` / `PUBLISHER_URL` / `AGGREGATOR_URL`: endpoint overrides
    /// - `PUBLIC_URL`: public URL of this gateway
    pub fn from_env() -> Self {
        let map = NetworkMap::standard();
        let requested = env::var("NETWORK").ok();

        let mut network = match map.select(requested.as_deref()) {
            Ok(selection) => selection,
            Err(e) => {
                log::warn!("{}, defaulting to {}", e, DEFAULT_NETWORK);
                map.select(None).expect("default network present")
            }
        };

        if let Ok(url) = env::var("FULLNODE_URL") {
            log::info!("Full node override: {}", url);
            network.endpoints.fullnode_url = url;
        }
        if let Ok(url) = env::var("PUBLISHER_URL") {
            log::info!("Publisher override: {}", url);
            network.endpoints.publisher_url = url;
        }
        if let Ok(url) = env::var("AGGREGATOR_URL") {
            log::info!("Aggregator override: {}", url);
            network.endpoints.aggregator_url = url;
        }

        log::info!(
            "Network: {} (full node: {})",
            network.name,
            network.endpoints.fullnode_url
        );

        let public_url =
            env::var("PUBLIC_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self {
            network,
            public_url,
        }
    }
}

impl Default for GatewayConfig {
    /// Default configuration (testnet, no overrides)
    fn default() -> Self {
        let network = NetworkMap::standard()
            .select(None)
            .expect("default network present");
        Self {
            network,
            public_url: "http://localhost:3000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_testnet() {
        let config = GatewayConfig::default();
        assert_eq!(config.network.name, "testnet");
        assert!(config.network.is_default);
    }

    #[test]
    fn test_default_endpoints_follow_network() {
        let config = GatewayConfig::default();
        assert!(config.network.endpoints.publisher_url.contains("testnet"));
        assert!(config.network.endpoints.aggregator_url.contains("testnet"));
    }
}
