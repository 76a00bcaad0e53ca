/// Common test utilities for gateway integration tests
///
/// Spins the mock full node + blob store in-process on an ephemeral port and
/// wires an AppManager at it. The mock's request counter lets tests assert
/// that no collaborator was contacted at all.

use std::sync::Arc;

use fullnode_mock::Ledger;
use gatehouse::{NetworkEndpoints, NetworkSelection, WalletSession};
use gateway::{AppManager, GatewayConfig};

pub struct TestEnvironment {
    pub manager: AppManager,
    pub ledger: Arc<Ledger>,
    pub mock_url: String,
}

impl TestEnvironment {
    pub async fn new() -> anyhow::Result<Self> {
        let _ = env_logger::builder().is_test(true).try_init();

        let ledger = Arc::new(Ledger::new());
        let router = fullnode_mock::create_router(ledger.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                log::error!("mock server error: {}", e);
            }
        });

        let mock_url = format!("http://{}", addr);
        log::info!("Mock collaborators at {}", mock_url);

        // The one mock serves all three collaborator roles.
        let config = GatewayConfig {
            network: NetworkSelection {
                name: "testnet".to_string(),
                is_default: true,
                endpoints: NetworkEndpoints {
                    fullnode_url: mock_url.clone(),
                    publisher_url: mock_url.clone(),
                    aggregator_url: mock_url.clone(),
                },
            },
            public_url: mock_url.clone(),
        };

        Ok(Self {
            manager: AppManager::new(config),
            ledger,
            mock_url,
        })
    }

    pub fn connect(&self, address: &str) -> anyhow::Result<WalletSession> {
        Ok(self.manager.connect(address.to_string())?)
    }
}
