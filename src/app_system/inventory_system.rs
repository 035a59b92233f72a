use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::auth::{AuthService, StaticUserStore, TokenIssuer};
use crate::clients::ProductClient;
use crate::domain::Product;
use crate::http::AppState;
use crate::settings::Settings;

/// The running application: the product store actor plus the services the
/// HTTP layer needs.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct InventorySystem {
    pub product_client: ProductClient,
    pub auth: Arc<AuthService>,
    handles: Vec<JoinHandle<()>>,
}

impl InventorySystem {
    pub fn new(settings: &Settings) -> Self {
        // 1. Product store, ids assigned like an identity column starting at 1
        let product_id_counter = Arc::new(AtomicI32::new(1));
        let next_product_id = move || product_id_counter.fetch_add(1, Ordering::SeqCst);

        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(settings.store.buffer_size, next_product_id);
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        // 2. Authentication over the configured, read-only user set
        let users = StaticUserStore::new(settings.users());
        let tokens = TokenIssuer::new(&settings.auth.secret, settings.auth.token_lifetime());
        let auth = Arc::new(AuthService::new(Arc::new(users), tokens));

        info!(users = settings.users.len(), "Inventory system started");

        Self {
            product_client,
            auth,
            handles: vec![product_handle],
        }
    }

    pub fn state(&self) -> AppState {
        AppState {
            products: self.product_client.clone(),
            auth: self.auth.clone(),
        }
    }

    /// Drops this system's client handles and waits for the actors to drain.
    ///
    /// Actors stop once every client clone is gone, so the router must be
    /// dropped before calling this.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down system...");
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e);
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
