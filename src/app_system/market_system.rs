use std::sync::atomic::{AtomicU64, Ordering};

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::actor_framework::{Entity, ResourceActor, ResourceClient};
use crate::app_system::MarketConfig;
use crate::auth::{AuthClient, Credential};
use crate::clients::{
    CartClient, CatalogClient, ChatClient, DashboardClient, OrderClient, ProductClient, ReviewClient, UserClient,
};
use crate::domain::{CartItem, Message, Order, Product, Review, User};

/// Spawns one collection actor with `<prefix>_<n>` ids.
fn spawn_collection<T>(
    collection: &'static str,
    prefix: &'static str,
    config: &MarketConfig,
    handles: &mut Vec<JoinHandle<()>>,
) -> ResourceClient<T>
where
    T: Entity<Id = String>,
{
    let counter = AtomicU64::new(1);
    let next_id = move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst));
    let (actor, client) = ResourceActor::<T>::new(collection, config.channel_buffer, config.change_buffer, next_id);
    handles.push(tokio::spawn(actor.run()));
    client
}

/// The running marketplace: one actor per collection plus the clients wired
/// over them.
pub struct MarketSystem {
    pub auth_client: AuthClient,
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub cart_client: CartClient,
    pub order_client: OrderClient,
    pub review_client: ReviewClient,
    pub chat_client: ChatClient,
    pub catalog_client: CatalogClient,
    pub dashboard_client: DashboardClient,
    handles: Vec<JoinHandle<()>>,
}

impl MarketSystem {
    /// Must be called inside a tokio runtime.
    pub fn new(config: &MarketConfig) -> Self {
        let mut handles = Vec::new();

        let user_client = UserClient::new(spawn_collection::<User>("users", "user", config, &mut handles));
        let product_client =
            ProductClient::new(spawn_collection::<Product>("products", "product", config, &mut handles));
        let cart_client = CartClient::new(
            spawn_collection::<CartItem>("cart_items", "cart", config, &mut handles),
            product_client.clone(),
        );
        let review_client = ReviewClient::new(spawn_collection::<Review>("reviews", "review", config, &mut handles));
        let order_client = OrderClient::new(
            spawn_collection::<Order>("orders", "order", config, &mut handles),
            user_client.clone(),
            cart_client.clone(),
            review_client.clone(),
        );
        let chat_client = ChatClient::new(spawn_collection::<Message>("messages", "message", config, &mut handles));
        let auth_client = AuthClient::new(
            spawn_collection::<Credential>("credentials", "credential", config, &mut handles),
            user_client.clone(),
            config.bcrypt_cost,
        );

        let catalog_client = CatalogClient::new(product_client.clone(), user_client.clone(), review_client.clone());
        let dashboard_client = DashboardClient::new(product_client.clone(), order_client.clone());

        info!(actors = handles.len(), "Market system started");
        Self {
            auth_client,
            user_client,
            product_client,
            cart_client,
            order_client,
            review_client,
            chat_client,
            catalog_client,
            dashboard_client,
            handles,
        }
    }

    /// Drops every client, which closes the actor channels, then waits for the
    /// actors to drain.
    ///
    /// Clones handed out elsewhere keep their actor alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down market system");
        let MarketSystem {
            auth_client,
            user_client,
            product_client,
            cart_client,
            order_client,
            review_client,
            chat_client,
            catalog_client,
            dashboard_client,
            handles,
        } = self;
        drop(catalog_client);
        drop(dashboard_client);
        drop(auth_client);
        drop(order_client);
        drop(cart_client);
        drop(chat_client);
        drop(review_client);
        drop(product_client);
        drop(user_client);

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Market system shutdown complete");
        Ok(())
    }
}
