use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::{Query, ResourceClient};
use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::clients::ProductClient;
use crate::domain::{CartItem, CartItemCreate};
use crate::product_actor::ProductError;

/// Client for a user's cart.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<CartItem>,
    product_client: ProductClient,
}

impl CartClient {
    pub fn new(inner: ResourceClient<CartItem>, product_client: ProductClient) -> Self {
        Self { inner, product_client }
    }

    /// Adds `quantity` of a product to the owner's cart.
    ///
    /// The product must be active and in stock, and the quantity may not exceed
    /// what the vendor has available.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, owner_id: String, product_id: String, quantity: u32) -> Result<String, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        let product = self
            .product_client
            .require_product(product_id.clone())
            .await
            .map_err(|e| match e {
                ProductError::NotFound(id) => CartError::ProductUnavailable(id),
                other => CartError::ActorCommunicationError(other.to_string()),
            })?;
        if !product.is_purchasable() {
            warn!(stock = %product.stock_status, "Product cannot be added to cart");
            return Err(CartError::ProductUnavailable(product_id));
        }
        if quantity > product.quantity {
            return Err(CartError::AboveMaximum {
                requested: quantity,
                maximum: product.quantity,
            });
        }

        let params = CartItemCreate::from_product(owner_id, &product, quantity);
        let id = self.inner.create(params).await.map_err(CartError::from)?;
        info!(cart_item_id = %id, "Added to cart");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn list_cart(&self, owner_id: String) -> Result<Vec<CartItem>, CartError> {
        debug!("Sending request");
        let query = Query::new(format!("owner_id == {}", owner_id), move |item: &CartItem| {
            item.owner_id == owner_id
        });
        self.inner.list(query).await.map_err(CartError::from)
    }

    /// Changes a line's quantity.
    ///
    /// Out-of-bounds quantities are refused with the bound in the message and
    /// nothing is written.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, item_id: String, quantity: u32) -> Result<u32, CartError> {
        let item = self
            .inner
            .get(item_id.clone())
            .await?
            .ok_or_else(|| CartError::NotFound(item_id.clone()))?;
        if let Err(e) = item.check_quantity(quantity) {
            warn!(error = %e, "Quantity update refused");
            return Err(e);
        }

        match self.inner.perform_action(item_id, CartAction::SetQuantity(quantity)).await? {
            CartActionResult::QuantityChanged(quantity) => Ok(quantity),
        }
    }

    /// Deletes every line in the owner's cart. Returns how many were removed.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self, owner_id: String) -> Result<usize, CartError> {
        let items = self.list_cart(owner_id).await?;
        for item in &items {
            if let Err(e) = self.inner.delete(item.id.clone()).await {
                error!(cart_item_id = %item.id, error = %e, "Failed to delete cart item");
                return Err(e.into());
            }
        }
        info!(removed = items.len(), "Cart cleared");
        Ok(items.len())
    }
}

crate::impl_client_methods!(CartClient, CartItem, CartError, cart_item);
