use chrono::Utc;

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::actor_framework::Entity;
use crate::domain::{CartItem, CartItemCreate};

impl CartItem {
    /// Checks a requested quantity against the line's bounds.
    pub fn check_quantity(&self, quantity: u32) -> Result<(), CartError> {
        if quantity < self.minimum_order_quantity {
            return Err(CartError::BelowMinimum {
                requested: quantity,
                minimum: self.minimum_order_quantity,
            });
        }
        if quantity > self.max_quantity {
            return Err(CartError::AboveMaximum {
                requested: quantity,
                maximum: self.max_quantity,
            });
        }
        Ok(())
    }
}

impl Entity for CartItem {
    type Id = String;
    type CreateParams = CartItemCreate;
    type Patch = ();
    type Action = CartAction;
    type ActionResult = CartActionResult;

    fn id(&self) -> &String {
        &self.id
    }

    /// Adds a line to a cart.
    ///
    /// Only zero and above-stock quantities are refused here; the minimum is
    /// enforced on later quantity edits.
    fn from_create_params(id: String, params: CartItemCreate) -> Result<Self, String> {
        if params.quantity == 0 {
            return Err(CartError::ZeroQuantity.to_string());
        }
        if params.quantity > params.max_quantity {
            return Err(CartError::AboveMaximum {
                requested: params.quantity,
                maximum: params.max_quantity,
            }
            .to_string());
        }
        Ok(Self {
            id,
            owner_id: params.owner_id,
            product_id: params.product_id,
            vendor_id: params.vendor_id,
            name: params.name,
            price: params.price,
            unit: params.unit,
            minimum_order_quantity: params.minimum_order_quantity,
            max_quantity: params.max_quantity,
            quantity: params.quantity,
            added_at: Utc::now(),
            updated_at: None,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Ok(())
    }

    fn handle_action(&mut self, action: CartAction) -> Result<CartActionResult, String> {
        match action {
            CartAction::SetQuantity(quantity) => {
                self.check_quantity(quantity).map_err(|e| e.to_string())?;
                self.quantity = quantity;
                self.updated_at = Some(Utc::now());
                Ok(CartActionResult::QuantityChanged(quantity))
            }
        }
    }
}
