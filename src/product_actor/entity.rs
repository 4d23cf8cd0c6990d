use chrono::Utc;

use super::actions::{ProductAction, ProductActionResult};
use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch, ProductStatus, StockStatus};

fn validate(name: &str, unit: &str, price_per_unit: f64, minimum_order_quantity: u32) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Product name is required".to_string());
    }
    if unit.trim().is_empty() {
        return Err("Unit is required".to_string());
    }
    if !price_per_unit.is_finite() || price_per_unit < 0.0 {
        return Err(format!("Invalid price per unit: {}", price_per_unit));
    }
    if minimum_order_quantity == 0 {
        return Err("Minimum order quantity must be at least 1".to_string());
    }
    Ok(())
}

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Product from a vendor's listing form.
    ///
    /// Stock status is derived from the quantity.
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, String> {
        validate(&params.name, &params.unit, params.price_per_unit, params.minimum_order_quantity)?;
        Ok(Self {
            id,
            vendor_id: params.vendor_id,
            name: params.name,
            brand: params.brand,
            category: params.category,
            description: params.description,
            price_per_unit: params.price_per_unit,
            unit: params.unit,
            quantity: params.quantity,
            minimum_order_quantity: params.minimum_order_quantity,
            images: params.images,
            status: params.status,
            stock_status: StockStatus::from_quantity(params.quantity),
            created_at: Utc::now(),
        })
    }

    /// Applies an edit and re-derives the stock status.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(brand) = patch.brand {
            self.brand = brand;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price_per_unit {
            self.price_per_unit = price;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(minimum) = patch.minimum_order_quantity {
            self.minimum_order_quantity = minimum;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        validate(&self.name, &self.unit, self.price_per_unit, self.minimum_order_quantity)?;
        self.stock_status = StockStatus::from_quantity(self.quantity);
        Ok(())
    }

    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, String> {
        match action {
            ProductAction::Publish => {
                self.status = ProductStatus::Active;
                Ok(ProductActionResult::StatusChanged(self.status))
            }
            ProductAction::Unpublish => {
                self.status = ProductStatus::Draft;
                Ok(ProductActionResult::StatusChanged(self.status))
            }
        }
    }
}
