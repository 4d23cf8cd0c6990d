use tracing::{debug, instrument};

use crate::actor_framework::{Query, ResourceClient};
use crate::domain::{Product, ProductCreate, ProductPatch, ProductStatus};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

crate::impl_basic_client!(ProductClient, Product, ProductError, product);

impl ProductClient {
    #[instrument(skip(self, params), fields(vendor_id = %params.vendor_id, name = %params.name))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<String, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(ProductError::from)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: String, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn require_product(&self, id: String) -> Result<Product, ProductError> {
        self.get_product(id.clone()).await?.ok_or(ProductError::NotFound(id))
    }

    /// Everything a vendor has listed, drafts included.
    #[instrument(skip(self))]
    pub async fn list_by_vendor(&self, vendor_id: String) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let query = Query::new(format!("vendor_id == {}", vendor_id), move |p: &Product| {
            p.vendor_id == vendor_id
        });
        self.inner.list(query).await.map_err(ProductError::from)
    }

    /// Active products only.
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let query = Query::new("status == active", |p: &Product| p.status == ProductStatus::Active);
        self.inner.list(query).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn publish(&self, id: String) -> Result<ProductStatus, ProductError> {
        self.set_visibility(id, ProductAction::Publish).await
    }

    #[instrument(skip(self))]
    pub async fn unpublish(&self, id: String) -> Result<ProductStatus, ProductError> {
        self.set_visibility(id, ProductAction::Unpublish).await
    }

    async fn set_visibility(&self, id: String, action: ProductAction) -> Result<ProductStatus, ProductError> {
        debug!("Sending request");
        let ProductActionResult::StatusChanged(status) = self.inner.perform_action(id, action).await?;
        Ok(status)
    }
}
